//! Domain entities persisted in the document store.
//!
//! Field names follow the camelCase wire format shared by the JSON API and
//! the stored documents, so a document read back from the store is the same
//! shape the API returns.

pub mod cause;
pub mod contact;
pub mod guiver;
pub mod product;

pub use cause::{Cause, CauseStatus, CauseType, Comment, Update};
pub use contact::ContactInfo;
pub use guiver::{Guiver, GuiverType};
pub use product::Product;
