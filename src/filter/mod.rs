pub mod types;
pub mod filter;
pub mod params;
pub mod error;

pub use types::*;
pub use filter::Filter;
pub use params::{parse_param, parse_price, CauseFilter, Page, Pagination, ProductFilter};
pub use error::FilterError;
