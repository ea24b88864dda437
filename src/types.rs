//! Shared types used across the request layer

use serde::{Deserialize, Deserializer};

/// A field of a partial-update body.
///
/// Distinguishes a key that was left out (`Absent`) from one sent as
/// `null` (`Null`). Fields must be declared `#[serde(default)]` so a
/// missing key lands on `Absent`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Overwrites a required field. Absent, null and `blank` values leave it alone.
    pub fn merge_into(self, slot: &mut T, blank: impl Fn(&T) -> bool) {
        if let Patch::Value(v) = self {
            if !blank(&v) {
                *slot = v;
            }
        }
    }

    /// Overwrites a clearable field. `null` resets it to the default;
    /// `blank` values leave it alone.
    pub fn merge_or_clear(self, slot: &mut T, blank: impl Fn(&T) -> bool)
    where
        T: Default,
    {
        match self {
            Patch::Absent => {}
            Patch::Null => *slot = T::default(),
            Patch::Value(v) if blank(&v) => {}
            Patch::Value(v) => *slot = v,
        }
    }

    /// Overwrites an optional field. `null` clears it; `blank` values leave it alone.
    pub fn merge_into_option(self, slot: &mut Option<T>, blank: impl Fn(&T) -> bool) {
        match self {
            Patch::Absent => {}
            Patch::Null => *slot = None,
            Patch::Value(v) if blank(&v) => {}
            Patch::Value(v) => *slot = Some(v),
        }
    }
}

/// Blank check for text fields: empty or whitespace only.
pub fn blank_str(s: &String) -> bool {
    s.trim().is_empty()
}

/// Collections are never blank; an empty list is a deliberate value.
pub fn never_blank<T>(_: &T) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Body {
        #[serde(default)]
        title: Patch<String>,
        #[serde(default)]
        bio: Patch<String>,
        #[serde(default)]
        tags: Patch<Vec<String>>,
    }

    #[test]
    fn distinguishes_absent_null_and_value() {
        let body: Body = serde_json::from_str(r#"{"bio": null, "tags": []}"#).unwrap();
        assert!(body.title.is_absent());
        assert_eq!(body.bio, Patch::Null);
        assert_eq!(body.tags, Patch::Value(vec![]));
    }

    #[test]
    fn merge_skips_blank_and_null_on_required_fields() {
        let mut title = "Old".to_string();
        Patch::Value("  ".to_string()).merge_into(&mut title, blank_str);
        Patch::Null.merge_into(&mut title, blank_str);
        assert_eq!(title, "Old");
        Patch::Value("New".to_string()).merge_into(&mut title, blank_str);
        assert_eq!(title, "New");
    }

    #[test]
    fn merge_option_clears_on_null() {
        let mut bio = Some("hello".to_string());
        Patch::Absent.merge_into_option(&mut bio, blank_str);
        Patch::Value(String::new()).merge_into_option(&mut bio, blank_str);
        assert_eq!(bio.as_deref(), Some("hello"));
        Patch::Null.merge_into_option(&mut bio, blank_str);
        assert_eq!(bio, None);
    }

    #[test]
    fn merge_or_clear_resets_to_default() {
        let mut urls = vec!["https://img.example/1.png".to_string()];
        Patch::Value(Vec::new()).merge_or_clear(&mut urls, never_blank);
        assert!(urls.is_empty());

        let mut photo = "https://img.example/me.png".to_string();
        Patch::Null.merge_or_clear(&mut photo, blank_str);
        assert_eq!(photo, "");
    }
}
