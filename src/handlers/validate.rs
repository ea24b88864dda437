// handlers/validate.rs - request body validation shared by the resource handlers

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::ApiError;
use crate::models::ContactInfo;

/// Collects per-field problems so one response reports all of them.
#[derive(Debug, Default)]
pub struct Validator {
    errors: HashMap<String, String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` against `field` unless `ok`. The first problem per field wins.
    pub fn check(&mut self, field: &str, ok: bool, message: impl Into<String>) -> &mut Self {
        if !ok {
            self.errors.entry(field.to_string()).or_insert_with(|| message.into());
        }
        self
    }

    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(field, !value.trim().is_empty(), format!("{} is required", field))
    }

    /// Blank values pass; pair with `required` when the field must be present.
    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(field, value.trim().is_empty() || is_email(value), "must be a valid email address")
    }

    pub fn url(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(field, value.trim().is_empty() || is_http_url(value), "must be an absolute http(s) URL")
    }

    pub fn urls(&mut self, field: &str, values: &[String]) -> &mut Self {
        for (i, value) in values.iter().enumerate() {
            self.check(&format!("{}[{}]", field, i), is_http_url(value), "must be an absolute http(s) URL");
        }
        self
    }

    pub fn range(&mut self, field: &str, value: i64, min: i64, max: i64) -> &mut Self {
        self.check(
            field,
            (min..=max).contains(&value),
            format!("must be between {} and {}", min, max),
        )
    }

    pub fn contact_info(&mut self, field: &str, contact: &ContactInfo) -> &mut Self {
        if let Some(email) = contact.email.as_deref() {
            self.email(&format!("{}.email", field), email);
        }
        self
    }

    /// Parses a non-blank value, recording the parse error otherwise.
    pub fn parse<T>(&mut self, field: &str, value: &str) -> Option<T>
    where
        T: FromStr<Err = String>,
    {
        match value.trim().parse::<T>() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                self.check(field, false, e);
                None
            }
        }
    }

    pub fn finish(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!("Request validation failed: {:?}", self.errors);
            Err(ApiError::validation_error("Validation failed", Some(self.errors)))
        }
    }
}

fn is_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

fn is_http_url(value: &str) -> bool {
    match url::Url::parse(value.trim()) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}
