use std::fmt::Display;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use super::error::FilterError;
use super::filter::Filter;
use super::types::SortDirection;
use crate::models::{CauseStatus, CauseType};

/// Every list is newest first.
pub const CREATED_AT: &str = "createdAt";

/// 1-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, page_size: 10 }
    }
}

impl Pagination {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Parses the `page` and `limit` query values. Missing values fall back
    /// to page 1 and `default_size`; sizes above `max_size` are capped.
    pub fn parse(
        page: Option<&str>,
        limit: Option<&str>,
        default_size: u32,
        max_size: u32,
    ) -> Result<Self, FilterError> {
        let page = match non_blank(page) {
            None => 1,
            Some(raw) => match raw.parse::<u32>() {
                Ok(p) if p >= 1 => p,
                _ => return Err(FilterError::InvalidPage(format!("expected a positive integer, got '{}'", raw))),
            },
        };

        let requested = match non_blank(limit) {
            None => default_size,
            Some(raw) => match raw.parse::<u32>() {
                Ok(l) if l >= 1 => l,
                _ => return Err(FilterError::InvalidLimit(format!("expected a positive integer, got '{}'", raw))),
            },
        };

        let page_size = if requested > max_size {
            tracing::warn!("Limit {} exceeds max {}, capping to max", requested, max_size);
            max_size
        } else {
            requested
        };

        Ok(Self { page, page_size })
    }

    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.page_size as usize
    }

    pub fn total_pages(&self, total_items: u64) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        total_items.div_ceil(u64::from(self.page_size))
    }

    /// Adds the limit and offset for this page.
    pub fn apply(&self, filter: Filter) -> Filter {
        filter.limit(self.page_size as usize).offset(self.offset())
    }
}

/// One page of a listing plus the number of documents matching the filters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

#[derive(Debug, Clone, Default)]
pub struct CauseFilter {
    pub cause_type: Option<CauseType>,
    pub status: Option<CauseStatus>,
    pub location: Option<String>,
    /// Matched against title, description and location.
    pub search: Option<String>,
    pub pagination: Pagination,
}

impl CauseFilter {
    pub fn to_predicates(&self) -> Vec<super::Predicate> {
        let mut filter = Filter::new();
        if let Some(cause_type) = self.cause_type {
            filter = filter.where_eq("type", cause_type.as_str());
        }
        if let Some(status) = self.status {
            filter = filter.where_eq("status", status.as_str());
        }
        if let Some(location) = non_blank(self.location.as_deref()) {
            filter = filter.where_eq("location", location);
        }
        if let Some(search) = self.search.as_deref() {
            filter = filter.search(&["title", "description", "location"], search);
        }
        self.pagination
            .apply(filter.order_by(CREATED_AT, SortDirection::Desc))
            .build()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub cause_id: Option<String>,
    pub guiver_id: Option<String>,
    /// Matched against title and description.
    pub search: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub pagination: Pagination,
}

impl ProductFilter {
    pub fn to_predicates(&self) -> Vec<super::Predicate> {
        let mut filter = Filter::new();
        if let Some(cause_id) = non_blank(self.cause_id.as_deref()) {
            filter = filter.where_eq("causeId", cause_id);
        }
        if let Some(guiver_id) = non_blank(self.guiver_id.as_deref()) {
            filter = filter.where_eq("guiverId", guiver_id);
        }
        if let Some(min) = self.min_price {
            filter = filter.where_gte("price", decimal_value(min));
        }
        if let Some(max) = self.max_price {
            filter = filter.where_lte("price", decimal_value(max));
        }
        if let Some(search) = self.search.as_deref() {
            filter = filter.search(&["title", "description"], search);
        }
        self.pagination
            .apply(filter.order_by(CREATED_AT, SortDirection::Desc))
            .build()
    }
}

/// Parses an optional query value; blank counts as absent.
pub fn parse_param<T>(field: &'static str, raw: Option<&str>) -> Result<Option<T>, FilterError>
where
    T: FromStr,
    T::Err: Display,
{
    match non_blank(raw) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| FilterError::InvalidValue { field, reason: e.to_string() }),
    }
}

/// Parses an optional non-negative price bound.
pub fn parse_price(field: &'static str, raw: Option<&str>) -> Result<Option<Decimal>, FilterError> {
    let price = parse_param::<Decimal>(field, raw)?;
    match price {
        Some(p) if p.is_sign_negative() && !p.is_zero() => Err(FilterError::InvalidValue {
            field,
            reason: "must not be negative".to_string(),
        }),
        other => Ok(other),
    }
}

/// Prices are stored as JSON floats.
pub fn decimal_value(d: Decimal) -> Value {
    d.to_f64().map(Value::from).unwrap_or(Value::Null)
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}
