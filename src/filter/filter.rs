use serde_json::Value;

use super::types::{FilterOp, Predicate, SortDirection};

/// Builds the ordered predicate list a `DocumentStore` query consumes.
///
/// Calls may come in any order; `build` always emits filters (in the order
/// they were added), then the order-by, then limit, then offset.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    filters: Vec<Predicate>,
    order: Option<Predicate>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn where_eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.where_op(field, FilterOp::Eq, value)
    }

    pub fn where_gte(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.where_op(field, FilterOp::Gte, value)
    }

    pub fn where_lte(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.where_op(field, FilterOp::Lte, value)
    }

    pub fn where_op(mut self, field: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        self.filters.push(Predicate::Where {
            field: field.into(),
            op,
            value: value.into(),
        });
        self
    }

    /// Blank search text adds nothing.
    pub fn search(mut self, fields: &[&str], text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return self;
        }
        self.filters.push(Predicate::Search {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            text: text.to_string(),
        });
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order = Some(Predicate::OrderBy { field: field.into(), direction });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn build(self) -> Vec<Predicate> {
        let mut out = self.filters;
        out.extend(self.order);
        out.extend(self.limit.map(Predicate::Limit));
        out.extend(self.offset.map(Predicate::Offset));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn emits_pipeline_in_fixed_order() {
        let preds = Filter::new()
            .offset(5)
            .order_by("createdAt", SortDirection::Desc)
            .limit(5)
            .where_eq("type", "animal")
            .where_gte("price", 10)
            .build();

        assert_eq!(
            preds,
            vec![
                Predicate::Where { field: "type".into(), op: FilterOp::Eq, value: json!("animal") },
                Predicate::Where { field: "price".into(), op: FilterOp::Gte, value: json!(10) },
                Predicate::OrderBy { field: "createdAt".into(), direction: SortDirection::Desc },
                Predicate::Limit(5),
                Predicate::Offset(5),
            ]
        );
    }

    #[test]
    fn blank_search_is_dropped() {
        assert!(Filter::new().search(&["title"], "   ").build().is_empty());
        let preds = Filter::new().search(&["title", "description"], " dogs ").build();
        assert_eq!(
            preds,
            vec![Predicate::Search { fields: vec!["title".into(), "description".into()], text: "dogs".into() }]
        );
    }
}
