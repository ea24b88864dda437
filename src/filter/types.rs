use serde_json::Value;

/// Comparison applied by a `Predicate::Where`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gte,
    Lte,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One step of a store query. A query is an ordered list of these:
/// filters first, then at most one order-by, then limit, then offset.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Where { field: String, op: FilterOp, value: Value },
    /// Case-insensitive substring match against any of `fields`.
    Search { fields: Vec<String>, text: String },
    OrderBy { field: String, direction: SortDirection },
    Limit(usize),
    Offset(usize),
}

impl Predicate {
    /// Filters narrow the matching set; the rest only shape the result.
    pub fn is_filter(&self) -> bool {
        matches!(self, Predicate::Where { .. } | Predicate::Search { .. })
    }
}

/// A single-document change applied atomically by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Set { field: String, value: Value },
    /// Adds `delta` to an integer field (missing counts as 0), never going below `floor`.
    Increment { field: String, delta: i64, floor: Option<i64> },
    /// Pushes onto an array field, creating it when missing.
    Append { field: String, value: Value },
}
