//! Search requests and the store filters built from them
//!
//! A [`SearchRequest`] is the client-supplied description of a list query:
//! field/operator/value triples, an order clause and pagination indices.
//! [`StoreFilter::from_request`] translates it into the backend-native form
//! handed to a [`RecordStore`](crate::core::store::RecordStore).
//!
//! # Condition modes
//!
//! - **AND mode** (default): every clause is folded into a single
//!   field → predicate map. When several clauses name the same field the
//!   last one wins.
//! - **OR-substring mode**: the first clause using `orlike` turns the whole
//!   condition into "any of these comma-separated columns contains the
//!   value". Every other clause of the request is ignored.
//!
//! # Example
//! ```rust,ignore
//! let request: SearchRequest = serde_json::from_value(json!({
//!     "orderCondition": "created_at desc",
//!     "searchCondition": [
//!         {"field": "status", "operator": "eq", "value": "active"},
//!         {"field": "age", "operator": "egt", "value": 18}
//!     ],
//!     "pageIndex": 2,
//!     "pageSize": 20
//! }))?;
//! let filter = StoreFilter::from_request(&request, true);
//! // filter.skip == Some(20), filter.take == Some(20)
//! ```

use crate::core::field::FieldValue;
use crate::core::record::Record;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// Comparison operator of a [`FilterClause`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "eq")]
    Eq,
    #[serde(rename = "neq")]
    Neq,
    #[serde(rename = "notNull")]
    NotNull,
    #[serde(rename = "isNull")]
    IsNull,
    #[serde(rename = "gt")]
    Gt,
    #[serde(rename = "lt")]
    Lt,
    #[serde(rename = "egt")]
    Egt,
    #[serde(rename = "elt")]
    Elt,
    #[serde(rename = "like")]
    Like,
    /// Substring search across several comma-separated columns
    #[serde(rename = "orlike")]
    OrLike,
    /// Any operator name this crate does not know
    #[serde(rename = "unrecognized", other)]
    Unrecognized,
}

impl Operator {
    /// Translate this operator applied to `value` into a predicate.
    ///
    /// Comparison operands are parsed into typed values; `like` keeps the
    /// client's text verbatim. `OrLike` has no single-field predicate (it is
    /// handled by [`build_where`]) and `Unrecognized` contributes nothing,
    /// nor does a comparison or `like` whose value is an array or object.
    pub fn predicate(self, value: &Value) -> Option<Predicate> {
        let operand = || FieldValue::typed_from_json(value);

        let predicate = match self {
            Operator::Eq => Predicate::Equals(operand()?),
            Operator::Neq => Predicate::NotEquals(operand()?),
            Operator::NotNull => Predicate::IsNotNull,
            Operator::IsNull => Predicate::IsNull,
            Operator::Gt => Predicate::GreaterThan(operand()?),
            Operator::Lt => Predicate::LessThan(operand()?),
            Operator::Egt => Predicate::GreaterOrEqual(operand()?),
            Operator::Elt => Predicate::LessOrEqual(operand()?),
            Operator::Like => Predicate::Contains(FieldValue::raw_text(value)?),
            Operator::OrLike | Operator::Unrecognized => return None,
        };
        Some(predicate)
    }
}

/// One predicate against a named column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterClause {
    /// Column name, or a comma-separated list of names for `orlike`
    pub field: String,
    pub operator: Operator,
    /// Any JSON value; converted when the predicate is built
    #[serde(default)]
    pub value: Value,
}

impl FilterClause {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<FieldValue>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: Value::from(Into::<FieldValue>::into(value)),
        }
    }
}

/// Filters, ordering and pagination for one `find` call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    /// `"<field> <direction>"`, e.g. `"name asc"`
    #[serde(alias = "orderClause")]
    pub order_condition: Option<String>,

    #[serde(alias = "filters")]
    pub search_condition: Vec<FilterClause>,

    /// One-based page number; `(0, 0)` disables pagination
    pub page_index: u64,

    pub page_size: u64,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(
        mut self,
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<FieldValue>,
    ) -> Self {
        self.search_condition
            .push(FilterClause::new(field, operator, value));
        self
    }

    pub fn order_by(mut self, clause: impl Into<String>) -> Self {
        self.order_condition = Some(clause.into());
        self
    }

    pub fn page(mut self, page_index: u64, page_size: u64) -> Self {
        self.page_index = page_index;
        self.page_size = page_size;
        self
    }
}

/// A condition on a single column
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Equals(FieldValue),
    NotEquals(FieldValue),
    IsNull,
    IsNotNull,
    GreaterThan(FieldValue),
    LessThan(FieldValue),
    GreaterOrEqual(FieldValue),
    LessOrEqual(FieldValue),
    /// Substring match on the textual form of the column
    Contains(String),
}

impl Predicate {
    /// Evaluate against a column value (`None` for a missing column).
    ///
    /// Null columns only satisfy `IsNull`, as in SQL. `NotEquals` holds for
    /// a non-null column whose value differs in kind from the operand.
    pub fn matches(&self, actual: Option<&FieldValue>) -> bool {
        let actual = actual.filter(|v| !v.is_null());

        match self {
            Predicate::IsNull => actual.is_none(),
            Predicate::IsNotNull => actual.is_some(),
            Predicate::Equals(expected) => actual.is_some_and(|a| a.loosely_equals(expected)),
            Predicate::NotEquals(expected) => {
                actual.is_some_and(|a| !expected.is_null() && !a.loosely_equals(expected))
            }
            Predicate::GreaterThan(bound) => Self::ordered(actual, bound, |o| o.is_gt()),
            Predicate::LessThan(bound) => Self::ordered(actual, bound, |o| o.is_lt()),
            Predicate::GreaterOrEqual(bound) => Self::ordered(actual, bound, |o| o.is_ge()),
            Predicate::LessOrEqual(bound) => Self::ordered(actual, bound, |o| o.is_le()),
            Predicate::Contains(needle) => actual.is_some_and(|a| a.to_text().contains(needle)),
        }
    }

    fn ordered(
        actual: Option<&FieldValue>,
        bound: &FieldValue,
        accept: impl Fn(Ordering) -> bool,
    ) -> bool {
        actual
            .and_then(|a| a.compare(bound))
            .is_some_and(accept)
    }
}

/// The `where` part of a [`StoreFilter`]
#[derive(Debug, Clone, PartialEq)]
pub enum WhereClause {
    /// Every predicate must hold; one predicate per field
    All(IndexMap<String, Predicate>),
    /// At least one single-field predicate must hold.
    ///
    /// An empty list places no constraint.
    Any(Vec<(String, Predicate)>),
}

impl WhereClause {
    pub fn matches<T: Record>(&self, record: &T) -> bool {
        match self {
            WhereClause::All(predicates) => predicates
                .iter()
                .all(|(field, p)| p.matches(record.field_value(field).as_ref())),
            WhereClause::Any(predicates) => {
                predicates.is_empty()
                    || predicates
                        .iter()
                        .any(|(field, p)| p.matches(record.field_value(field).as_ref()))
            }
        }
    }
}

/// Sort direction of one order key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// `asc` in any case is ascending; everything else is descending
    pub fn parse(direction: &str) -> Self {
        if direction.eq_ignore_ascii_case("asc") {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// Backend-native query built from a [`SearchRequest`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreFilter {
    pub where_clause: Option<WhereClause>,
    pub order: IndexMap<String, SortDirection>,
    pub skip: Option<u64>,
    pub take: Option<u64>,
    /// Result-cache hint forwarded to the store; never acted on here
    pub cache: bool,
}

impl StoreFilter {
    /// Build the filter for one `find` call.
    ///
    /// Order and pagination are computed first; the condition builder only
    /// runs when the request carries at least one clause.
    pub fn from_request(request: &SearchRequest, cache: bool) -> Self {
        let mut filter = StoreFilter {
            cache,
            ..Default::default()
        };

        if let Some(clause) = request.order_condition.as_deref() {
            filter.order = parse_order(clause);
        }

        if let Some((skip, take)) = paginate(request.page_index, request.page_size) {
            filter.skip = Some(skip);
            filter.take = Some(take);
        }

        if !request.search_condition.is_empty() {
            filter.where_clause = build_where(&request.search_condition);
        }

        filter
    }

    /// Execute the filter over an in-process collection.
    ///
    /// Returns the requested page together with the number of records that
    /// matched before skip/take were applied.
    pub fn apply<T: Record>(&self, records: impl IntoIterator<Item = T>) -> (Vec<T>, u64) {
        let mut matched: Vec<T> = records
            .into_iter()
            .filter(|r| self.where_clause.as_ref().is_none_or(|w| w.matches(r)))
            .collect();

        if !self.order.is_empty() {
            matched.sort_by(|a, b| self.compare(a, b));
        }

        let total = matched.len() as u64;
        let skip = self.skip.map_or(0, to_usize);
        let take = self.take.map_or(usize::MAX, to_usize);

        let page = matched.into_iter().skip(skip).take(take).collect();
        (page, total)
    }

    fn compare<T: Record>(&self, a: &T, b: &T) -> Ordering {
        for (field, direction) in &self.order {
            let left = a.field_value(field).filter(|v| !v.is_null());
            let right = b.field_value(field).filter(|v| !v.is_null());

            // nulls sort last when ascending, first when descending
            let ordering = match (left, right) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(l), Some(r)) => l.compare(&r).unwrap_or(Ordering::Equal),
            };
            let ordering = match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

fn to_usize(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

/// Parse an order clause of the form `"<field> <direction>"`.
///
/// Clauses without a space separator, or with an empty field name, produce
/// no ordering.
pub fn parse_order(clause: &str) -> IndexMap<String, SortDirection> {
    let mut order = IndexMap::new();
    if !clause.contains(' ') {
        return order;
    }

    let mut parts = clause.split(' ');
    let field = parts.next().unwrap_or_default();
    let direction = parts.next().unwrap_or_default();
    if !field.is_empty() {
        order.insert(field.to_string(), SortDirection::parse(direction));
    }
    order
}

/// Compute `(skip, take)` from one-based pagination indices.
///
/// Returns `None` when `page_index + page_size <= 1` or `page_size == 0`,
/// meaning the full result set is requested.
pub fn paginate(page_index: u64, page_size: u64) -> Option<(u64, u64)> {
    if page_size == 0 || page_index.saturating_add(page_size) <= 1 {
        return None;
    }
    let skip = page_index.saturating_sub(1).saturating_mul(page_size);
    Some((skip, page_size))
}

/// Fold filter clauses into a `where` condition.
///
/// An `orlike` clause anywhere in the list switches to OR-substring mode and
/// suppresses every other clause. Otherwise clauses are combined with AND;
/// duplicate fields are last-write-wins and unrecognized operators are
/// skipped.
pub fn build_where(clauses: &[FilterClause]) -> Option<WhereClause> {
    if clauses.is_empty() {
        return None;
    }

    if let Some(or_like) = clauses.iter().find(|c| c.operator == Operator::OrLike) {
        let Some(needle) = FieldValue::raw_text(&or_like.value) else {
            tracing::warn!(field = %or_like.field, "ignoring orlike clause with a non-scalar value");
            return Some(WhereClause::Any(Vec::new()));
        };
        let any = or_like
            .field
            .split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .map(|field| (field.to_string(), Predicate::Contains(needle.clone())))
            .collect();
        return Some(WhereClause::Any(any));
    }

    let mut all = IndexMap::new();
    for clause in clauses {
        match clause.operator.predicate(&clause.value) {
            Some(predicate) => {
                all.insert(clause.field.clone(), predicate);
            }
            None => {
                tracing::warn!(
                    field = %clause.field,
                    operator = ?clause.operator,
                    "ignoring filter clause without a usable predicate"
                );
            }
        }
    }
    Some(WhereClause::All(all))
}
