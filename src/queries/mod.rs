//! Rule, query and query-group evaluation.
//!
//! A [`Rule`] is a typed predicate over a single element; a [`Query`]
//! combines its rules with AND or OR semantics; a [`QueryGroup`] unions
//! the matches of its queries across every loaded model.

pub mod group;
pub mod query;
pub mod rule;

pub use crate::error::QueryError;
pub use group::{GroupResult, QueryGroup};
pub use query::Query;
pub use rule::Rule;
