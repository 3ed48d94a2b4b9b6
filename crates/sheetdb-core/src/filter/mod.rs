//! Filter trees and their query string form.
//!
//! The spreadsheet client builds a [`Group`] of [`Rule`]s with a query
//! builder and a list of selected columns, then appends the output of
//! [`format_query_string`] to a table URL. The query engine on the other end
//! understands `select=`, `and=(...)`/`or=(...)` and the operators in
//! [`Operator`].

mod format;
mod operator;
mod tree;

pub use format::{encode_component, format_group, format_query_string, format_rule};
pub use operator::Operator;
pub use tree::{Condition, FilterNode, FilterQuery, FilterValue, Group, Rule};
