//! Supported filter operators and their wire form.

use crate::SheetdbError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of operators the query builder may emit.
///
/// | operator | wire | value |
/// |---|---|---|
/// | equal | `eq` | `v` |
/// | not_equal | `not.eq` | `v` |
/// | less | `lt` | `v` |
/// | less_or_equal | `lte` | `v` |
/// | greater | `gt` | `v` |
/// | greater_or_equal | `gte` | `v` |
/// | like | `like` | `*v*` |
/// | not_like | `not.like` | `*v*` |
/// | starts_with | `like` | `v*` |
/// | ends_with | `like` | `*v` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Like,
    NotLike,
    StartsWith,
    EndsWith,
}

impl Operator {
    pub const ALL: [Operator; 10] = [
        Operator::Equal,
        Operator::NotEqual,
        Operator::Less,
        Operator::LessOrEqual,
        Operator::Greater,
        Operator::GreaterOrEqual,
        Operator::Like,
        Operator::NotLike,
        Operator::StartsWith,
        Operator::EndsWith,
    ];

    /// Name used by the query builder.
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Equal => "equal",
            Operator::NotEqual => "not_equal",
            Operator::Less => "less",
            Operator::LessOrEqual => "less_or_equal",
            Operator::Greater => "greater",
            Operator::GreaterOrEqual => "greater_or_equal",
            Operator::Like => "like",
            Operator::NotLike => "not_like",
            Operator::StartsWith => "starts_with",
            Operator::EndsWith => "ends_with",
        }
    }

    /// Operator as understood by the REST query engine.
    pub fn wire(&self) -> &'static str {
        match self {
            Operator::Equal => "eq",
            Operator::NotEqual => "not.eq",
            Operator::Less => "lt",
            Operator::LessOrEqual => "lte",
            Operator::Greater => "gt",
            Operator::GreaterOrEqual => "gte",
            Operator::Like | Operator::StartsWith | Operator::EndsWith => "like",
            Operator::NotLike => "not.like",
        }
    }

    /// Apply the operator's wildcard wrapping to a raw value.
    pub fn transform(&self, value: &str) -> String {
        match self {
            Operator::Like | Operator::NotLike => format!("*{}*", value),
            Operator::StartsWith => format!("{}*", value),
            Operator::EndsWith => format!("*{}", value),
            _ => value.to_string(),
        }
    }
}

impl FromStr for Operator {
    type Err = SheetdbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| SheetdbError::UnsupportedOperator {
                operator: s.to_string(),
            })
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
