//! Filter tree produced by the query builder UI.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Boolean combinator of a [`Group`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "AND", alias = "and")]
    And,
    #[serde(rename = "OR", alias = "or")]
    Or,
}

impl Condition {
    /// Lowercase key used in the query string (`and` / `or`).
    pub fn as_param(&self) -> &'static str {
        match self {
            Condition::And => "and",
            Condition::Or => "or",
        }
    }
}

/// One operand of a rule. The builder sends strings, numbers or booleans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterValue {
    #[serde(rename = "type", default)]
    pub value_type: String,
    pub value: Value,
}

impl FilterValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value_type: "text".to_string(),
            value: Value::String(value.into()),
        }
    }

    /// The value as it appears in a query string.
    pub fn as_text(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// A single predicate.
///
/// `operator` is kept as sent so that unknown operators surface as a
/// formatting error instead of failing the whole request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    #[serde(default)]
    pub id: String,
    pub field_name: String,
    #[serde(rename = "type", default)]
    pub field_type: String,
    pub operator: String,
    #[serde(default)]
    pub values: Vec<FilterValue>,
}

impl Rule {
    pub fn new(field_name: impl Into<String>, operator: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            field_name: field_name.into(),
            field_type: "text".to_string(),
            operator: operator.into(),
            values: vec![FilterValue::text(value)],
        }
    }
}

/// Rules and nested groups combined with one condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub condition: Condition,
    #[serde(default)]
    pub rules: Vec<FilterNode>,
}

impl Group {
    pub fn new(condition: Condition, rules: Vec<FilterNode>) -> Self {
        Self { condition, rules }
    }

    pub fn and(rules: Vec<FilterNode>) -> Self {
        Self::new(Condition::And, rules)
    }

    pub fn or(rules: Vec<FilterNode>) -> Self {
        Self::new(Condition::Or, rules)
    }
}

/// Child of a group: either a rule or another group.
///
/// On the wire a group is recognized by its `condition`/`rules` keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterNode {
    Group(Group),
    Rule(Rule),
}

impl From<Rule> for FilterNode {
    fn from(rule: Rule) -> Self {
        FilterNode::Rule(rule)
    }
}

impl From<Group> for FilterNode {
    fn from(group: Group) -> Self {
        FilterNode::Group(group)
    }
}

/// Column selection plus optional filter, the input of the query string formatter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub select: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Group>,
}
