//! Query string formatting for the REST query engine.
//!
//! - `select: ["a", "b"]` → `?select="a","b"`
//! - `AND(age >= 18)` → `?and=(age.gte."18")`
//! - `AND(x = 1, OR(y < 2, z like q))` → `?and=(x.eq."1",or(y.lt."2",z.like."*q*"))`

use super::operator::Operator;
use super::tree::{FilterNode, FilterQuery, Group, Rule};
use crate::{Result, SheetdbError};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left alone by `encodeURIComponent`; everything else is escaped.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a field name, column or value.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// `<field>.<wire-op>."<value>"`, with field and value encoded separately.
pub fn format_rule(rule: &Rule) -> Result<String> {
    let operator: Operator = rule.operator.parse()?;
    let value = rule
        .values
        .first()
        .ok_or_else(|| SheetdbError::MissingValue {
            field: rule.field_name.clone(),
        })?
        .as_text();

    Ok(format!(
        "{}.{}.\"{}\"",
        encode_component(&rule.field_name),
        operator.wire(),
        encode_component(&operator.transform(&value))
    ))
}

/// `<condition><delimiter>(<child>,<child>,...)`.
///
/// The outermost group is a query parameter and passes `=` as delimiter;
/// nested groups are written with an empty delimiter.
pub fn format_group(group: &Group, delimiter: &str) -> Result<String> {
    let children = group
        .rules
        .iter()
        .map(format_node)
        .collect::<Result<Vec<_>>>()?;

    Ok(format!(
        "{}{}({})",
        group.condition.as_param(),
        delimiter,
        children.join(",")
    ))
}

fn format_node(node: &FilterNode) -> Result<String> {
    match node {
        FilterNode::Group(group) => format_group(group, ""),
        FilterNode::Rule(rule) => format_rule(rule),
    }
}

/// Build the `?...` suffix for a table URL. Returns an empty string when there
/// is neither a column selection nor a filter.
pub fn format_query_string(query: &FilterQuery) -> Result<String> {
    let mut parameters = Vec::new();

    if !query.select.is_empty() {
        let columns: Vec<String> = query
            .select
            .iter()
            .map(|column| format!("\"{}\"", encode_component(column)))
            .collect();
        parameters.push(format!("select={}", columns.join(",")));
    }

    if let Some(filter) = &query.filter {
        parameters.push(format_group(filter, "=")?);
    }

    if parameters.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("?{}", parameters.join("&")))
}
