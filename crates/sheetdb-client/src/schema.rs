//! Schema description served at `<dataset>/schema` and filter field typing.

use serde::{Deserialize, Serialize};

/// Schemas of one dataset, as returned by the query engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSchema {
    #[serde(default)]
    pub schemas: Vec<SchemaInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaInfo {
    pub name: String,
    #[serde(default)]
    pub objects: Vec<TableInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableInfo {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(default)]
    pub data_type: String,
}

impl DatabaseSchema {
    pub fn schema(&self, name: &str) -> Option<&SchemaInfo> {
        self.schemas.iter().find(|s| s.name == name)
    }

    /// The only table of the dataset, when there is exactly one schema with
    /// exactly one table. Such datasets skip schema and table selection.
    pub fn sole_table(&self) -> Option<(&SchemaInfo, &TableInfo)> {
        match self.schemas.as_slice() {
            [schema] => match schema.objects.as_slice() {
                [table] => Some((schema, table)),
                _ => None,
            },
            _ => None,
        }
    }
}

impl SchemaInfo {
    pub fn table(&self, name: &str) -> Option<&TableInfo> {
        self.objects.iter().find(|t| t.name == name)
    }
}

/// Input widget type used by the filter builder for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Number,
    Text,
    Date,
    Datetime,
}

impl FieldType {
    /// Map a database column type; unknown types are edited as text.
    pub fn for_db_type(data_type: &str) -> Self {
        match data_type.to_lowercase().as_str() {
            "int" | "bigint" | "decimal" | "double" | "integer" | "float" => FieldType::Number,
            "varchar" | "text" => FieldType::Text,
            "date" => FieldType::Date,
            "datetime" => FieldType::Datetime,
            _ => FieldType::Text,
        }
    }
}

/// A filterable field derived from a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl TableInfo {
    pub fn fields(&self) -> Vec<FieldSpec> {
        self.columns
            .iter()
            .map(|column| FieldSpec {
                name: column.name.clone(),
                label: column.name.clone(),
                field_type: FieldType::for_db_type(&column.data_type),
            })
            .collect()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}
