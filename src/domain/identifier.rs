use std::fmt;

use anyhow::Result;

use crate::error::MockError;

/// Quotes a SQL identifier. Every schema, table and column name that ends up
/// in statement text goes through here.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedTable {
    pub schema: String,
    pub table: String,
}

impl QualifiedTable {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Result<Self> {
        let schema = schema.into().trim().to_string();
        let table = table.into().trim().to_string();
        if schema.is_empty() || table.is_empty() {
            return Err(MockError::EmptyIdentifier.into());
        }
        Ok(Self { schema, table })
    }

    pub fn quoted_schema(&self) -> String {
        quote_identifier(&self.schema)
    }

    pub fn quoted_table(&self) -> String {
        quote_identifier(&self.table)
    }

    pub fn quoted(&self) -> String {
        format!("{}.{}", self.quoted_schema(), self.quoted_table())
    }
}

impl fmt::Display for QualifiedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}
