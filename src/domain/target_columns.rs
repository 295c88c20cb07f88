use std::sync::LazyLock;

use anyhow::{Result, anyhow};
use regex::Regex;

use crate::{domain::table_info::MockTableInfoRow, error::MockError};

static SQL_TYPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_ ]*(\(\s*\d+\s*(,\s*\d+\s*)?\))?(\s+[A-Za-z ]+)?$")
        .expect("SQL type pattern should compile")
});

const DEFAULT_COLUMNS: [(&str, &str); 24] = [
    ("database", "VARCHAR(255)"),
    ("schema", "VARCHAR(255)"),
    ("table_id", "BIGINT"),
    ("table", "VARCHAR(255)"),
    ("encoded", "VARCHAR(15)"),
    ("diststyle", "VARCHAR(50)"),
    ("sortkey1", "VARCHAR(255)"),
    ("max_varchar", "INT"),
    ("sortkey1_enc", "VARCHAR(32)"),
    ("sortkey_num", "INT"),
    ("size", "BIGINT"),
    ("pct_used", "DECIMAL(10, 4)"),
    ("empty", "BIGINT"),
    ("unsorted", "DECIMAL(5, 2)"),
    ("stats_off", "DECIMAL(5, 2)"),
    ("tbl_rows", "BIGINT"),
    ("skew_sortkey1", "DECIMAL(19, 2)"),
    ("skew_rows", "DECIMAL(19, 2)"),
    ("estimated_visible_rows", "BIGINT"),
    ("risk_event", "TEXT"),
    ("vacuum_sort_benefit", "DECIMAL(12, 2)"),
    ("create_time", "TIMESTAMP WITHOUT TIME ZONE"),
    ("mock_id", "BIGINT"),
    ("mock_created_at", "TIMESTAMP WITHOUT TIME ZONE"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetColumn {
    pub name: String,
    pub sql_type: String,
}

/// Ordered column-name to SQL-type mapping of the destination table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetColumns {
    columns: Vec<TargetColumn>,
}

impl TargetColumns {
    pub fn new(columns: Vec<TargetColumn>) -> Result<Self> {
        if columns.is_empty() {
            return Err(anyhow!("At least one target column is required"));
        }

        let mut validated: Vec<TargetColumn> = Vec::with_capacity(columns.len());
        for column in columns {
            if !MockTableInfoRow::COLUMN_NAMES.contains(&column.name.as_str()) {
                return Err(MockError::UnknownColumn(column.name).into());
            }
            if !SQL_TYPE_PATTERN.is_match(column.sql_type.trim()) {
                return Err(MockError::InvalidColumnType {
                    column: column.name,
                    sql_type: column.sql_type,
                }
                .into());
            }
            // A repeated name redefines the column in place.
            match validated.iter_mut().find(|existing| existing.name == column.name) {
                Some(existing) => existing.sql_type = column.sql_type.trim().to_string(),
                None => validated.push(TargetColumn {
                    sql_type: column.sql_type.trim().to_string(),
                    name: column.name,
                }),
            }
        }

        Ok(Self { columns: validated })
    }

    pub fn from_pairs(values: &[String]) -> Result<Self> {
        if values.len() % 2 != 0 {
            return Err(anyhow!("Target columns must be given as NAME TYPE pairs"));
        }
        Self::new(
            values
                .chunks_exact(2)
                .map(|pair| TargetColumn {
                    name: pair[0].clone(),
                    sql_type: pair[1].clone(),
                })
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetColumn> {
        self.columns.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }
}

impl Default for TargetColumns {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS
                .iter()
                .map(|(name, sql_type)| TargetColumn {
                    name: name.to_string(),
                    sql_type: sql_type.to_string(),
                })
                .collect(),
        }
    }
}
