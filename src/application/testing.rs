use std::collections::{BTreeMap, HashMap};

use anyhow::{Result, anyhow};
use chrono::NaiveDateTime;

use crate::{
    application::ports::{MockBatchSource, MockTableStore},
    domain::{
        identifier::QualifiedTable, mock_batch::MockBatch, table_info::MockTableInfoRow,
        target_columns::TargetColumns,
    },
    error::MockError,
};

/// Reference table state: absent, present but empty, or present with data.
#[derive(Debug, Clone, Copy, Default)]
pub enum ReferenceTable {
    #[default]
    Absent,
    Empty,
    AnalyzedAt(NaiveDateTime),
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub executed_ddl: Vec<String>,
    pub tables: HashMap<String, Vec<MockTableInfoRow>>,
    pub references: HashMap<String, ReferenceTable>,
    /// When set, `load_batch` fails with this message before storing anything.
    pub load_failure: Option<String>,
}

impl InMemoryStore {
    pub fn with_reference(mut self, table: &QualifiedTable, reference: ReferenceTable) -> Self {
        self.references.insert(table.to_string(), reference);
        self
    }

    pub fn rows(&self, table: &QualifiedTable) -> &[MockTableInfoRow] {
        self.tables
            .get(&table.to_string())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl MockTableStore for InMemoryStore {
    fn load_batch(
        &mut self,
        ddl: &str,
        target: &QualifiedTable,
        columns: &TargetColumns,
        rows: &[MockTableInfoRow],
    ) -> Result<()> {
        if let Some(message) = &self.load_failure {
            return Err(anyhow!("{message}"));
        }
        for row in rows {
            if let Some(missing) = columns.names().find(|name| row.value(name).is_none()) {
                return Err(MockError::UnknownColumn(missing.to_string()).into());
            }
        }

        self.executed_ddl.push(ddl.to_string());
        self.tables
            .entry(target.to_string())
            .or_default()
            .extend(rows.iter().cloned());
        Ok(())
    }
}

impl MockBatchSource for InMemoryStore {
    fn table_exists(&mut self, table: &QualifiedTable) -> Result<bool> {
        let reference = self.references.get(&table.to_string()).copied();
        Ok(!matches!(reference, None | Some(ReferenceTable::Absent)))
    }

    fn max_last_analyzed_at(&mut self, table: &QualifiedTable) -> Result<Option<NaiveDateTime>> {
        match self.references.get(&table.to_string()) {
            Some(ReferenceTable::AnalyzedAt(analyzed_at)) => Ok(Some(*analyzed_at)),
            Some(ReferenceTable::Empty) => Ok(None),
            _ => Err(anyhow!("relation {table} does not exist")),
        }
    }

    fn mock_batches(&mut self, table: &QualifiedTable) -> Result<Vec<MockBatch>> {
        let rows = self
            .tables
            .get(&table.to_string())
            .ok_or_else(|| anyhow!("relation {table} does not exist"))?;

        let mut first_seen: BTreeMap<i64, NaiveDateTime> = BTreeMap::new();
        for row in rows {
            first_seen
                .entry(row.mock_id)
                .and_modify(|created_at| *created_at = (*created_at).min(row.mock_created_at))
                .or_insert(row.mock_created_at);
        }

        Ok(first_seen
            .into_iter()
            .map(|(mock_id, first_created_at)| MockBatch {
                mock_id,
                first_created_at,
            })
            .collect())
    }
}
