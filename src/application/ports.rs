use anyhow::Result;
use chrono::NaiveDateTime;

use crate::domain::{
    identifier::QualifiedTable, mock_batch::MockBatch, table_info::MockTableInfoRow,
    target_columns::TargetColumns,
};

/// Destination side of the generator.
pub trait MockTableStore {
    /// Executes `ddl`, then inserts every row into `target` using the column
    /// order of `columns`. All of it succeeds or none of it is kept.
    fn load_batch(
        &mut self,
        ddl: &str,
        target: &QualifiedTable,
        columns: &TargetColumns,
        rows: &[MockTableInfoRow],
    ) -> Result<()>;
}

/// Read side used by the mock batch selector.
pub trait MockBatchSource {
    fn table_exists(&mut self, table: &QualifiedTable) -> Result<bool>;

    fn max_last_analyzed_at(&mut self, table: &QualifiedTable) -> Result<Option<NaiveDateTime>>;

    /// Distinct mock ids of `table` with the earliest `mock_created_at` of each.
    fn mock_batches(&mut self, table: &QualifiedTable) -> Result<Vec<MockBatch>>;
}
