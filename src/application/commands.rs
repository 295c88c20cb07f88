use std::path::PathBuf;

use crate::domain::{
    identifier::QualifiedTable, source_table::SourceTable, target_columns::TargetColumns,
};

#[derive(Debug)]
pub struct SeedMockTableInfoCommand {
    pub template_dir: PathBuf,
    pub ddl_filename: String,
    pub source_tables: Vec<SourceTable>,
    pub target: QualifiedTable,
    pub target_columns: TargetColumns,
    pub recreate: bool,
}

#[derive(Debug)]
pub struct SeedMockTableInfoResult {
    pub mock_id: i64,
    pub row_count: usize,
}

#[derive(Debug)]
pub struct SelectNewMocksCommand {
    /// Table the real analytics job writes; its latest `last_analyzed_at`
    /// is the cutoff.
    pub source: QualifiedTable,
    pub target: QualifiedTable,
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SelectNewMocksOutcome {
    NoReferenceData,
    NoNewMocks,
    Written {
        output_path: PathBuf,
        mock_ids: Vec<i64>,
    },
}
