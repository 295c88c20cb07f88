use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    application::commands::{SeedMockTableInfoCommand, SelectNewMocksCommand},
    domain::{
        identifier::QualifiedTable, source_table::SourceTable, target_columns::TargetColumns,
    },
    infrastructure::{
        ddl_template::DEFAULT_DDL_FILENAME,
        manifest::{DEFAULT_MANIFEST_PATH, read_source_tables},
    },
};

const DEFAULT_TEMPLATE_DIR: &str = "/app/scripts";
const DEFAULT_REFERENCE_SCHEMA: &str = "monitoring";
const DEFAULT_REFERENCE_TABLE: &str = "table_info";
const DEFAULT_MOCK_SCHEMA: &str = "mock_redshift";
const DEFAULT_MOCK_TABLE: &str = "mock_svv_table_info";

#[derive(Debug, Parser)]
#[command(
    name = "svv-table-info-seed",
    version,
    about = "Insert mock svv_table_info rows into the database"
)]
pub struct SeedArgs {
    #[arg(long, default_value = DEFAULT_DDL_FILENAME, help = "Target table DDL template file")]
    ddl_filename: String,
    #[arg(long, default_value = DEFAULT_TEMPLATE_DIR, help = "Directory the DDL template is loaded from")]
    template_dir: PathBuf,
    #[arg(
        long = "source-table",
        num_args = 3,
        value_names = ["DATABASE", "SCHEMA", "TABLE"],
        help = "Source table to mock, repeatable (defaults to the manifest)"
    )]
    source_tables: Vec<String>,
    #[arg(long, default_value = DEFAULT_MANIFEST_PATH, help = "JSON manifest of source tables")]
    manifest: PathBuf,
    #[arg(long, default_value = DEFAULT_MOCK_SCHEMA, help = "Schema where Redshift mocks will be loaded to")]
    target_schema: String,
    #[arg(long, default_value = DEFAULT_MOCK_TABLE, help = "Table where Redshift mocks will be loaded to")]
    target_table: String,
    #[arg(
        long = "target-column",
        num_args = 2,
        value_names = ["NAME", "TYPE"],
        help = "Column of the target table, repeatable (defaults to the full svv_table_info layout)"
    )]
    target_columns: Vec<String>,
    #[arg(long, help = "Drop and recreate the target table")]
    recreate: bool,
}

#[derive(Debug, Parser)]
#[command(
    name = "svv-table-info-select-mock-ids",
    version,
    about = "Print a file listing mock ids newer than the last analyzed table info"
)]
pub struct SelectArgs {
    #[arg(long, default_value = DEFAULT_REFERENCE_SCHEMA, help = "Schema of the real table_info data")]
    source_schema: String,
    #[arg(long, default_value = DEFAULT_REFERENCE_TABLE, help = "Table of the real table_info data")]
    source_table: String,
    #[arg(long, default_value = DEFAULT_MOCK_SCHEMA, help = "Schema where Redshift mocks are loaded to")]
    target_schema: String,
    #[arg(long, default_value = DEFAULT_MOCK_TABLE, help = "Table where Redshift mocks are loaded to")]
    target_table: String,
    #[arg(long, help = "Directory for the mock id file (defaults to the system temp dir)")]
    output_dir: Option<PathBuf>,
}

pub fn collect_seed_command() -> Result<SeedMockTableInfoCommand> {
    seed_command_from_args(SeedArgs::parse())
}

pub fn collect_select_command() -> Result<SelectNewMocksCommand> {
    select_command_from_args(SelectArgs::parse())
}

fn seed_command_from_args(args: SeedArgs) -> Result<SeedMockTableInfoCommand> {
    let source_tables = if args.source_tables.is_empty() {
        read_source_tables(&args.manifest)?
    } else {
        SourceTable::from_triples(&args.source_tables)?
    };

    let target_columns = if args.target_columns.is_empty() {
        TargetColumns::default()
    } else {
        TargetColumns::from_pairs(&args.target_columns)?
    };

    Ok(SeedMockTableInfoCommand {
        template_dir: args.template_dir,
        ddl_filename: args.ddl_filename,
        source_tables,
        target: QualifiedTable::new(args.target_schema, args.target_table)?,
        target_columns,
        recreate: args.recreate,
    })
}

fn select_command_from_args(args: SelectArgs) -> Result<SelectNewMocksCommand> {
    Ok(SelectNewMocksCommand {
        source: QualifiedTable::new(args.source_schema, args.source_table)?,
        target: QualifiedTable::new(args.target_schema, args.target_table)?,
        output_dir: args.output_dir,
    })
}
