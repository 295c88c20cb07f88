use anyhow::Result;
use chrono::Local;
use console::style;

use svv_table_info_mock::{
    application::use_cases::seed_mock_table_info::SeedMockTableInfoUseCase,
    infrastructure::{db_config::DbConfig, postgres_store::PostgresStore},
    interfaces::{cli::collect_seed_command, logging::init_logging},
};

fn main() -> Result<()> {
    init_logging();
    let command = collect_seed_command()?;
    let db_config = DbConfig::from_env()?;

    let mut store = PostgresStore::connect(&db_config)?;
    println!("{}", style("Database connection successful.").green());

    let result = SeedMockTableInfoUseCase::default().execute(
        command,
        &mut store,
        &mut rand::thread_rng(),
        Local::now(),
    )?;

    println!(
        "{} ({} rows, mock_id {})",
        style("Successfully inserted mock records.").green(),
        result.row_count,
        style(result.mock_id).bold(),
    );
    Ok(())
}
