use anyhow::Result;

use svv_table_info_mock::{
    application::{
        commands::SelectNewMocksOutcome, use_cases::select_new_mocks::SelectNewMocksUseCase,
    },
    infrastructure::{db_config::DbConfig, postgres_store::PostgresStore},
    interfaces::{cli::collect_select_command, logging::init_logging},
};

fn main() -> Result<()> {
    init_logging();
    let command = collect_select_command()?;
    let db_config = DbConfig::from_env()?;
    let mut store = PostgresStore::connect(&db_config)?;

    // stdout carries nothing but the path of the written file.
    if let SelectNewMocksOutcome::Written { output_path, .. } =
        SelectNewMocksUseCase::default().execute(command, &mut store)?
    {
        println!("{}", output_path.display());
    }
    Ok(())
}
