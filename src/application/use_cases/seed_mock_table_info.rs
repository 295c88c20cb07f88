use anyhow::{Result, anyhow};
use chrono::{DateTime, TimeZone};
use console::style;
use rand::Rng;
use tracing::{debug, info};

use crate::{
    application::{
        commands::{SeedMockTableInfoCommand, SeedMockTableInfoResult},
        ports::MockTableStore,
    },
    domain::table_info::{MockBatchContext, MockTableInfoRow},
    infrastructure::ddl_template::DdlTemplate,
};

#[derive(Debug, Default)]
pub struct SeedMockTableInfoUseCase;

impl SeedMockTableInfoUseCase {
    pub fn execute<Tz: TimeZone>(
        &self,
        command: SeedMockTableInfoCommand,
        store: &mut impl MockTableStore,
        rng: &mut impl Rng,
        now: DateTime<Tz>,
    ) -> Result<SeedMockTableInfoResult> {
        if command.source_tables.is_empty() {
            return Err(anyhow!("No source tables to generate mock data for"));
        }

        let ddl_template = DdlTemplate::load(&command.template_dir, &command.ddl_filename)?;
        println!("{}", style(format!("Creating {}...", command.target)).cyan());
        let ddl = ddl_template.render(command.recreate, &command.target, &command.target_columns)?;

        let batch_context = MockBatchContext::new(now, rng);
        info!(
            mock_id = batch_context.mock_id,
            database_size = batch_context.database_size,
            "generating mock batch"
        );

        let rows = command
            .source_tables
            .iter()
            .map(|source_table| {
                println!(
                    "{}",
                    style(format!("Generating mock data for {source_table}...")).dim()
                );
                let row = MockTableInfoRow::generate(&batch_context, source_table, rng);
                debug!(?row, "generated row");
                row
            })
            .collect::<Vec<_>>();

        println!(
            "{}",
            style(format!(
                "Executing DDL statements and inserting {} mock records...",
                rows.len()
            ))
            .cyan()
        );
        store.load_batch(&ddl, &command.target, &command.target_columns, &rows)?;

        Ok(SeedMockTableInfoResult {
            mock_id: batch_context.mock_id,
            row_count: rows.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::{Local, TimeZone};
    use rand::{SeedableRng, rngs::StdRng};

    use super::SeedMockTableInfoUseCase;
    use crate::{
        application::{commands::SeedMockTableInfoCommand, testing::InMemoryStore},
        domain::{
            identifier::QualifiedTable, source_table::SourceTable, target_columns::TargetColumns,
        },
        infrastructure::ddl_template::DEFAULT_DDL_FILENAME,
    };

    fn command(source_tables: Vec<SourceTable>, recreate: bool) -> SeedMockTableInfoCommand {
        SeedMockTableInfoCommand {
            template_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates"),
            ddl_filename: DEFAULT_DDL_FILENAME.to_string(),
            source_tables,
            target: QualifiedTable::new("mock_redshift", "mock_svv_table_info")
                .expect("target should be valid"),
            target_columns: TargetColumns::default(),
            recreate,
        }
    }

    #[test]
    fn inserts_one_row_per_source_table_sharing_the_batch_id() {
        let mut store = InMemoryStore::default();
        let now = Local
            .timestamp_opt(1_715_000_000, 0)
            .single()
            .expect("timestamp should be valid");
        let sources = vec![
            SourceTable::new("dev", "public", "orders"),
            SourceTable::new("dev", "public", "users"),
            SourceTable::new("dev", "sales", "refunds"),
        ];

        let result = SeedMockTableInfoUseCase
            .execute(
                command(sources, true),
                &mut store,
                &mut StdRng::seed_from_u64(42),
                now,
            )
            .expect("seeding should succeed");

        assert_eq!(result.mock_id, 1_715_000_000);
        assert_eq!(result.row_count, 3);

        let target = QualifiedTable::new("mock_redshift", "mock_svv_table_info")
            .expect("target should be valid");
        let rows = store.rows(&target);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.mock_id == result.mock_id));
        assert!(rows.iter().all(|row| row.mock_created_at == now.naive_local()));
        assert_eq!(
            rows.iter().map(|row| row.table.as_str()).collect::<Vec<_>>(),
            vec!["orders", "users", "refunds"]
        );

        assert_eq!(store.executed_ddl.len(), 1);
        assert!(store.executed_ddl[0].contains("DROP TABLE IF EXISTS"));
    }

    #[test]
    fn rejects_an_empty_source_list_before_touching_the_store() {
        let mut store = InMemoryStore::default();

        let error = SeedMockTableInfoUseCase
            .execute(
                command(Vec::new(), false),
                &mut store,
                &mut StdRng::seed_from_u64(1),
                Local::now(),
            )
            .expect_err("empty source list should be rejected");

        assert!(error.to_string().contains("No source tables"));
        assert!(store.executed_ddl.is_empty());
    }

    #[test]
    fn failed_load_reports_no_inserted_batch() {
        let mut store = InMemoryStore {
            load_failure: Some("Unable to execute DDL statements".to_string()),
            ..InMemoryStore::default()
        };

        let error = SeedMockTableInfoUseCase
            .execute(
                command(vec![SourceTable::new("dev", "public", "orders")], true),
                &mut store,
                &mut StdRng::seed_from_u64(5),
                Local::now(),
            )
            .expect_err("store failure should abort the run");

        assert!(error.to_string().contains("Unable to execute DDL statements"));
        assert!(store.executed_ddl.is_empty());
        assert!(store.tables.is_empty());
    }

    #[test]
    fn missing_template_aborts_without_inserting() {
        let mut store = InMemoryStore::default();
        let mut seed_command = command(vec![SourceTable::new("dev", "public", "orders")], false);
        seed_command.ddl_filename = "does_not_exist.jinja".to_string();

        let error = SeedMockTableInfoUseCase
            .execute(
                seed_command,
                &mut store,
                &mut StdRng::seed_from_u64(1),
                Local::now(),
            )
            .expect_err("missing template should fail");

        assert!(error.to_string().contains("does_not_exist.jinja"));
        assert!(store.tables.is_empty());
    }
}
