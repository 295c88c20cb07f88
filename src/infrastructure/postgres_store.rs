use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use postgres::{Client, NoTls, types::ToSql};
use tracing::{debug, info};

use crate::{
    application::ports::{MockBatchSource, MockTableStore},
    domain::{
        identifier::{QualifiedTable, quote_identifier},
        mock_batch::MockBatch,
        table_info::{ColumnValue, MockTableInfoRow},
        target_columns::TargetColumns,
    },
    error::MockError,
    infrastructure::db_config::DbConfig,
};

const TABLE_EXISTS_SQL: &str = "SELECT EXISTS (\
    SELECT FROM information_schema.tables \
    WHERE table_schema = $1::text AND table_name = $2::text)";

pub struct PostgresStore {
    client: Client,
}

impl PostgresStore {
    pub fn connect(config: &DbConfig) -> Result<Self> {
        let client = config
            .to_postgres_config()
            .connect(NoTls)
            .map_err(MockError::Connection)?;
        info!(host = %config.host, port = config.port, dbname = %config.dbname, "connected");
        Ok(Self { client })
    }
}

impl MockTableStore for PostgresStore {
    fn load_batch(
        &mut self,
        ddl: &str,
        target: &QualifiedTable,
        columns: &TargetColumns,
        rows: &[MockTableInfoRow],
    ) -> Result<()> {
        let mut transaction = self
            .client
            .transaction()
            .context("Unable to open transaction")?;

        debug!(%ddl, "executing ddl");
        transaction
            .batch_execute(ddl)
            .context("Unable to execute DDL statements")?;

        let insert_sql = build_insert_sql(target, columns, rows.first())?;
        debug!(%insert_sql, "preparing insert");
        let statement = transaction
            .prepare(&insert_sql)
            .with_context(|| format!("Unable to prepare insert into {target}"))?;

        for row in rows {
            let values = row_values(row, columns)?;
            let params = values.iter().map(bind).collect::<Vec<_>>();
            transaction.execute(&statement, &params).with_context(|| {
                format!(
                    "Unable to insert mock data for {}.{}.{}",
                    row.database, row.schema, row.table
                )
            })?;
        }

        transaction
            .commit()
            .context("Unable to commit mock records")?;
        Ok(())
    }
}

impl MockBatchSource for PostgresStore {
    fn table_exists(&mut self, table: &QualifiedTable) -> Result<bool> {
        let row = self
            .client
            .query_one(TABLE_EXISTS_SQL, &[&table.schema, &table.table])
            .with_context(|| format!("Unable to check whether {table} exists"))?;
        row.try_get(0)
            .with_context(|| format!("Unexpected existence check result for {table}"))
    }

    fn max_last_analyzed_at(&mut self, table: &QualifiedTable) -> Result<Option<NaiveDateTime>> {
        let row = self
            .client
            .query_one(&max_last_analyzed_sql(table), &[])
            .with_context(|| format!("Unable to read last_analyzed_at from {table}"))?;
        row.try_get(0)
            .with_context(|| format!("last_analyzed_at of {table} is not a timestamp"))
    }

    fn mock_batches(&mut self, table: &QualifiedTable) -> Result<Vec<MockBatch>> {
        let rows = self
            .client
            .query(&grouped_mock_batches_sql(table), &[])
            .with_context(|| format!("Unable to read mock ids from {table}"))?;
        rows.iter()
            .map(|row| -> Result<MockBatch> {
                Ok(MockBatch {
                    mock_id: row
                        .try_get(0)
                        .with_context(|| format!("mock_id of {table} is not an integer"))?,
                    first_created_at: row.try_get(1).with_context(|| {
                        format!("mock_created_at of {table} is not a timestamp")
                    })?,
                })
            })
            .collect()
    }
}

/// Placeholders carry an explicit cast so each Rust value binds to exactly
/// one Postgres type; the server then assigns it to the declared column type.
fn build_insert_sql(
    target: &QualifiedTable,
    columns: &TargetColumns,
    sample_row: Option<&MockTableInfoRow>,
) -> Result<String> {
    let column_list = columns
        .names()
        .map(quote_identifier)
        .collect::<Vec<_>>()
        .join(", ");

    let placeholders = columns
        .names()
        .enumerate()
        .map(|(index, name)| -> Result<String> {
            let cast = match sample_row {
                Some(row) => row
                    .value(name)
                    .map(|value| cast_for(&value))
                    .ok_or_else(|| MockError::UnknownColumn(name.to_string()))?,
                None => "text",
            };
            Ok(format!("${}::{cast}", index + 1))
        })
        .collect::<Result<Vec<_>>>()?
        .join(", ");

    Ok(format!(
        "INSERT INTO {} ({column_list}) VALUES ({placeholders})",
        target.quoted()
    ))
}

fn max_last_analyzed_sql(table: &QualifiedTable) -> String {
    format!(
        "SELECT MAX(last_analyzed_at)::timestamp FROM {}",
        table.quoted()
    )
}

/// Row order is left to `select_new_mock_ids`.
fn grouped_mock_batches_sql(table: &QualifiedTable) -> String {
    format!(
        "SELECT mock_id::int8, MIN(mock_created_at)::timestamp AS first_created_at \
         FROM {} GROUP BY mock_id",
        table.quoted()
    )
}

fn row_values(row: &MockTableInfoRow, columns: &TargetColumns) -> Result<Vec<ColumnValue>> {
    columns
        .names()
        .map(|name| {
            row.value(name)
                .ok_or_else(|| MockError::UnknownColumn(name.to_string()).into())
        })
        .collect()
}

fn cast_for(value: &ColumnValue) -> &'static str {
    match value {
        ColumnValue::Text(_) => "text",
        ColumnValue::Int(_) => "int4",
        ColumnValue::BigInt(_) => "int8",
        ColumnValue::Float(_) => "float8",
        ColumnValue::Timestamp(_) => "timestamp",
    }
}

fn bind(value: &ColumnValue) -> &(dyn ToSql + Sync) {
    match value {
        ColumnValue::Text(text) => text,
        ColumnValue::Int(number) => number,
        ColumnValue::BigInt(number) => number,
        ColumnValue::Float(number) => number,
        ColumnValue::Timestamp(timestamp) => timestamp,
    }
}
