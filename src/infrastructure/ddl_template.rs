use std::path::Path;

use anyhow::{Context, Result};
use minijinja::{AutoEscape, Environment, Value, context, path_loader};

use crate::domain::{
    identifier::{QualifiedTable, quote_identifier},
    target_columns::TargetColumns,
};

pub const DEFAULT_DDL_FILENAME: &str = "svv_table_info_ddl.jinja";

/// Jinja template producing the destination table DDL. It receives
/// `recreate`, `schema_name`, `table_name` and `columns`; identifiers arrive
/// already quoted.
pub struct DdlTemplate {
    environment: Environment<'static>,
    template_name: String,
}

impl DdlTemplate {
    pub fn load(template_dir: &Path, template_name: &str) -> Result<Self> {
        let mut environment = Environment::new();
        environment.set_loader(path_loader(template_dir.to_path_buf()));
        environment.set_auto_escape_callback(|_| AutoEscape::None);

        environment.get_template(template_name).with_context(|| {
            format!(
                "Unable to load DDL template {template_name} from {}",
                template_dir.display()
            )
        })?;

        Ok(Self {
            environment,
            template_name: template_name.to_string(),
        })
    }

    pub fn render(
        &self,
        recreate: bool,
        target: &QualifiedTable,
        columns: &TargetColumns,
    ) -> Result<String> {
        let template = self
            .environment
            .get_template(&self.template_name)
            .with_context(|| format!("Unable to load DDL template {}", self.template_name))?;

        let column_map = Value::from_iter(
            columns
                .iter()
                .map(|column| (quote_identifier(&column.name), column.sql_type.clone())),
        );

        template
            .render(context! {
                recreate => recreate,
                schema_name => target.quoted_schema(),
                table_name => target.quoted_table(),
                columns => column_map,
            })
            .with_context(|| format!("Unable to render DDL template {}", self.template_name))
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use super::{DEFAULT_DDL_FILENAME, DdlTemplate};
    use crate::domain::{
        identifier::QualifiedTable,
        target_columns::{TargetColumn, TargetColumns},
    };

    fn bundled_template_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates")
    }

    fn target() -> QualifiedTable {
        QualifiedTable::new("mock_redshift", "mock_svv_table_info").expect("target should be valid")
    }

    #[test]
    fn renders_create_only_when_not_recreating() {
        let template = DdlTemplate::load(&bundled_template_dir(), DEFAULT_DDL_FILENAME)
            .expect("bundled template should load");
        let columns = TargetColumns::new(vec![
            TargetColumn {
                name: "mock_id".to_string(),
                sql_type: "BIGINT".to_string(),
            },
            TargetColumn {
                name: "table".to_string(),
                sql_type: "VARCHAR(255)".to_string(),
            },
        ])
        .expect("columns should be valid");

        let ddl = template
            .render(false, &target(), &columns)
            .expect("ddl should render");

        assert!(!ddl.contains("DROP TABLE"));
        assert!(ddl.contains("CREATE SCHEMA IF NOT EXISTS \"mock_redshift\";"));
        assert!(ddl.contains(
            "CREATE TABLE IF NOT EXISTS \"mock_redshift\".\"mock_svv_table_info\" ("
        ));
        let mock_id_at = ddl.find("\"mock_id\" BIGINT,").expect("mock_id column rendered");
        let table_at = ddl.find("\"table\" VARCHAR(255)\n").expect("table column rendered");
        assert!(mock_id_at < table_at);
        assert!(ddl.trim_end().ends_with(");"));
    }

    #[test]
    fn renders_drop_before_create_when_recreating() {
        let template = DdlTemplate::load(&bundled_template_dir(), DEFAULT_DDL_FILENAME)
            .expect("bundled template should load");

        let ddl = template
            .render(true, &target(), &TargetColumns::default())
            .expect("ddl should render");

        let drop_at = ddl
            .find("DROP TABLE IF EXISTS \"mock_redshift\".\"mock_svv_table_info\";")
            .expect("drop statement rendered");
        let create_at = ddl.find("CREATE TABLE").expect("create statement rendered");
        assert!(drop_at < create_at);
        assert!(ddl.contains("\"mock_created_at\" TIMESTAMP WITHOUT TIME ZONE"));
    }

    #[test]
    fn missing_template_is_an_error() {
        let scratch = tempfile::tempdir().expect("temp dir should be created");
        fs::write(scratch.path().join("other.jinja"), "SELECT 1;").expect("file should be written");

        let error = DdlTemplate::load(scratch.path(), "missing.jinja")
            .err()
            .expect("missing template should be rejected");
        assert!(error.to_string().contains("Unable to load DDL template missing.jinja"));
    }
}
