use std::{fs, path::Path};

use anyhow::{Context, Result};

use crate::domain::source_table::{SourceTable, parse_manifest};

pub const DEFAULT_MANIFEST_PATH: &str = "/app/scripts/source_tables.json";

pub fn read_source_tables(path: &Path) -> Result<Vec<SourceTable>> {
    let raw_json = fs::read_to_string(path)
        .with_context(|| format!("Unable to read source table manifest {}", path.display()))?;
    parse_manifest(&raw_json)
        .with_context(|| format!("Invalid source table manifest {}", path.display()))
}
