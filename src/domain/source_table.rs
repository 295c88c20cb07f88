use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

/// Identity of one table a mock catalog row is fabricated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTable {
    pub database: String,
    pub schema: String,
    pub table: String,
}

impl SourceTable {
    pub fn new(
        database: impl Into<String>,
        schema: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            schema: schema.into(),
            table: table.into(),
        }
    }

    /// Stable hash of the identity triple. Separators keep `("ab", "c")` and
    /// `("a", "bc")` apart.
    pub fn identity_hash(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        for part in [&self.database, &self.schema, &self.table] {
            hasher.update(part.as_bytes());
            hasher.update(&[0]);
        }
        hasher.finalize()
    }

    pub fn from_triples(values: &[String]) -> Result<Vec<Self>> {
        if values.len() % 3 != 0 {
            return Err(anyhow!(
                "Source tables must be given as DATABASE SCHEMA TABLE triples"
            ));
        }
        Ok(values
            .chunks_exact(3)
            .map(|triple| Self::new(&triple[0], &triple[1], &triple[2]))
            .collect())
    }
}

impl std::fmt::Display for SourceTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.database, self.schema, self.table)
    }
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    #[serde(default)]
    database: Option<String>,
    #[serde(default)]
    schema: Option<String>,
    #[serde(default)]
    table: Option<String>,
}

/// Parses the source table manifest: a JSON array of
/// `{"database", "schema", "table"}` objects. Entries with a missing or empty
/// field are skipped.
pub fn parse_manifest(raw_json: &str) -> Result<Vec<SourceTable>> {
    let entries: Vec<ManifestEntry> =
        serde_json::from_str(raw_json).context("Source table manifest is not valid JSON")?;

    Ok(entries
        .into_iter()
        .filter_map(|entry| match (entry.database, entry.schema, entry.table) {
            (Some(database), Some(schema), Some(table))
                if !database.is_empty() && !schema.is_empty() && !table.is_empty() =>
            {
                Some(SourceTable::new(database, schema, table))
            }
            _ => None,
        })
        .collect())
}
