use std::{
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

/// Writes one mock id per line to a new file that outlives the process and
/// returns its absolute path.
pub fn write_mock_id_file(output_dir: Option<&Path>, mock_ids: &[i64]) -> Result<PathBuf> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("mock_ids_").suffix(".txt");
    let temp_file = match output_dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }
    .context("Unable to create mock id file")?;

    let (file, path) = temp_file
        .keep()
        .context("Unable to persist mock id file")?;
    let mut writer = BufWriter::new(file);
    for mock_id in mock_ids {
        writeln!(writer, "{mock_id}")?;
    }
    writer
        .flush()
        .with_context(|| format!("Unable to write mock id file {}", path.display()))?;

    Ok(std::path::absolute(&path).unwrap_or(path))
}
