use anyhow::Result;
use console::style;
use tracing::{info, warn};

use crate::{
    application::{
        commands::{SelectNewMocksCommand, SelectNewMocksOutcome},
        ports::MockBatchSource,
    },
    domain::mock_batch::select_new_mock_ids,
    infrastructure::mock_id_file::write_mock_id_file,
};

#[derive(Debug, Default)]
pub struct SelectNewMocksUseCase;

impl SelectNewMocksUseCase {
    /// Informational lines go to stderr; stdout is left to the caller for the
    /// output file path.
    pub fn execute(
        &self,
        command: SelectNewMocksCommand,
        source: &mut impl MockBatchSource,
    ) -> Result<SelectNewMocksOutcome> {
        let reference = if source.table_exists(&command.source)? {
            match source.max_last_analyzed_at(&command.source)? {
                Some(max_analyzed_at) => {
                    eprintln!("Max analyzed at: {max_analyzed_at}");
                    Some(max_analyzed_at)
                }
                None => {
                    eprintln!(
                        "{}",
                        style(format!("No data found in {}.", command.source)).yellow()
                    );
                    return Ok(SelectNewMocksOutcome::NoReferenceData);
                }
            }
        } else {
            eprintln!(
                "{}",
                style(format!(
                    "{} does not exist. Returning all mock IDs.",
                    command.source
                ))
                .yellow()
            );
            None
        };

        let batches = source.mock_batches(&command.target)?;
        info!(batch_count = batches.len(), ?reference, "read mock batches");
        let mock_ids = select_new_mock_ids(batches, reference);

        if mock_ids.is_empty() {
            warn!(target_table = %command.target, "no mock batch newer than reference");
            eprintln!("{}", style("No new mocks found.").yellow());
            return Ok(SelectNewMocksOutcome::NoNewMocks);
        }

        let output_path = write_mock_id_file(command.output_dir.as_deref(), &mock_ids)?;
        Ok(SelectNewMocksOutcome::Written {
            output_path,
            mock_ids,
        })
    }
}
