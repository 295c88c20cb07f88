use chrono::NaiveDateTime;

/// Rows of one generator run, collapsed to their shared `mock_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBatch {
    pub mock_id: i64,
    pub first_created_at: NaiveDateTime,
}

/// Returns the ids of batches first inserted strictly after `reference`,
/// ordered by that first insertion. Without a reference every batch is new.
pub fn select_new_mock_ids(
    mut batches: Vec<MockBatch>,
    reference: Option<NaiveDateTime>,
) -> Vec<i64> {
    if let Some(reference) = reference {
        batches.retain(|batch| batch.first_created_at > reference);
    }
    batches.sort_by_key(|batch| (batch.first_created_at, batch.mock_id));
    batches.into_iter().map(|batch| batch.mock_id).collect()
}
