use crate::Error;

/// Outcome of loading one batch of records.
#[derive(Debug, Default)]
pub struct LoadSummary {
    /// Records handed to the load.
    pub attempted: usize,
    /// Records that were inserted.
    pub inserted: usize,
    /// One entry per record that was not inserted.
    pub failures: Vec<Error>,
    /// Flattened keys with no column in the table, in first-seen order.
    ///
    /// Records reaching past a cycle or the depth limit of the derivation
    /// produce these; their values are not stored.
    pub dropped: Vec<String>,
}

impl LoadSummary {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
