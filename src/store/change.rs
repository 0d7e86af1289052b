/// What happened to the backing file after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    /// The full document was written.
    Saved,
    /// The write failed. The in-memory change stays applied and may be lost
    /// on the next load.
    Failed,
    /// Nothing changed, so nothing was written.
    Skipped,
}

/// The result of a store mutation together with its save status.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change<T> {
    pub value: T,
    pub status: SaveStatus,
}

impl<T> Change<T> {
    pub(crate) fn skipped(value: T) -> Self {
        Self {
            value,
            status: SaveStatus::Skipped,
        }
    }

    pub fn save_failed(&self) -> bool {
        self.status == SaveStatus::Failed
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
