//! Error taxonomy shared by the schedule pipeline.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScheduleError>;

#[derive(Debug, Error)]
pub enum ScheduleError {
    /// No source document or page text could be obtained.
    #[error("input missing: {0}")]
    InputMissing(String),

    /// Required keys are absent or carry the wrong type.
    #[error("malformed schedule document: {0}")]
    MalformedDocument(String),

    #[error("document has no dates in fact.data")]
    EmptyDateSet,

    #[error("date key '{0}' is not a timestamp and no fact.today fallback is available")]
    InvalidDateKey(String),

    /// Soft failure: segmentation produced zero groups for every date.
    #[error("no schedules found in the announcement text")]
    NoSchedulesFound,
}

impl ScheduleError {
    /// Whether the error leaves the previously persisted document authoritative
    /// instead of aborting the run.
    pub fn is_soft(&self) -> bool {
        matches!(self, ScheduleError::NoSchedulesFound)
    }
}

impl From<serde_json::Error> for ScheduleError {
    fn from(err: serde_json::Error) -> Self {
        ScheduleError::MalformedDocument(err.to_string())
    }
}
