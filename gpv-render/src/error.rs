use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// The document lacks the date or data needed to draw the table.
    #[error("document is missing required fields: {0}")]
    MissingRequiredFields(String),

    #[error(transparent)]
    Schedule(#[from] gpv_core::ScheduleError),

    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),
}
