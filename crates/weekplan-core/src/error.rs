use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("client not found: {0}")]
    ClientNotFound(String),

    #[error("label not found: {0}")]
    LabelNotFound(String),

    #[error("invalid week {week} for ISO year {year}")]
    InvalidWeek { year: i32, week: u32 },

    #[error("invalid week key '{0}': expected YYYY-WW")]
    InvalidWeekKey(String),

    #[error("invalid category '{0}': expected 'content' or 'music'")]
    InvalidCategory(String),

    #[error("document store unavailable: {0}")]
    StoreUnavailable(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
