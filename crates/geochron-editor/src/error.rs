use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum EditorError {
    #[error("not in edit mode")]
    NotEditing,
    #[error("already in edit mode")]
    AlreadyEditing,
    #[error("a drag is already in progress")]
    DragInProgress,
    #[error("no drag in progress")]
    NoDrag,
    #[error("no handle at region {region}, index {index}")]
    UnknownHandle { region: usize, index: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snap threshold must be positive (got {0})")]
    SnapThreshold(f64),
    #[error("default square half-size must be positive (got {0})")]
    SquareHalf(f64),
    #[error("image width must be positive (got {0})")]
    ImageWidth(u32),
}
