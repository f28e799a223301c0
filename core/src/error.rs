pub type Result<T> = std::result::Result<T, GradeError>;

#[derive(Debug, thiserror::Error)]
pub enum GradeError {
    #[error("Problem not found: '{0}'")]
    ProblemNotFound(String),

    #[error(transparent)]
    Storage(#[from] fsutil::Error),
}
