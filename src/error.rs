use std::{fmt, io, path::PathBuf};

#[derive(Debug)]
pub enum AppError {
    Io(io::Error),
    Json(serde_json::Error),
    Parse { file: PathBuf, error: syn::Error },
    Walk(walkdir::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Io(err) => write!(f, "I/O error: {err}"),
            AppError::Json(err) => write!(f, "JSON error: {err}"),
            AppError::Parse { file, error } => {
                write!(f, "failed to parse {}: {}", file.display(), error)
            }
            AppError::Walk(err) => write!(f, "failed to walk source tree: {err}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err)
    }
}

impl From<walkdir::Error> for AppError {
    fn from(err: walkdir::Error) -> Self {
        AppError::Walk(err)
    }
}
