use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Io(std::io::Error),
    DirectoryNotFound(String),
    BadRequest,
    MethodNotAllowed,
    InternalServerError(String),
}

impl AppError {
    /// Status line for the HTTP response this error maps to.
    pub fn status(&self) -> (u16, &'static str) {
        match self {
            AppError::BadRequest => (400, "Bad Request"),
            AppError::MethodNotAllowed => (405, "Method Not Allowed"),
            _ => (500, "Internal Server Error"),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Io(err) => write!(f, "IO error: {err}"),
            AppError::DirectoryNotFound(path) => write!(f, "Directory not found: {path}"),
            AppError::BadRequest => write!(f, "Bad request"),
            AppError::MethodNotAllowed => write!(f, "Method not allowed"),
            AppError::InternalServerError(msg) => write!(f, "Internal server error: {msg}"),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl std::error::Error for AppError {}
