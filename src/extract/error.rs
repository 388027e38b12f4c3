use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;

#[derive(Debug)]
pub enum ExtractError {
    Io(io::Error),
    Arrow(ArrowError),
    AlreadyExists(PathBuf),
    Table(String),
    Column { index: usize, msg: String },
    RowLength { expected: usize, actual: usize },
    Closed,
}

impl ExtractError {
    pub fn table(msg: &str) -> ExtractError {
        ExtractError::Table(msg.to_string())
    }

    pub fn column(index: usize, msg: &str) -> ExtractError {
        ExtractError::Column {
            index,
            msg: msg.to_string(),
        }
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExtractError::Io(e) => write!(f, "Extract I/O error: {}", e),
            ExtractError::Arrow(e) => write!(f, "Extract encoding error: {}", e),
            ExtractError::AlreadyExists(p) => {
                write!(f, "Extract file already exists: {}", p.display())
            }
            ExtractError::Table(msg) => write!(f, "Extract table error: {}", msg),
            ExtractError::Column { index, msg } => {
                write!(f, "Extract column {} error: {}", index, msg)
            }
            ExtractError::RowLength { expected, actual } => write!(
                f,
                "Row has {} values but the table has {} columns",
                actual, expected
            ),
            ExtractError::Closed => write!(f, "Extract is already closed"),
        }
    }
}

impl Error for ExtractError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ExtractError::Io(e) => Some(e),
            ExtractError::Arrow(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ExtractError {
    fn from(e: io::Error) -> Self {
        ExtractError::Io(e)
    }
}

impl From<ArrowError> for ExtractError {
    fn from(e: ArrowError) -> Self {
        ExtractError::Arrow(e)
    }
}
