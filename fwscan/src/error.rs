//! Three error kinds, exit codes, and nothing else — usage mistakes, I/O
//! failures, and database defects are the only ways this tool gives up.

use failure::Fail;

#[derive(Debug, Fail)]
pub enum AppError {
    #[fail(display = "usage error: {}", _0)]
    Usage(String),

    #[fail(display = "I/O error reading {:?}: {}", path, source)]
    Io {
        path: String,
        #[fail(cause)]
        source: std::io::Error,
    },

    #[fail(display = "database defect: {}", _0)]
    Database(#[fail(cause)] magic::DatabaseError),
}

impl AppError {
    /// The process exit code for this error. A clean run exits 0 (even when
    /// nothing was found); any of the three error kinds exits 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Usage(_) | AppError::Io { .. } | AppError::Database(_) => 1,
        }
    }
}
