use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("Page {page} is bigger than the number of pages {pages}.")]
    OutOfRange { page: usize, pages: usize },

    #[error("Invalid value {value} for '{name}', it must be at least 1.")]
    InvalidConfig { name: &'static str, value: usize },

    #[error("Invalid value {value:?} for '{name}', expected an integer.")]
    InvalidNumber { name: String, value: String },

    #[error("Pagination parameters must be an object, got {found}.")]
    NotAnObject { found: &'static str },

    #[error("Unknown pagination parameter '{name}'.")]
    UnknownParameter { name: String },
}

pub type Result<T> = std::result::Result<T, PaginationError>;
