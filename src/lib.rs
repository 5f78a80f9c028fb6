//! Page, block and row arithmetic for paged listings and limit/offset queries.

pub mod config;
pub mod deprecation;
pub mod error;
pub mod legacy;
pub mod paged;
pub mod paginator;
pub mod utils;

pub use config::PaginatorConfig;
pub use deprecation::{Deprecation, DeprecationSink, LogSink, RecordingSink, SilentSink};
pub use error::PaginationError;
pub use legacy::Legacy;
pub use paged::PagedData;
pub use paginator::{page_first_row, Offset, Offsets, Paginator};
