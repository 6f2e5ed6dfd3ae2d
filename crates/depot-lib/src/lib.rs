pub mod config;
pub mod error;
pub mod models;
pub mod utils;
pub mod versions;

// Re-export commonly used types
pub use config::StoreConfig;
pub use error::{FetchKind, Result, StoreError, TransportError};
pub use models::{FileInfo, FullVersionId};
pub use versions::{FetchListener, Prefix, SilentFetchListener, VersionsManager};
