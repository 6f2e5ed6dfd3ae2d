pub mod fetcher;
pub mod gate;
pub mod layout;
pub mod listener;
pub mod manager;
pub mod registry;
pub mod resolver;

pub use gate::{FetchGate, FetchPermit};
pub use listener::{FetchListener, SilentFetchListener};
pub use manager::VersionsManager;
pub use registry::{Prefix, VersionRegistry};
pub use resolver::resolve_download_manifest;
