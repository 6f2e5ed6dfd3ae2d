pub mod http;
pub mod platform;
pub mod storage;

pub use http::{HttpTransport, Transport};
pub use platform::{Arch, HostPlatform, LibraryPlatform, OsType};
