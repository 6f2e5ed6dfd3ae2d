#![allow(dead_code)]

use depot_lib::utils::{HttpTransport, LibraryPlatform, Transport};
use depot_lib::models::LibraryInfo;
use depot_lib::{FetchListener, StoreConfig, TransportError, VersionsManager};
use futures::future::BoxFuture;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;

/// Records every terminal signal it receives
#[derive(Default)]
pub struct RecordingListener {
    pub prefixes: Mutex<Vec<bool>>,
    pub version_indexes: Mutex<Vec<bool>>,
}

impl FetchListener for RecordingListener {
    fn on_fetch_prefixes_result(&self, success: bool) {
        self.prefixes.lock().unwrap().push(success);
    }

    fn on_fetch_version_indexes_result(&self, success: bool) {
        self.version_indexes.lock().unwrap().push(success);
    }
}

/// Allows every library and uses its name as the storage path
pub struct NamePlatform;

impl LibraryPlatform for NamePlatform {
    fn is_library_allowed(&self, _library: &LibraryInfo) -> bool {
        true
    }

    fn library_path(&self, library: &LibraryInfo) -> String {
        library.name.clone()
    }
}

/// Holds every request until a permit is added, then forwards to HTTP
pub struct GatedTransport {
    pub inner: HttpTransport,
    pub release: Arc<Semaphore>,
}

impl GatedTransport {
    pub fn new() -> (Self, Arc<Semaphore>) {
        let release = Arc::new(Semaphore::new(0));
        let transport = Self {
            inner: http(),
            release: release.clone(),
        };
        (transport, release)
    }
}

impl Transport for GatedTransport {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, TransportError>> {
        Box::pin(async move {
            let _permit = self
                .release
                .acquire()
                .await
                .map_err(|_| TransportError::Timeout)?;
            self.inner.get(url).await
        })
    }
}

pub fn http() -> HttpTransport {
    HttpTransport::new(Duration::from_secs(5)).unwrap()
}

pub async fn manager(
    store_url: &str,
    data_dir: &Path,
    transport: Arc<dyn Transport>,
    listener: Arc<RecordingListener>,
) -> VersionsManager {
    let _ = env_logger::builder().is_test(true).try_init();

    VersionsManager::new(
        StoreConfig::new(store_url, data_dir),
        transport,
        Arc::new(NamePlatform),
        listener,
    )
    .await
    .unwrap()
}

pub fn write_json(path: &Path, value: serde_json::Value) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, serde_json::to_vec_pretty(&value).unwrap()).unwrap();
}
