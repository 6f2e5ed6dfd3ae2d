/// Receives the terminal signal of each fetch sequence.
/// Fired exactly once per accepted call, after the manager is idle again.
pub trait FetchListener: Send + Sync {
    fn on_fetch_prefixes_result(&self, success: bool);

    fn on_fetch_version_indexes_result(&self, success: bool);
}

/// A listener that does nothing (silent).
/// Useful when callers only await the returned result.
pub struct SilentFetchListener;

impl FetchListener for SilentFetchListener {
    fn on_fetch_prefixes_result(&self, _success: bool) {}
    fn on_fetch_version_indexes_result(&self, _success: bool) {}
}
