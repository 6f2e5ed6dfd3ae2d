use std::sync::atomic::{AtomicBool, Ordering};

/// Idle/busy guard for one kind of fetch sequence.
/// Never blocks: a second caller is rejected and has to retry later.
#[derive(Debug, Default)]
pub struct FetchGate {
    busy: AtomicBool,
}

/// Held for the duration of a fetch; returns the gate to idle when dropped
#[must_use = "the gate is released as soon as the permit is dropped"]
#[derive(Debug)]
pub struct FetchPermit<'a> {
    gate: &'a FetchGate,
}

impl FetchGate {
    pub const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    pub fn try_start(&self) -> Option<FetchPermit<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FetchPermit { gate: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for FetchPermit<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}
