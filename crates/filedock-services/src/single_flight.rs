//! Single-flight guard
//!
//! A boolean admission gate preventing two invocations of the same
//! operation kind from overlapping. Acquisition hands back an RAII permit,
//! so the flag is released on every exit path, panics and early returns
//! included. Archive building and upload validation each own an
//! independent guard.

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct SingleFlight {
    busy: AtomicBool,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to admit one invocation. Returns `None` while a permit is live.
    pub fn try_acquire(&self) -> Option<SingleFlightPermit<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| SingleFlightPermit { flag: &self.busy })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Live admission for one invocation; dropping it reopens the guard.
#[derive(Debug)]
pub struct SingleFlightPermit<'a> {
    flag: &'a AtomicBool,
}

impl Drop for SingleFlightPermit<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_is_refused_while_held() {
        let guard = SingleFlight::new();
        let permit = guard.try_acquire();
        assert!(permit.is_some());
        assert!(guard.is_busy());
        assert!(guard.try_acquire().is_none());
        drop(permit);
        assert!(!guard.is_busy());
        assert!(guard.try_acquire().is_some());
    }

    #[test]
    fn test_permit_releases_on_early_exit() {
        let guard = SingleFlight::new();

        fn bails_early(guard: &SingleFlight) -> Result<(), ()> {
            let _permit = guard.try_acquire().ok_or(())?;
            Err(())
        }

        let _ = bails_early(&guard);
        assert!(!guard.is_busy());
    }

    #[test]
    fn test_guards_are_independent() {
        let archive = SingleFlight::new();
        let upload = SingleFlight::new();
        let _a = archive.try_acquire().unwrap();
        assert!(upload.try_acquire().is_some());
    }
}
