//! Wall-clock phase timer

use crate::core::Result;
use std::time::Instant;

/// Run `op`, logging a start marker and the elapsed wall-clock time.
///
/// The elapsed duration is logged from a drop guard, so it appears whether
/// `op` succeeds, fails, or panics; `op`'s result is returned unchanged.
pub fn measure<T, F>(label: &str, op: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    log::info!("--- benchmarking {} ---", label);
    let _guard = ElapsedGuard {
        label,
        start: Instant::now(),
    };
    op()
}

struct ElapsedGuard<'a> {
    label: &'a str,
    start: Instant,
}

impl Drop for ElapsedGuard<'_> {
    fn drop(&mut self) {
        log::info!("--- {}: {:?} ---", self.label, self.start.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StressError;

    #[test]
    fn test_measure_returns_value() {
        let result = measure("ok", || Ok(42));
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn test_measure_propagates_error_unchanged() {
        let result: Result<()> = measure("failing", || Err(StressError::other("boom")));
        match result {
            Err(StressError::Other(msg)) => assert_eq!(msg, "boom"),
            other => panic!("expected Other error, got {:?}", other),
        }
    }

    #[test]
    fn test_measure_logs_elapsed_on_panic() {
        // The guard must not double-panic while unwinding.
        let result = std::panic::catch_unwind(|| {
            let _: Result<()> = measure("panicking", || panic!("inner"));
        });
        assert!(result.is_err());
    }
}
