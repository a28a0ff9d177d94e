//! Bounded wait di atas condition variable
//!
//! Predicate selalu dievaluasi ulang di bawah lock setiap kali bangun,
//! jadi spurious wakeup maupun wakeup basi aman.

use std::time::{Duration, Instant};

use parking_lot::{Condvar, MutexGuard};

use super::RingError;

/// Timeout default untuk writer yang menunggu space dan reader yang menunggu data
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(1);

/// Kebijakan blocking untuk `write` dan `read`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    timeout: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }
}

impl WaitPolicy {
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    #[inline(always)]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Tunggu selama `blocked(state)` true.
    ///
    /// Returns `Err(RingError::Timeout)` jika deadline lewat dan kondisi
    /// masih terblokir. Guard tetap dipegang saat return, apa pun hasilnya.
    pub(crate) fn wait_while<T, F>(
        &self,
        signal: &Condvar,
        guard: &mut MutexGuard<'_, T>,
        mut blocked: F,
    ) -> Result<(), RingError>
    where
        F: FnMut(&T) -> bool,
    {
        let deadline = Instant::now() + self.timeout;
        while blocked(&**guard) {
            if signal.wait_until(guard, deadline).timed_out() {
                if blocked(&**guard) {
                    return Err(RingError::Timeout(self.timeout));
                }
                break;
            }
        }
        Ok(())
    }
}
