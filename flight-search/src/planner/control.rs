//! Cooperative cancellation of a running search.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use super::search::SearchError;

/// Stop conditions polled between sweep steps.
///
/// The default control never stops the search.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchControl<'a> {
    stop_flag: Option<&'a AtomicBool>,
    deadline: Option<Instant>,
}

impl<'a> SearchControl<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort once `flag` is set.
    pub fn with_stop_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.stop_flag = Some(flag);
        self
    }

    /// Abort once `deadline` has passed.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns an error if the search should stop.
    pub fn check(&self) -> Result<(), SearchError> {
        if self.stop_flag.is_some_and(|f| f.load(Ordering::Relaxed)) {
            return Err(SearchError::Interrupted);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(SearchError::Timeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn default_never_stops() {
        assert_eq!(SearchControl::new().check(), Ok(()));
    }

    #[test]
    fn stop_flag_interrupts() {
        let flag = AtomicBool::new(false);
        let control = SearchControl::new().with_stop_flag(&flag);
        assert_eq!(control.check(), Ok(()));

        flag.store(true, Ordering::Relaxed);
        assert_eq!(control.check(), Err(SearchError::Interrupted));
    }

    #[test]
    fn passed_deadline_times_out() {
        let control = SearchControl::new().with_deadline(Instant::now());
        assert_eq!(control.check(), Err(SearchError::Timeout));

        let later = SearchControl::new().with_deadline(Instant::now() + Duration::from_secs(3600));
        assert_eq!(later.check(), Ok(()));
    }

    #[test]
    fn interrupt_wins_over_timeout() {
        let flag = AtomicBool::new(true);
        let control = SearchControl::new()
            .with_stop_flag(&flag)
            .with_deadline(Instant::now());
        assert_eq!(control.check(), Err(SearchError::Interrupted));
    }
}
