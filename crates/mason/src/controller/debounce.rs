use std::time::Duration;

/// Trailing-edge debouncer on a caller-supplied clock.
///
/// Every [`trigger`](Self::trigger) replaces the stored value and pushes the
/// deadline back by the window. [`poll`](Self::poll) yields the last value
/// once the deadline has passed.
#[derive(Debug, Clone)]
pub(crate) struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Duration)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn trigger(&mut self, value: T, now: Duration) {
        self.pending = Some((value, now.saturating_add(self.window)));
    }

    pub fn poll(&mut self, now: Duration) -> Option<T> {
        match self.pending.take() {
            Some((value, deadline)) if now >= deadline => Some(value),
            other => {
                self.pending = other;
                None
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
