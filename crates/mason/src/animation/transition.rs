use std::{fmt, time::Duration};

use mason_core::{geometry::Point, identifier::ElementId};

use super::ease::Ease;

/// Identity of a single transition request.
///
/// A new id is issued for every request, so a completion reported for a
/// superseded transition can be told apart from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionId(u64);

impl TransitionId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A timed move of one element from `from` to `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    id: TransitionId,
    element: ElementId,
    from: Point,
    to: Point,
    duration: Duration,
    elapsed: Duration,
    ease: Ease,
}

impl Transition {
    pub(crate) fn new(
        id: TransitionId,
        element: ElementId,
        from: Point,
        to: Point,
        duration: Duration,
        ease: Ease,
    ) -> Self {
        Self {
            id,
            element,
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            ease,
        }
    }

    pub fn id(&self) -> TransitionId {
        self.id
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn from(&self) -> Point {
        self.from
    }

    pub fn to(&self) -> Point {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Interpolated position at the current progress.
    pub fn position(&self) -> Point {
        let progress = self.progress();
        if progress >= 1.0 {
            return self.to;
        }
        self.from.lerp(self.to, self.ease.apply(progress))
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub(crate) fn restart_from(&mut self, from: Point) {
        self.from = from;
        self.elapsed = Duration::ZERO;
    }

    pub(crate) fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }
}
