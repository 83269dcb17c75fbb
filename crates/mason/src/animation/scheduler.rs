//! Transition scheduler
//!
//! Requests made during one repack are collected as pending and started
//! together by [`TransitionScheduler::start_batch`]. The started transitions
//! form the active batch. When the last of them completes the scheduler
//! reports [`SchedulerEvent::Settled`], exactly once per batch.

use std::time::Duration;

use indexmap::IndexMap;
use log::{debug, trace};

use mason_core::{geometry::Point, identifier::ElementId};

use super::{
    ease::Ease,
    transition::{Transition, TransitionId},
};
use crate::host::ElementHost;

/// Positions closer than this are treated as equal.
pub const POSITION_TOLERANCE: f32 = 1.0;

/// Outcome of [`TransitionScheduler::request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The element already is, or is already heading, at the target.
    Skipped,
    /// The position was written to the host immediately.
    Applied,
    /// A transition was queued and starts with the next batch.
    Queued(TransitionId),
}

impl RequestOutcome {
    /// Whether the request moves the element.
    pub fn is_move(self) -> bool {
        !matches!(self, Self::Skipped)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerEvent {
    Completed {
        element: ElementId,
        transition: TransitionId,
    },
    /// The active batch became empty.
    Settled,
}

/// Owns every in-flight transition, at most one per element.
#[derive(Debug, Default)]
pub struct TransitionScheduler {
    pending: IndexMap<ElementId, Transition>,
    active: IndexMap<ElementId, Transition>,
    next_id: u64,
    events: Vec<SchedulerEvent>,
}

impl TransitionScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while no started transition is in flight.
    pub fn is_settled(&self) -> bool {
        self.active.is_empty()
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// The started transition currently driving `element`, if any.
    pub fn active(&self, element: ElementId) -> Option<&Transition> {
        self.active.get(&element)
    }

    /// Request that `element` moves to `target`.
    ///
    /// A zero `duration` writes the target to the host at once and cancels
    /// whatever transition the element had. Otherwise the request is kept as
    /// pending until [`start_batch`](Self::start_batch), replacing any earlier
    /// pending request for the same element.
    pub fn request<H>(
        &mut self,
        host: &mut H,
        element: ElementId,
        target: Point,
        duration: Duration,
        ease: Ease,
    ) -> RequestOutcome
    where
        H: ElementHost + ?Sized,
    {
        let current = host.position(element);
        let heading = self
            .pending
            .get(&element)
            .or_else(|| self.active.get(&element))
            .map(Transition::to);

        let already_there = match heading {
            Some(to) => to.approx_eq(target, POSITION_TOLERANCE),
            None => current.approx_eq(target, POSITION_TOLERANCE),
        };
        if already_there {
            return RequestOutcome::Skipped;
        }

        if duration.is_zero() {
            self.pending.shift_remove(&element);
            let cancelled = self.active.shift_remove(&element);
            host.set_position(element, target);

            if let Some(cancelled) = cancelled {
                debug!(element:% = element, transition:% = cancelled.id(); "Transition cancelled");
                if self.active.is_empty() {
                    self.events.push(SchedulerEvent::Settled);
                }
            }
            return RequestOutcome::Applied;
        }

        let id = self.issue_id();
        let transition = Transition::new(id, element, current, target, duration, ease);
        self.pending.insert(element, transition);
        trace!(element:% = element, transition:% = id; "Transition queued");

        RequestOutcome::Queued(id)
    }

    /// Start every pending transition.
    ///
    /// Each one begins from the element's live position at this moment. A
    /// transition already running for the same element is superseded and
    /// will never report completion.
    pub fn start_batch<H>(&mut self, host: &H) -> usize
    where
        H: ElementHost + ?Sized,
    {
        let started = self.pending.len();

        for (element, mut transition) in self.pending.drain(..) {
            transition.restart_from(host.position(element));
            if let Some(previous) = self.active.insert(element, transition) {
                debug!(
                    element:% = element,
                    transition:% = previous.id();
                    "Transition superseded"
                );
            }
        }

        if started > 0 {
            debug!(started = started, active = self.active.len(); "Batch started");
        }
        started
    }

    /// Advance every active transition by `dt` and write the interpolated
    /// positions to the host.
    pub fn tick<H>(&mut self, host: &mut H, dt: Duration)
    where
        H: ElementHost + ?Sized,
    {
        if self.active.is_empty() {
            return;
        }

        let mut finished = Vec::new();
        for (&element, transition) in self.active.iter_mut() {
            transition.advance(dt);
            host.set_position(element, transition.position());
            if transition.is_finished() {
                finished.push(element);
            }
        }

        for element in finished {
            if let Some(transition) = self.active.shift_remove(&element) {
                self.finish(transition);
            }
        }
    }

    /// Complete the transition `id` immediately, snapping its element to the
    /// target.
    ///
    /// Returns `false` for ids that are no longer active, such as
    /// superseded or already completed transitions.
    pub fn complete<H>(&mut self, host: &mut H, id: TransitionId) -> bool
    where
        H: ElementHost + ?Sized,
    {
        let Some(element) = self
            .active
            .values()
            .find(|transition| transition.id() == id)
            .map(Transition::element)
        else {
            debug!(transition:% = id; "Ignoring completion of stale transition");
            return false;
        };

        let Some(transition) = self.active.shift_remove(&element) else {
            return false;
        };
        host.set_position(element, transition.to());
        self.finish(transition);
        true
    }

    /// Take the events produced since the last call.
    pub fn take_events(&mut self) -> Vec<SchedulerEvent> {
        std::mem::take(&mut self.events)
    }

    fn finish(&mut self, transition: Transition) {
        trace!(element:% = transition.element(), transition:% = transition.id(); "Transition completed");
        self.events.push(SchedulerEvent::Completed {
            element: transition.element(),
            transition: transition.id(),
        });
        if self.active.is_empty() {
            debug!("Batch settled");
            self.events.push(SchedulerEvent::Settled);
        }
    }

    fn issue_id(&mut self) -> TransitionId {
        self.next_id += 1;
        TransitionId::new(self.next_id)
    }
}
