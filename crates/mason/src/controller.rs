//! Layout controller
//!
//! [`LayoutController`] owns the ordered element list and decides when to
//! repack. Triggers that arrive while a transition batch is in flight are
//! deferred and replayed once, after the batch settles.
//!
//! Time is supplied by the host through [`LayoutController::tick`]; the
//! controller keeps no wall clock of its own.

mod debounce;

use std::{cmp::Ordering, fmt, time::Duration};

use indexmap::IndexSet;
use log::{debug, info, trace, warn};

use mason_core::{geometry::Size, identifier::ElementId};

use crate::{
    animation::{SchedulerEvent, Transition, TransitionId, TransitionScheduler},
    config::{AnimationConfig, LayoutConfig},
    error::{InvalidChildReason, LayoutError},
    host::ElementHost,
    layout::{Packer, Plan, Skyline},
};

use debounce::Debouncer;

/// Notification produced by the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutEvent {
    /// A repack produced new targets. `moved` counts elements whose target
    /// differs from where they are.
    Repacked { height: f32, moved: usize },
    /// An element reached its target.
    TransitionCompleted {
        element: ElementId,
        transition: TransitionId,
    },
    /// The last transition of a batch completed.
    Settled,
}

type Comparator = Box<dyn FnMut(&ElementId, &ElementId) -> Ordering>;

/// A list mutation held back until the running batch settles.
enum PendingChange {
    Add(Vec<ElementId>),
    Remove(Vec<ElementId>),
    Reorder(Comparator),
    Reverse,
}

impl fmt::Debug for PendingChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add(ids) => f.debug_tuple("Add").field(ids).finish(),
            Self::Remove(ids) => f.debug_tuple("Remove").field(ids).finish(),
            Self::Reorder(_) => f.write_str("Reorder(..)"),
            Self::Reverse => f.write_str("Reverse"),
        }
    }
}

/// Drives packing and transitions for one container.
pub struct LayoutController<H: ElementHost> {
    host: H,
    config: LayoutConfig,
    packer: Packer,
    skyline: Skyline,
    scheduler: TransitionScheduler,
    elements: Vec<ElementId>,
    container_width: f32,
    content_height: f32,
    resize: Debouncer<f32>,
    clock: Duration,
    pending_changes: Vec<PendingChange>,
    repack_requested: bool,
    events: Vec<LayoutEvent>,
}

impl<H: ElementHost> LayoutController<H> {
    /// Create a controller for an empty container of zero width.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Config`] if `config` fails validation.
    pub fn new(host: H, config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;

        Ok(Self {
            host,
            packer: Packer::new().with_spacing(config.spacing()),
            skyline: Skyline::new(0.0),
            scheduler: TransitionScheduler::new(),
            elements: Vec::new(),
            container_width: 0.0,
            content_height: 0.0,
            resize: Debouncer::new(config.resize_debounce()),
            clock: Duration::ZERO,
            pending_changes: Vec::new(),
            repack_requested: false,
            events: Vec::new(),
            config,
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Elements in packing order.
    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.elements.contains(&element)
    }

    pub fn container_width(&self) -> f32 {
        self.container_width
    }

    /// Height reported by the last repack.
    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    /// True while no transition is in flight.
    pub fn is_settled(&self) -> bool {
        self.scheduler.is_settled()
    }

    /// Id of the transition currently moving `element`, if any.
    pub fn transition_of(&self, element: ElementId) -> Option<TransitionId> {
        self.scheduler.active(element).map(Transition::id)
    }

    /// True while a container resize waits for its debounce window.
    pub fn resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    /// True if a list change or repack is waiting for the batch to settle.
    pub fn has_deferred_work(&self) -> bool {
        self.repack_requested || !self.pending_changes.is_empty()
    }

    /// Add `added` and remove `removed` from the element list.
    ///
    /// Every added element is validated first; if any is refused nothing
    /// changes. While a batch is in flight the change is queued and applied
    /// after the batch settles.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidChild`] for an element that is already
    /// present, offered twice, or measured with a non-finite or negative size.
    pub fn elements_changed(
        &mut self,
        added: &[ElementId],
        removed: &[ElementId],
    ) -> Result<(), LayoutError> {
        self.validate_additions(added, removed)?;
        self.submit_changes(added, removed);
        Ok(())
    }

    /// Apply or defer an already validated membership change.
    fn submit_changes(&mut self, added: &[ElementId], removed: &[ElementId]) {
        let mut changes = Vec::with_capacity(2);
        if !removed.is_empty() {
            changes.push(PendingChange::Remove(removed.to_vec()));
        }
        if !added.is_empty() {
            changes.push(PendingChange::Add(added.to_vec()));
        }
        if changes.is_empty() {
            return;
        }

        if !self.scheduler.is_settled() {
            debug!(added = added.len(), removed = removed.len(); "Batch in flight, deferring element change");
            self.pending_changes.extend(changes);
            return;
        }

        let mut changed = false;
        for change in changes {
            changed |= self.apply_change(change);
        }
        if changed {
            self.repack();
        }
    }

    /// Append one element.
    ///
    /// # Errors
    ///
    /// See [`elements_changed`](Self::elements_changed).
    pub fn add(&mut self, element: ElementId) -> Result<(), LayoutError> {
        self.elements_changed(&[element], &[])
    }

    /// Append several elements, all or nothing.
    ///
    /// # Errors
    ///
    /// See [`elements_changed`](Self::elements_changed).
    pub fn add_all(&mut self, elements: &[ElementId]) -> Result<(), LayoutError> {
        self.elements_changed(elements, &[])
    }

    pub fn remove(&mut self, element: ElementId) {
        self.remove_all(&[element]);
    }

    pub fn remove_all(&mut self, elements: &[ElementId]) {
        self.submit_changes(&[], elements);
    }

    /// Remove every element for which `predicate` returns `true`.
    ///
    /// Elements queued for addition are considered as well.
    pub fn remove_where<F>(&mut self, mut predicate: F)
    where
        F: FnMut(ElementId) -> bool,
    {
        let matching: Vec<_> = self
            .prospective_elements()
            .into_iter()
            .filter(|&element| predicate(element))
            .collect();
        if !matching.is_empty() {
            self.remove_all(&matching);
        }
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        let all: Vec<_> = self.prospective_elements().into_iter().collect();
        if !all.is_empty() {
            self.remove_all(&all);
        }
    }

    /// Reorder the element list with a stable sort.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&ElementId, &ElementId) -> Ordering + 'static,
    {
        self.reorder(Box::new(compare));
    }

    pub fn sort_by_key<K, F>(&mut self, mut key: F)
    where
        K: Ord,
        F: FnMut(&ElementId) -> K + 'static,
    {
        self.sort_by(move |a, b| key(a).cmp(&key(b)));
    }

    /// Reverse the current order.
    pub fn reverse_order(&mut self) {
        if self.scheduler.is_settled() {
            self.elements.reverse();
            self.repack();
        } else {
            debug!("Batch in flight, deferring reverse");
            self.pending_changes.push(PendingChange::Reverse);
        }
    }

    /// Set the container width immediately, without debouncing.
    ///
    /// Meant for the initial measurement of the container.
    pub fn set_container_width(&mut self, width: f32) {
        self.container_width = sanitize_width(width);
        self.trigger("container width set");
    }

    /// Report a container resize. Bursts of resizes are collapsed into one
    /// repack with the last width once the debounce window has passed.
    pub fn container_resized(&mut self, width: f32) {
        trace!(width = width, at_ms = self.clock.as_millis(); "Container resized");
        self.resize.trigger(sanitize_width(width), self.clock);
    }

    /// Report that `element` was measured or changed size.
    pub fn element_resized(&mut self, element: ElementId) {
        if !self.contains(element) {
            debug!(element:% = element; "Ignoring resize of element outside the layout");
            return;
        }
        self.trigger("element resized");
    }

    /// Change the spacing. Takes effect with a repack.
    pub fn set_spacing(&mut self, spacing: u32) {
        self.config.set_spacing(spacing);
        self.packer = Packer::new().with_spacing(spacing);
        self.trigger("spacing changed");
    }

    /// Change animation settings. Applies to later moves only.
    pub fn set_animation(&mut self, animation: AnimationConfig) {
        self.config.set_animation(animation);
    }

    /// Pack the current elements and request transitions to the new targets.
    ///
    /// Elements the host cannot measure yet, or measures with an invalid
    /// size, are left out of this pass.
    pub fn repack(&mut self) -> Plan {
        self.skyline.reset(self.container_width);

        let host = &self.host;
        let measured: Vec<(ElementId, Size)> = self
            .elements
            .iter()
            .filter_map(|&element| match host.measure(element) {
                Some(size) if size.is_finite() && !size.is_negative() => Some((element, size)),
                Some(size) => {
                    warn!(element:% = element, width = size.width(), height = size.height(); "Skipping element with invalid size");
                    None
                }
                None => {
                    trace!(element:% = element; "Skipping unmeasured element");
                    None
                }
            })
            .collect();

        let plan = self.packer.pack_on(&mut self.skyline, measured);
        self.content_height = plan.height();
        self.host.set_content_height(plan.height());

        let animation = *self.config.animation();
        let mut moved = 0;
        for placement in plan.placements() {
            let outcome = self.scheduler.request(
                &mut self.host,
                placement.element(),
                placement.position(),
                animation.duration(),
                animation.ease(),
            );
            if outcome.is_move() {
                moved += 1;
            }
        }
        let started = self.scheduler.start_batch(&self.host);

        info!(
            elements = plan.len(),
            moved,
            started,
            height = plan.height(),
            width = self.container_width;
            "Repacked"
        );
        self.events.push(LayoutEvent::Repacked {
            height: plan.height(),
            moved,
        });
        self.process_scheduler_events();

        plan
    }

    /// Advance the controller clock by `dt`, run transitions and fire a due
    /// resize. Returns every event produced since the last drain.
    pub fn tick(&mut self, dt: Duration) -> Vec<LayoutEvent> {
        self.clock = self.clock.saturating_add(dt);

        self.scheduler.tick(&mut self.host, dt);
        self.process_scheduler_events();

        if let Some(width) = self.resize.poll(self.clock) {
            debug!(width = width; "Resize debounce elapsed");
            self.container_width = width;
            self.trigger("container resized");
        }

        self.drain_events()
    }

    /// Report that the host finished transition `id` on its own.
    ///
    /// Completions of superseded or unknown transitions are ignored.
    pub fn complete_transition(&mut self, id: TransitionId) -> Vec<LayoutEvent> {
        if self.scheduler.complete(&mut self.host, id) {
            self.process_scheduler_events();
        }
        self.drain_events()
    }

    /// Take the events produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<LayoutEvent> {
        std::mem::take(&mut self.events)
    }

    fn trigger(&mut self, reason: &'static str) {
        if self.scheduler.is_settled() {
            debug!(reason = reason; "Repack triggered");
            self.repack();
        } else {
            debug!(reason = reason; "Batch in flight, deferring repack");
            self.repack_requested = true;
        }
    }

    fn reorder(&mut self, mut compare: Comparator) {
        if self.scheduler.is_settled() {
            self.elements.sort_by(|a, b| compare(a, b));
            self.repack();
        } else {
            debug!("Batch in flight, deferring reorder");
            self.pending_changes.push(PendingChange::Reorder(compare));
        }
    }

    fn process_scheduler_events(&mut self) {
        for event in self.scheduler.take_events() {
            match event {
                SchedulerEvent::Completed {
                    element,
                    transition,
                } => self.events.push(LayoutEvent::TransitionCompleted {
                    element,
                    transition,
                }),
                SchedulerEvent::Settled => {
                    self.events.push(LayoutEvent::Settled);
                    self.replay_deferred();
                }
            }
        }
    }

    /// Apply everything held back during the batch and repack once.
    fn replay_deferred(&mut self) {
        if !self.has_deferred_work() {
            return;
        }

        let changes = std::mem::take(&mut self.pending_changes);
        self.repack_requested = false;
        debug!(changes = changes.len(); "Replaying deferred work");

        for change in changes {
            self.apply_change(change);
        }
        self.repack();
    }

    /// Apply one list mutation. Returns whether the list changed.
    fn apply_change(&mut self, change: PendingChange) -> bool {
        match change {
            PendingChange::Add(ids) => {
                let before = self.elements.len();
                for id in ids {
                    if !self.elements.contains(&id) {
                        self.elements.push(id);
                    }
                }
                self.elements.len() != before
            }
            PendingChange::Remove(ids) => {
                for id in &ids {
                    if !self.elements.contains(id) {
                        warn!(element:% = id; "Removing element that is not in the layout");
                    }
                }
                let before = self.elements.len();
                self.elements.retain(|id| !ids.contains(id));
                self.elements.len() != before
            }
            PendingChange::Reorder(mut compare) => {
                self.elements.sort_by(|a, b| compare(a, b));
                true
            }
            PendingChange::Reverse => {
                self.elements.reverse();
                true
            }
        }
    }

    /// Membership the list will have once queued changes are applied.
    fn prospective_elements(&self) -> IndexSet<ElementId> {
        let mut members: IndexSet<ElementId> = self.elements.iter().copied().collect();
        for change in &self.pending_changes {
            match change {
                PendingChange::Add(ids) => members.extend(ids.iter().copied()),
                PendingChange::Remove(ids) => members.retain(|id| !ids.contains(id)),
                PendingChange::Reorder(_) | PendingChange::Reverse => {}
            }
        }
        members
    }

    fn validate_additions(
        &self,
        added: &[ElementId],
        removed: &[ElementId],
    ) -> Result<(), LayoutError> {
        if added.is_empty() {
            return Ok(());
        }

        let mut members = self.prospective_elements();
        members.retain(|id| !removed.contains(id));

        for &element in added {
            if !members.insert(element) {
                return Err(LayoutError::invalid_child(
                    element,
                    InvalidChildReason::Duplicate,
                ));
            }
            if let Some(size) = self.host.measure(element) {
                if !size.is_finite() {
                    return Err(LayoutError::invalid_child(
                        element,
                        InvalidChildReason::NonFiniteSize,
                    ));
                }
                if size.is_negative() {
                    return Err(LayoutError::invalid_child(
                        element,
                        InvalidChildReason::NegativeSize,
                    ));
                }
            }
        }
        Ok(())
    }
}

impl<H: ElementHost + fmt::Debug> fmt::Debug for LayoutController<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutController")
            .field("host", &self.host)
            .field("elements", &self.elements)
            .field("container_width", &self.container_width)
            .field("content_height", &self.content_height)
            .field("pending_changes", &self.pending_changes)
            .field("repack_requested", &self.repack_requested)
            .finish_non_exhaustive()
    }
}

fn sanitize_width(width: f32) -> f32 {
    if width.is_finite() && width > 0.0 {
        width
    } else {
        0.0
    }
}
