//! Integration tests for the LayoutController API
//!
//! These tests drive the controller the way a UI host would: elements are
//! added and removed, the container is resized and time advances in ticks.

use std::{collections::HashMap, time::Duration};

use mason::{
    ElementHost, InvalidChildReason, LayoutController, LayoutError, LayoutEvent,
    animation::Ease,
    config::{AnimationConfig, LayoutConfig},
    geometry::{Point, Size},
    identifier::ElementId,
};

#[derive(Debug, Default)]
struct Board {
    sizes: HashMap<ElementId, Size>,
    positions: HashMap<ElementId, Point>,
    content_height: f32,
}

impl Board {
    fn with(mut self, name: &str, width: f32, height: f32) -> Self {
        self.sizes
            .insert(ElementId::new(name), Size::new(width, height));
        self
    }

    fn resize(&mut self, name: &str, width: f32, height: f32) {
        self.sizes
            .insert(ElementId::new(name), Size::new(width, height));
    }
}

impl ElementHost for Board {
    fn measure(&self, element: ElementId) -> Option<Size> {
        self.sizes.get(&element).copied()
    }

    fn position(&self, element: ElementId) -> Point {
        self.positions.get(&element).copied().unwrap_or_default()
    }

    fn set_position(&mut self, element: ElementId, position: Point) {
        self.positions.insert(element, position);
    }

    fn set_content_height(&mut self, height: f32) {
        self.content_height = height;
    }
}

fn id(name: &str) -> ElementId {
    ElementId::new(name)
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn animated() -> LayoutConfig {
    LayoutConfig::new(0, 500, AnimationConfig::new(true, 100, Ease::Linear))
}

fn instant() -> LayoutConfig {
    LayoutConfig::new(0, 500, AnimationConfig::disabled())
}

fn count(events: &[LayoutEvent], pred: impl Fn(&LayoutEvent) -> bool) -> usize {
    events.iter().filter(|e| pred(e)).count()
}

fn repacks(events: &[LayoutEvent]) -> usize {
    count(events, |e| matches!(e, LayoutEvent::Repacked { .. }))
}

fn settles(events: &[LayoutEvent]) -> usize {
    count(events, |e| matches!(e, LayoutEvent::Settled))
}

#[test]
fn test_reference_layout_through_controller() {
    let board = Board::default()
        .with("ref_a", 200.0, 400.0)
        .with("ref_b", 400.0, 200.0)
        .with("ref_c", 200.0, 200.0)
        .with("ref_d", 200.0, 200.0)
        .with("ref_e", 400.0, 400.0);
    let mut controller = LayoutController::new(board, instant()).expect("valid config");
    controller.set_container_width(620.0);

    let ids: Vec<_> = ["ref_a", "ref_b", "ref_c", "ref_d", "ref_e"]
        .into_iter()
        .map(id)
        .collect();
    controller.add_all(&ids).expect("valid elements");

    let positions: Vec<_> = ids.iter().map(|&e| controller.host().position(e)).collect();
    assert_eq!(
        positions,
        vec![
            Point::new(0.0, 0.0),
            Point::new(200.0, 0.0),
            Point::new(200.0, 200.0),
            Point::new(400.0, 200.0),
            Point::new(0.0, 400.0),
        ]
    );
    assert_eq!(controller.host().content_height, 800.0);
}

#[test]
fn test_resize_burst_collapses_into_one_repack() {
    let board = Board::default()
        .with("burst_a", 100.0, 50.0)
        .with("burst_b", 100.0, 50.0);
    let mut controller = LayoutController::new(board, instant()).expect("valid config");
    controller.set_container_width(300.0);
    controller
        .add_all(&[id("burst_a"), id("burst_b")])
        .expect("valid elements");
    controller.drain_events();

    let mut events = Vec::new();
    for step in 0..10 {
        controller.container_resized(110.0 + step as f32 * 10.0);
        events.extend(controller.tick(ms(10)));
    }
    assert_eq!(repacks(&events), 0);
    assert!(controller.resize_pending());

    events.extend(controller.tick(ms(500)));

    assert_eq!(repacks(&events), 1);
    assert_eq!(controller.container_width(), 200.0);
    assert_eq!(controller.host().position(id("burst_b")), Point::new(100.0, 0.0));
    assert!(!controller.resize_pending());
}

#[test]
fn test_add_during_batch_is_replayed_once_after_settle() {
    let board = Board::default()
        .with("defer_a", 100.0, 50.0)
        .with("defer_b", 100.0, 50.0)
        .with("defer_c", 100.0, 50.0);
    let mut controller = LayoutController::new(board, animated()).expect("valid config");
    controller.set_container_width(150.0);
    controller
        .add_all(&[id("defer_a"), id("defer_b")])
        .expect("valid elements");
    assert!(!controller.is_settled());
    controller.drain_events();

    controller.add(id("defer_c")).expect("valid element");
    assert_eq!(controller.elements().len(), 2);
    assert!(controller.has_deferred_work());

    let events = controller.tick(ms(50));
    assert_eq!(repacks(&events), 0);
    assert_eq!(controller.elements().len(), 2);

    let events = controller.tick(ms(60));
    assert_eq!(settles(&events), 1);
    assert_eq!(repacks(&events), 1);
    assert_eq!(controller.elements().len(), 3);
    assert!(!controller.has_deferred_work());

    // The replay started a new batch moving the added element.
    let events = controller.tick(ms(200));
    assert_eq!(settles(&events), 1);
    assert_eq!(repacks(&events), 0);
    assert_eq!(controller.host().position(id("defer_c")), Point::new(0.0, 100.0));
}

#[test]
fn test_settled_fires_once_regardless_of_completion_order() {
    let names = ["order_a", "order_b", "order_c", "order_d"];
    let board = names
        .iter()
        .fold(Board::default(), |board, name| board.with(name, 100.0, 10.0));
    let mut controller = LayoutController::new(board, animated()).expect("valid config");
    controller.set_container_width(100.0);
    let ids: Vec<_> = names.into_iter().map(id).collect();
    controller.add_all(&ids).expect("valid elements");
    controller.drain_events();

    // The first element already sits at its target.
    assert_eq!(controller.transition_of(ids[0]), None);
    let transitions: Vec<_> = ids[1..]
        .iter()
        .map(|&e| controller.transition_of(e).expect("element is moving"))
        .collect();

    let mut events = Vec::new();
    for idx in [2, 0, 1] {
        events.extend(controller.complete_transition(transitions[idx]));
    }

    assert_eq!(settles(&events), 1);
    assert_eq!(events.last(), Some(&LayoutEvent::Settled));
    assert_eq!(
        count(&events, |e| matches!(e, LayoutEvent::TransitionCompleted { .. })),
        3
    );
    assert_eq!(controller.host().position(ids[3]), Point::new(0.0, 30.0));
}

#[test]
fn test_superseded_transition_completion_is_ignored() {
    let board = Board::default()
        .with("super_a", 100.0, 50.0)
        .with("super_b", 100.0, 50.0);
    let mut controller = LayoutController::new(board, animated()).expect("valid config");
    controller.set_container_width(100.0);
    controller
        .add_all(&[id("super_a"), id("super_b")])
        .expect("valid elements");
    let first = controller
        .transition_of(id("super_b"))
        .expect("element is moving");
    controller.tick(ms(50));

    controller.host_mut().resize("super_a", 100.0, 80.0);
    controller.repack();
    let second = controller
        .transition_of(id("super_b"))
        .expect("element is moving");
    assert_ne!(first, second);
    controller.drain_events();

    let events = controller.complete_transition(first);
    assert!(events.is_empty());
    assert!(!controller.is_settled());

    let events = controller.complete_transition(second);
    assert_eq!(settles(&events), 1);
    assert_eq!(controller.host().position(id("super_b")), Point::new(0.0, 80.0));
}

#[test]
fn test_invalid_child_is_rejected_without_side_effects() {
    let board = Board::default()
        .with("invalid_ok", 100.0, 50.0)
        .with("invalid_nan", f32::NAN, 50.0)
        .with("invalid_neg", 10.0, -1.0);
    let mut controller = LayoutController::new(board, instant()).expect("valid config");
    controller.set_container_width(200.0);
    controller.drain_events();

    let err = controller
        .add_all(&[id("invalid_ok"), id("invalid_nan")])
        .expect_err("non-finite size");
    assert_eq!(
        err,
        LayoutError::invalid_child(id("invalid_nan"), InvalidChildReason::NonFiniteSize)
    );

    let err = controller.add(id("invalid_neg")).expect_err("negative size");
    assert!(matches!(
        err,
        LayoutError::InvalidChild {
            reason: InvalidChildReason::NegativeSize,
            ..
        }
    ));

    assert!(controller.elements().is_empty());
    assert!(controller.drain_events().is_empty());

    controller.add(id("invalid_ok")).expect("valid element");
    let err = controller.add(id("invalid_ok")).expect_err("duplicate");
    assert_eq!(
        err.to_string(),
        "Invalid child `invalid_ok`: element is already in the layout"
    );
}

#[test]
fn test_unmeasured_element_joins_when_ready() {
    let board = Board::default().with("ready_a", 100.0, 50.0);
    let mut controller = LayoutController::new(board, instant()).expect("valid config");
    controller.set_container_width(100.0);

    controller
        .add_all(&[id("ready_a"), id("ready_late")])
        .expect("unmeasured elements are admitted");
    assert_eq!(controller.elements().len(), 2);
    assert_eq!(controller.content_height(), 50.0);

    controller.host_mut().resize("ready_late", 100.0, 30.0);
    controller.element_resized(id("ready_late"));

    assert_eq!(controller.host().position(id("ready_late")), Point::new(0.0, 50.0));
    assert_eq!(controller.content_height(), 80.0);
}

#[test]
fn test_disabled_animation_moves_synchronously() {
    let board = Board::default()
        .with("sync_a", 100.0, 50.0)
        .with("sync_b", 100.0, 50.0);
    let mut controller = LayoutController::new(board, instant()).expect("valid config");
    controller.set_container_width(100.0);

    controller
        .add_all(&[id("sync_a"), id("sync_b")])
        .expect("valid elements");

    assert!(controller.is_settled());
    assert_eq!(controller.host().position(id("sync_b")), Point::new(0.0, 50.0));
    let events = controller.drain_events();
    assert_eq!(settles(&events), 0);
    assert_eq!(events.last(), Some(&LayoutEvent::Repacked { height: 100.0, moved: 1 }));
}

#[test]
fn test_animation_change_applies_to_later_moves() {
    let board = Board::default()
        .with("anim_a", 100.0, 50.0)
        .with("anim_b", 100.0, 50.0);
    let mut controller = LayoutController::new(board, instant()).expect("valid config");
    controller.set_container_width(100.0);
    controller
        .add_all(&[id("anim_a"), id("anim_b")])
        .expect("valid elements");

    controller.set_animation(AnimationConfig::new(true, 100, Ease::Linear));
    controller.reverse_order();

    assert!(!controller.is_settled());
    assert_eq!(controller.host().position(id("anim_b")), Point::new(0.0, 50.0));

    controller.tick(ms(50));
    let midway = controller.host().position(id("anim_b"));
    assert!(midway.approx_eq(Point::new(0.0, 25.0), 0.5), "{midway:?}");

    controller.tick(ms(50));
    assert!(controller.is_settled());
    assert_eq!(controller.host().position(id("anim_b")), Point::new(0.0, 0.0));
    assert_eq!(controller.host().position(id("anim_a")), Point::new(0.0, 50.0));
}

#[test]
fn test_reorders_during_batch_apply_in_call_order() {
    let board = Board::default()
        .with("sort_c", 100.0, 10.0)
        .with("sort_a", 100.0, 10.0)
        .with("sort_b", 100.0, 10.0);
    let mut controller = LayoutController::new(board, animated()).expect("valid config");
    controller.set_container_width(100.0);
    controller
        .add_all(&[id("sort_c"), id("sort_a"), id("sort_b")])
        .expect("valid elements");
    assert!(!controller.is_settled());

    controller.sort_by_key(|element| element.name());
    controller.reverse_order();
    assert_eq!(
        controller.elements(),
        &[id("sort_c"), id("sort_a"), id("sort_b")]
    );

    controller.tick(ms(100));

    assert_eq!(
        controller.elements(),
        &[id("sort_c"), id("sort_b"), id("sort_a")]
    );
}

#[test]
fn test_remove_where_and_clear() {
    let board = Board::default()
        .with("rm_keep", 100.0, 10.0)
        .with("rm_drop_1", 100.0, 10.0)
        .with("rm_drop_2", 100.0, 10.0);
    let mut controller = LayoutController::new(board, instant()).expect("valid config");
    controller.set_container_width(100.0);
    controller
        .add_all(&[id("rm_drop_1"), id("rm_keep"), id("rm_drop_2")])
        .expect("valid elements");

    controller.remove_where(|element| element.name().starts_with("rm_drop"));

    assert_eq!(controller.elements(), &[id("rm_keep")]);
    assert_eq!(controller.host().position(id("rm_keep")), Point::new(0.0, 0.0));
    assert_eq!(controller.content_height(), 10.0);

    controller.clear();
    assert!(controller.elements().is_empty());
    assert_eq!(controller.host().content_height, 0.0);
}

#[test]
fn test_spacing_change_repacks() {
    let board = Board::default()
        .with("gap_a", 100.0, 50.0)
        .with("gap_b", 100.0, 50.0);
    let mut controller = LayoutController::new(board, instant()).expect("valid config");
    controller.set_container_width(400.0);
    controller
        .add_all(&[id("gap_a"), id("gap_b")])
        .expect("valid elements");

    controller.set_spacing(20);

    assert_eq!(controller.config().spacing(), 20);
    assert_eq!(controller.host().position(id("gap_b")), Point::new(120.0, 0.0));
    assert_eq!(controller.content_height(), 70.0);
}
