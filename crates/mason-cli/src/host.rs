use std::collections::HashMap;

use mason::{
    ElementHost,
    geometry::{Point, Size},
    identifier::ElementId,
};

/// In-memory host holding element sizes and live positions.
#[derive(Debug, Default)]
pub struct SceneHost {
    /// Every element the host has been told about, in first-seen order.
    seen: Vec<ElementId>,
    sizes: HashMap<ElementId, Size>,
    positions: HashMap<ElementId, Point>,
    content_height: f32,
    position_writes: usize,
}

impl SceneHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the measured size of `element`.
    pub fn set_size(&mut self, element: ElementId, size: Size) {
        self.track(element);
        self.sizes.insert(element, size);
    }

    /// Measure `element` if both dimensions are known.
    pub fn set_optional_size(&mut self, element: ElementId, width: Option<f32>, height: Option<f32>) {
        self.track(element);
        if let (Some(width), Some(height)) = (width, height) {
            self.set_size(element, Size::new(width, height));
        }
    }

    /// Elements seen so far, removed ones included.
    pub fn seen(&self) -> &[ElementId] {
        &self.seen
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    /// Number of position updates received, intermediate frames included.
    pub fn position_writes(&self) -> usize {
        self.position_writes
    }

    fn track(&mut self, element: ElementId) {
        if !self.seen.contains(&element) {
            self.seen.push(element);
        }
    }
}

impl ElementHost for SceneHost {
    fn measure(&self, element: ElementId) -> Option<Size> {
        self.sizes.get(&element).copied()
    }

    fn position(&self, element: ElementId) -> Point {
        self.positions.get(&element).copied().unwrap_or_default()
    }

    fn set_position(&mut self, element: ElementId, position: Point) {
        self.track(element);
        self.position_writes += 1;
        self.positions.insert(element, position);
    }

    fn set_content_height(&mut self, height: f32) {
        self.content_height = height;
    }
}
