//! Output of one packing pass.

use indexmap::IndexMap;

use mason_core::{
    geometry::{Bounds, Point, Size},
    identifier::ElementId,
};

/// Target position of one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    element: ElementId,
    position: Point,
    /// Size including spacing, as reserved on the skyline.
    footprint: Size,
}

impl Placement {
    pub fn new(element: ElementId, position: Point, footprint: Size) -> Self {
        Self {
            element,
            position,
            footprint,
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Top-left corner the element should move to
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn footprint(&self) -> Size {
        self.footprint
    }

    /// Area reserved for the element, spacing included.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.position, self.footprint)
    }
}

/// Mapping from element to target position plus total content height.
///
/// Placements keep the packing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plan {
    placements: IndexMap<ElementId, Placement>,
    height: f32,
}

impl Plan {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, placement: Placement) {
        let bottom = placement.bounds().max_y();
        self.height = self.height.max(bottom);
        self.placements.insert(placement.element(), placement);
    }

    /// Required container height: the deepest placed footprint edge.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Target position for `element`, if it took part in the pass
    pub fn position_of(&self, element: ElementId) -> Option<Point> {
        self.placements.get(&element).map(Placement::position)
    }

    /// Placements in packing order
    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.placements.values()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}
