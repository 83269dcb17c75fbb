//! Skyline packing engine
//!
//! Places elements one after another, in the order given, on top of a
//! [`Skyline`]. The result only depends on the ordered sizes, the container
//! width and the spacing.

use log::{debug, trace};

use mason_core::{geometry::Size, identifier::ElementId};

use super::{
    plan::{Placement, Plan},
    skyline::Skyline,
};

/// Greedy skyline packer.
#[derive(Debug, Clone, Default)]
pub struct Packer {
    spacing: f32,
}

impl Packer {
    /// Create a packer with no spacing between elements
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gap reserved to the right of and below every element
    pub fn with_spacing(mut self, spacing: u32) -> Self {
        self.spacing = spacing as f32;
        self
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Pack `elements` into a container of `container_width`.
    ///
    /// Each element reserves a footprint of its size plus the spacing on both
    /// axes. The element's target position is the footprint's top-left corner.
    pub fn pack<I>(&self, elements: I, container_width: f32) -> Plan
    where
        I: IntoIterator<Item = (ElementId, Size)>,
    {
        let mut skyline = Skyline::new(container_width);
        self.pack_on(&mut skyline, elements)
    }

    /// Pack `elements` onto an existing skyline, which must have been reset
    /// by the caller.
    pub fn pack_on<I>(&self, skyline: &mut Skyline, elements: I) -> Plan
    where
        I: IntoIterator<Item = (ElementId, Size)>,
    {
        let mut plan = Plan::new();

        for (element, size) in elements {
            let footprint = size.grow(self.spacing);
            let point = skyline.best_attach_point(footprint.width());
            skyline.commit_placement(point, footprint);

            trace!(element:% = element, x = point.x(), y = point.y(); "Placed element");
            plan.push(Placement::new(element, point, footprint));
        }

        debug!(
            elements = plan.len(),
            height = plan.height(),
            container_width = skyline.container_width();
            "Packing finished"
        );

        plan
    }
}
