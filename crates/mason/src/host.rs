//! Capability interface implemented by the embedding UI host.
//!
//! The layout engine never owns visual elements. It asks the host for sizes
//! and positions through [`ElementHost`] and writes positions back while
//! transitions run.

use mason_core::{
    geometry::{Point, Size},
    identifier::ElementId,
};

/// Host-side access to element geometry.
pub trait ElementHost {
    /// Current measured size of `element`, or `None` while it has not been
    /// measured yet. Unmeasured elements are left out of packing.
    fn measure(&self, element: ElementId) -> Option<Size>;

    /// Current live (possibly mid-transition) top-left position.
    fn position(&self, element: ElementId) -> Point;

    /// Move `element` to `position`.
    fn set_position(&mut self, element: ElementId, position: Point);

    /// Called after every repack with the height the container must have
    /// to show all elements.
    fn set_content_height(&mut self, _height: f32) {}
}
