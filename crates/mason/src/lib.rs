//! Mason - Animated skyline masonry layout.
//!
//! Packs variably sized rectangular elements into a fixed-width container,
//! top to bottom, and animates every element from where it is to where the
//! packer puts it. The UI toolkit stays outside: it implements
//! [`ElementHost`] and drives time through [`LayoutController::tick`].
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//!
//! use mason::{
//!     ElementHost, LayoutController,
//!     config::{AnimationConfig, LayoutConfig},
//!     geometry::{Point, Size},
//!     identifier::ElementId,
//! };
//!
//! #[derive(Default)]
//! struct Board {
//!     positions: HashMap<ElementId, Point>,
//! }
//!
//! impl ElementHost for Board {
//!     fn measure(&self, _element: ElementId) -> Option<Size> {
//!         Some(Size::new(100.0, 40.0))
//!     }
//!
//!     fn position(&self, element: ElementId) -> Point {
//!         self.positions.get(&element).copied().unwrap_or_default()
//!     }
//!
//!     fn set_position(&mut self, element: ElementId, position: Point) {
//!         self.positions.insert(element, position);
//!     }
//! }
//!
//! let config = LayoutConfig::new(0, 500, AnimationConfig::disabled());
//! let mut controller = LayoutController::new(Board::default(), config).unwrap();
//! controller.set_container_width(250.0);
//!
//! let cards = [ElementId::new("a"), ElementId::new("b"), ElementId::new("c")];
//! controller.add_all(&cards).unwrap();
//!
//! assert_eq!(controller.host().position(cards[2]), Point::new(0.0, 40.0));
//! assert_eq!(controller.content_height(), 80.0);
//! ```

pub mod animation;
pub mod config;
pub mod layout;

mod controller;
mod error;
mod host;

pub use mason_core::{geometry, identifier};

pub use controller::{LayoutController, LayoutEvent};
pub use error::{InvalidChildReason, LayoutError};
pub use host::ElementHost;
