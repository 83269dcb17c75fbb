//! Skyline packing.
//!
//! This module computes where every element goes. It is a pure function of
//! the ordered element sizes, the container width and the spacing; it never
//! looks at current positions.
//!
//! # Pipeline Position
//!
//! ```text
//! Element list (ordered sizes)
//!     ↓ layout (this module)
//! Plan
//!     ↓ animation
//! Live positions
//! ```
//!
//! # Submodules
//!
//! - [`skyline`] - Band set describing the occupied height profile
//! - [`packer`] - Places elements in order on a skyline
//! - [`plan`] - Target positions and content height of one pass

pub mod packer;
pub mod plan;
pub mod skyline;

pub use packer::Packer;
pub use plan::{Placement, Plan};
pub use skyline::{Band, Skyline};
