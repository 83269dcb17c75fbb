//! Mason Core Types
//!
//! This crate provides the foundational types shared by the Mason layout
//! engine and its hosts:
//!
//! - **Geometry**: Points, sizes and bounds ([`geometry`] module)
//! - **Identifiers**: String-interned element identifiers ([`identifier::ElementId`])

pub mod geometry;
pub mod identifier;
