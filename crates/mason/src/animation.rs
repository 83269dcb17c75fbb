//! Position transitions.
//!
//! Moves produced by a repack are turned into timed transitions, at most one
//! per element. Transitions requested by the same repack run as one batch;
//! the batch settles when the last of them completes.
//!
//! # Submodules
//!
//! - [`ease`] - Easing curves
//! - [`transition`] - A single timed move
//! - [`scheduler`] - Batch bookkeeping and settle detection

pub mod ease;
pub mod scheduler;
pub mod transition;

pub use ease::Ease;
pub use scheduler::{RequestOutcome, SchedulerEvent, TransitionScheduler};
pub use transition::{Transition, TransitionId};
