//! Configuration types for Mason layouts.
//!
//! All types implement [`serde::Deserialize`] so a host can load them from an
//! external file. Every field has a default, so an empty document is a valid
//! configuration.
//!
//! # Overview
//!
//! - [`LayoutConfig`] - Spacing, resize debounce window and animation settings.
//! - [`AnimationConfig`] - Whether moves are animated, for how long, and with
//!   which easing curve.
//!
//! # Example
//!
//! ```
//! # use mason::config::LayoutConfig;
//! let config = LayoutConfig::default();
//! assert_eq!(config.spacing(), 0);
//! assert!(config.animation().enabled());
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::{animation::Ease, error::LayoutError};

const DEFAULT_DURATION_MS: u64 = 250;
const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 500;

/// Top-level layout configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Gap in pixels reserved to the right of and below every element.
    spacing: u32,

    /// Quiet period after the last container resize before a repack runs.
    resize_debounce_ms: u64,

    animation: AnimationConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing: 0,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            animation: AnimationConfig::default(),
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    ///
    /// # Arguments
    ///
    /// * `spacing` - Gap between elements, in pixels.
    /// * `resize_debounce_ms` - Resize debounce window in milliseconds.
    /// * `animation` - Transition settings.
    pub fn new(spacing: u32, resize_debounce_ms: u64, animation: AnimationConfig) -> Self {
        Self {
            spacing,
            resize_debounce_ms,
            animation,
        }
    }

    pub fn spacing(&self) -> u32 {
        self.spacing
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn animation(&self) -> &AnimationConfig {
        &self.animation
    }

    pub(crate) fn set_spacing(&mut self, spacing: u32) {
        self.spacing = spacing;
    }

    pub(crate) fn set_animation(&mut self, animation: AnimationConfig) {
        self.animation = animation;
    }

    /// Check values serde cannot rule out on its own.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Config`] if the resize debounce window is zero,
    /// which would repack on every intermediate width.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.resize_debounce_ms == 0 {
            return Err(LayoutError::Config(
                "resize_debounce_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Transition settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// When `false`, positions are applied synchronously.
    enabled: bool,

    duration_ms: u64,

    ease: Ease,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_ms: DEFAULT_DURATION_MS,
            ease: Ease::default(),
        }
    }
}

impl AnimationConfig {
    pub fn new(enabled: bool, duration_ms: u64, ease: Ease) -> Self {
        Self {
            enabled,
            duration_ms,
            ease,
        }
    }

    /// Animation switched off; every move is applied at once.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn ease(&self) -> Ease {
        self.ease
    }

    /// Duration of a single move. Zero when animation is disabled.
    pub fn duration(&self) -> Duration {
        if self.enabled {
            Duration::from_millis(self.duration_ms)
        } else {
            Duration::ZERO
        }
    }
}
