//! Scene files.
//!
//! A scene describes a container, the elements it starts with and an
//! optional timeline of host-side events:
//!
//! ```toml
//! container_width = 620
//!
//! [[elements]]
//! name = "hero"
//! width = 200
//! height = 400
//!
//! [[events]]
//! at_ms = 300
//! action = "resize"
//! width = 400
//! ```

use serde::Deserialize;

use crate::error::CliError;

#[derive(Debug, Clone, Deserialize)]
pub struct Scene {
    container_width: f32,
    #[serde(default)]
    elements: Vec<SceneElement>,
    #[serde(default)]
    events: Vec<SceneEvent>,
}

impl Scene {
    /// Parse a scene from TOML source.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Scene`] carrying the source span of the problem.
    pub fn parse(src: &str) -> Result<Self, CliError> {
        let mut scene: Scene =
            toml::from_str(src).map_err(|err| CliError::from_scene_error(&err, src))?;
        scene.events.sort_by_key(|event| event.at_ms);
        Ok(scene)
    }

    pub fn container_width(&self) -> f32 {
        self.container_width
    }

    pub fn elements(&self) -> &[SceneElement] {
        &self.elements
    }

    /// Timeline events ordered by time. Events at the same time keep file
    /// order.
    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }
}

/// An element and, if already measured, its size.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneElement {
    pub name: String,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SceneEvent {
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: SceneAction,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SceneAction {
    /// The container changed width.
    Resize { width: f32 },
    /// A new element appears, measured or not.
    Add {
        name: String,
        width: Option<f32>,
        height: Option<f32>,
    },
    Remove { name: String },
    /// A previously unmeasured or resized element reports its size.
    Measure { name: String, width: f32, height: f32 },
    /// Reverse the element order.
    Reverse,
}
