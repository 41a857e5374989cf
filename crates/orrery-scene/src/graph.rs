//! The loaded model: a named root with pickable child nodes, each carrying
//! a world-space bounding sphere.

use std::fmt;

use glam::Vec3;
use serde::Deserialize;

use crate::error::SceneError;

/// Name reported for nodes whose model name is empty.
pub const UNKNOWN_NODE: &str = "Unknown";

/// Internal name of a scene node, as authored in the model.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(String);

impl NodeId {
    /// Wrap a node name. Empty (or whitespace-only) names become [`UNKNOWN_NODE`].
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.trim().is_empty() {
            Self(UNKNOWN_NODE.to_string())
        } else {
            Self(name)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// World-space bounding sphere of a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// True when the radius is too small (or not finite) to frame against.
    pub fn is_degenerate(&self) -> bool {
        !self.radius.is_finite() || self.radius <= 1e-6
    }
}

/// A pickable node of the loaded model.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub id: NodeId,
    pub bounds: BoundingSphere,
}

/// The loaded model root. Set once per session; read by picking and by the
/// fly-to standoff computation.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneGraph {
    name: String,
    nodes: Vec<SceneNode>,
}

#[derive(Deserialize)]
struct Manifest {
    name: String,
    nodes: Vec<ManifestNode>,
}

#[derive(Deserialize)]
struct ManifestNode {
    #[serde(default)]
    name: String,
    center: [f32; 3],
    radius: f32,
}

impl SceneGraph {
    /// Build a graph from already-placed nodes.
    pub fn new(name: impl Into<String>, nodes: Vec<SceneNode>) -> Self {
        Self {
            name: name.into(),
            nodes,
        }
    }

    /// Parse a RON manifest and place it with a uniform `scale` about the origin.
    pub fn from_ron(source: &str, scale: f32) -> Result<Self, SceneError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(SceneError::InvalidScale(scale));
        }
        let manifest: Manifest = ron::from_str(source).map_err(SceneError::Parse)?;
        if manifest.nodes.is_empty() {
            return Err(SceneError::Empty(manifest.name));
        }

        let nodes = manifest
            .nodes
            .into_iter()
            .map(|node| SceneNode {
                id: NodeId::new(node.name),
                bounds: BoundingSphere::new(
                    Vec3::from_array(node.center) * scale,
                    node.radius.max(0.0) * scale,
                ),
            })
            .collect();

        Ok(Self::new(manifest.name, nodes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Look up a node by its internal name.
    pub fn node(&self, id: &NodeId) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }
}
