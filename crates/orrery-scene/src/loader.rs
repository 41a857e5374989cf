//! Asynchronous scene loading.

use std::future::Future;
use std::path::PathBuf;

use crate::error::SceneError;
use crate::graph::SceneGraph;

/// Loads the model asset into a [`SceneGraph`]. Fires once per session.
pub trait SceneLoader {
    fn load(&self, url: &str) -> impl Future<Output = Result<SceneGraph, SceneError>> + Send;
}

/// Loads a RON scene manifest from the filesystem.
#[derive(Clone, Debug)]
pub struct RonSceneLoader {
    /// Uniform scale applied to every node.
    pub scale: f32,
}

impl RonSceneLoader {
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }
}

impl SceneLoader for RonSceneLoader {
    async fn load(&self, url: &str) -> Result<SceneGraph, SceneError> {
        let contents = tokio::fs::read_to_string(url)
            .await
            .map_err(|source| SceneError::Read {
                path: PathBuf::from(url),
                source,
            })?;
        let graph = SceneGraph::from_ron(&contents, self.scale)?;
        tracing::info!(
            scene = graph.name(),
            nodes = graph.nodes().len(),
            "Loaded scene from {url}"
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_loads_manifest_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.ron");
        std::fs::write(
            &path,
            r#"(name: "Tiny", nodes: [(name: "Earth", center: (1.0, 0.0, 0.0), radius: 0.5)])"#,
        )
        .unwrap();

        let graph = RonSceneLoader::new(2.0)
            .load(path.to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(graph.nodes().len(), 1);
        assert!((graph.nodes()[0].bounds.radius - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.ron");
        let result = RonSceneLoader::new(1.0).load(path.to_str().unwrap()).await;
        assert!(matches!(result, Err(SceneError::Read { .. })));
    }
}
