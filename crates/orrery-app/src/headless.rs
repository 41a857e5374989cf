//! A [`ViewportService`] that renders nothing and logs the camera instead.

use orrery_scene::{CameraPose, SceneGraph, ViewportService};
use tracing::{debug, trace};

#[derive(Debug)]
pub struct LogViewport {
    size: (u32, u32),
    frames: u64,
    last_pose: Option<CameraPose>,
    trace_camera: bool,
}

impl LogViewport {
    pub fn new(width: u32, height: u32, trace_camera: bool) -> Self {
        Self {
            size: (width, height),
            frames: 0,
            last_pose: None,
            trace_camera,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Pose of the most recently rendered frame.
    pub fn last_pose(&self) -> Option<&CameraPose> {
        self.last_pose.as_ref()
    }
}

impl ViewportService for LogViewport {
    fn resize(&mut self, width: u32, height: u32) {
        debug!(width, height, "Viewport resized");
        self.size = (width, height);
    }

    fn render_frame(&mut self, camera: &CameraPose, scene: Option<&SceneGraph>) {
        self.frames += 1;
        if self.trace_camera {
            trace!(
                frame = self.frames,
                position = ?camera.position,
                target = ?camera.target,
                bodies = scene.map_or(0, |s| s.nodes().len()),
                "Frame"
            );
        }
        self.last_pose = Some(*camera);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_records_frames_and_size() {
        let mut viewport = LogViewport::new(1280, 720, true);
        let pose = CameraPose::new(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO);
        viewport.render_frame(&pose, None);
        viewport.render_frame(&pose, None);
        viewport.resize(640, 480);

        assert_eq!(viewport.frames(), 2);
        assert_eq!(viewport.size(), (640, 480));
        assert_eq!(viewport.last_pose(), Some(&pose));
    }
}
