// talos_sim/src/render.rs

//! Read-only snapshot for visualization.
//!
//! The renderer consumes position data, it never mutates it. A frame is a
//! plain value, so a renderer (or a trajectory logger) can hold on to it
//! across ticks without borrowing the model.

use serde::Serialize;

use talos_core::types::{Pose, Velocity};

use crate::model::PositionModel;

/// Everything a renderer needs to draw one model for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderFrame {
    /// Believed pose, in the localization origin frame.
    pub pose: Pose,
    /// The origin frame itself, in world coordinates.
    pub origin: Pose,
    /// Velocity applied this tick.
    pub velocity: Velocity,
    /// Body bounding size `[sx, sy]`.
    pub geometry: [f64; 2],
    pub stalled: bool,
}

impl PositionModel {
    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame {
            pose: self.believed_pose(),
            origin: self.data().origin,
            velocity: self.velocity(),
            geometry: self.geometry(),
            stalled: self.stalled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimulationRng;

    #[test]
    fn frame_mirrors_model_state() {
        let mut rng = SimulationRng::from_seed(3);
        let m = PositionModel::create(Pose::new(1.0, 2.0, 0.0), &mut rng);
        let frame = m.render_frame();
        assert_eq!(frame.origin, Pose::new(1.0, 2.0, 0.0));
        assert_eq!(frame.velocity, Velocity::zero());
        assert!(!frame.stalled);
    }

    #[test]
    fn frame_serializes_for_trajectory_logging() {
        let mut rng = SimulationRng::from_seed(3);
        let m = PositionModel::create(Pose::default(), &mut rng);
        let json = serde_json::to_string(&m.render_frame()).unwrap();
        assert!(json.contains("\"pose\":[0.0,0.0,0.0]"));
    }
}
