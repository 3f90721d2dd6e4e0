// talos_sim/src/physics.rs

//! Seam towards the host's physics/collision layer.
//!
//! The position model never moves itself: each tick it hands its achievable
//! velocity to a [`MotionIntegrator`], which owns the true pose and the
//! fixed step interval. Hosts with a real physics engine implement the
//! trait; [`PlanarIntegrator`] is the collision-free stand-in used by tests
//! and the headless runner.

use nalgebra::{Isometry2, Vector2};

use talos_core::types::{Pose, Velocity};

pub trait MotionIntegrator {
    /// Apply `vel` for one step and return the resulting true pose.
    fn advance(&mut self, vel: Velocity) -> Pose;

    /// The fixed simulation step, in seconds.
    fn step_interval(&self) -> f64;
}

/// Kinematic integrator over an obstacle-free plane. Velocities are
/// body-frame; the pose is advanced by rigid-transform composition.
pub struct PlanarIntegrator {
    pose: Isometry2<f64>,
    dt: f64,
}

impl PlanarIntegrator {
    pub fn new(start: Pose, dt: f64) -> Self {
        Self {
            pose: start.to_isometry(),
            dt,
        }
    }

    /// The current true pose, without advancing it.
    pub fn true_pose(&self) -> Pose {
        Pose::from_isometry(&self.pose)
    }
}

impl MotionIntegrator for PlanarIntegrator {
    fn advance(&mut self, vel: Velocity) -> Pose {
        let delta = Isometry2::new(
            Vector2::new(vel.x * self.dt, vel.y * self.dt),
            vel.a * self.dt,
        );
        self.pose *= delta;
        self.true_pose()
    }

    fn step_interval(&self) -> f64 {
        self.dt
    }
}
