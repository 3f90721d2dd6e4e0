// talos_core/src/localization.rs

//! Pose estimation math for the two localization strategies.
//!
//! Ground truth re-expresses the simulator's true pose in the localization
//! origin frame; odometry dead-reckons by integrating the commanded velocity
//! with a fixed multiplicative drift bias per axis.
//!
//! Note the two rotation conventions: the ground-truth fix rotates the
//! origin-to-robot displacement by the origin heading, while the odometry
//! step rotates the per-tick displacement by the just-updated believed
//! heading. They serve different reference frames and must not be unified.

use serde::{Deserialize, Serialize};

use crate::types::{normalize_angle, Pose, Velocity};

// =========================================================================
// == Drift Error Model ==
// =========================================================================

/// Per-axis maximum drift proportion. The actual coefficient for each axis
/// is drawn once from `Uniform(-max/2, +max/2)` when the model is created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct DriftMaxima {
    pub x: f64,
    pub y: f64,
    pub a: f64,
}

impl Default for DriftMaxima {
    fn default() -> Self {
        DriftMaxima {
            x: 0.03,
            y: 0.03,
            a: 0.05,
        }
    }
}

impl From<[f64; 3]> for DriftMaxima {
    fn from(t: [f64; 3]) -> Self {
        DriftMaxima {
            x: t[0],
            y: t[1],
            a: t[2],
        }
    }
}

impl From<DriftMaxima> for [f64; 3] {
    fn from(m: DriftMaxima) -> Self {
        [m.x, m.y, m.a]
    }
}

/// The sampled multiplicative bias applied while integrating velocities.
/// Fixed for the lifetime of a model.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DriftError {
    pub x: f64,
    pub y: f64,
    pub a: f64,
}

impl DriftError {
    /// No bias at all. Useful for tests; note that even with zero bias the
    /// odometry path does not reproduce ground truth bit-for-bit, since the
    /// two code paths round differently.
    pub const ZERO: DriftError = DriftError {
        x: 0.0,
        y: 0.0,
        a: 0.0,
    };
}

// =========================================================================
// == Estimators ==
// =========================================================================

/// Believed pose from perfect knowledge: the true pose expressed relative
/// to the localization origin.
pub fn ground_truth_fix(true_pose: Pose, origin: Pose) -> Pose {
    let a = normalize_angle(true_pose.a - origin.a);
    let cosa = origin.a.cos();
    let sina = origin.a.sin();
    let dx = true_pose.x - origin.x;
    let dy = true_pose.y - origin.y;
    Pose {
        x: dx * cosa + dy * sina,
        y: dy * cosa - dx * sina,
        a,
    }
}

/// Believed pose recomputed when the localization origin is overwritten by
/// configuration. Unlike `ground_truth_fix` this rotates by the *relative*
/// heading, matching the rebase convention used at load time.
pub fn origin_rebase(true_pose: Pose, origin: Pose) -> Pose {
    let a = normalize_angle(true_pose.a - origin.a);
    let cosa = a.cos();
    let sina = a.sin();
    let dx = true_pose.x - origin.x;
    let dy = true_pose.y - origin.y;
    Pose {
        x: dx * cosa + dy * sina,
        y: dy * cosa - dx * sina,
        a,
    }
}

/// One dead-reckoning step: integrate `vel` over `dt` with per-axis bias,
/// rotating the displacement by the updated heading.
pub fn integrate_odometry(pose: Pose, vel: Velocity, dt: f64, err: DriftError) -> Pose {
    let a = normalize_angle(pose.a + (vel.a * dt) * (1.0 + err.a));

    let cosa = a.cos();
    let sina = a.sin();
    let dx = (vel.x * dt) * (1.0 + err.x);
    let dy = (vel.y * dt) * (1.0 + err.y);

    Pose {
        x: pose.x + (dx * cosa + dy * sina),
        y: pose.y - (dy * cosa - dx * sina),
        a,
    }
}
