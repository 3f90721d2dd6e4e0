// talos_core/src/types.rs

use nalgebra::{Isometry2, Vector2};
use serde::{Deserialize, Serialize};

// =========================================================================
// == Geometry Primitives ==
// =========================================================================

/// A planar pose: position in meters, heading in radians.
///
/// The heading is measured counter-clockwise from the x-axis and is kept in
/// `(-PI, PI]` by every operation that writes it. In world files a pose is
/// written as a `[x, y, a]` tuple, which serde maps through the array form.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub a: f64,
}

impl Pose {
    pub const fn new(x: f64, y: f64, a: f64) -> Self {
        Pose { x, y, a }
    }

    /// The pose as a rigid transform, for composing with a physics layer.
    pub fn to_isometry(&self) -> Isometry2<f64> {
        Isometry2::new(Vector2::new(self.x, self.y), self.a)
    }

    pub fn from_isometry(iso: &Isometry2<f64>) -> Self {
        Pose {
            x: iso.translation.x,
            y: iso.translation.y,
            a: iso.rotation.angle(),
        }
    }
}

impl From<[f64; 3]> for Pose {
    fn from(t: [f64; 3]) -> Self {
        Pose::new(t[0], t[1], t[2])
    }
}

impl From<Pose> for [f64; 3] {
    fn from(p: Pose) -> Self {
        [p.x, p.y, p.a]
    }
}

/// Normalize an angle to `(-PI, PI]`.
pub fn normalize_angle(a: f64) -> f64 {
    a.sin().atan2(a.cos())
}

/// A planar velocity: linear rates in m/s, angular rate in rad/s.
///
/// Depending on context this is either a rate commanded by a client or the
/// achievable rate handed to the physics integrator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
    pub a: f64,
}

impl Velocity {
    pub const fn new(x: f64, y: f64, a: f64) -> Self {
        Velocity { x, y, a }
    }

    pub const fn zero() -> Self {
        Velocity::new(0.0, 0.0, 0.0)
    }
}

impl From<[f64; 3]> for Velocity {
    fn from(t: [f64; 3]) -> Self {
        Velocity::new(t[0], t[1], t[2])
    }
}

impl From<Velocity> for [f64; 3] {
    fn from(v: Velocity) -> Self {
        [v.x, v.y, v.a]
    }
}

// =========================================================================
// == Modes & Commands ==
// =========================================================================

/// How the base realizes a commanded motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriveMode {
    /// Differential steering: forward speed and turn rate only, no strafing.
    #[default]
    Differential,
    /// Omnidirectional: all three axes independently controllable.
    Omni,
}

/// How a `Command`'s payload is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlMode {
    /// The payload is a target velocity.
    #[default]
    Velocity,
    /// The payload is a target pose in the localization frame.
    Position,
}

/// Where the believed pose comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalizationMode {
    /// Perfect pose, recomputed from ground truth every tick.
    #[default]
    GroundTruth,
    /// Dead reckoning: commanded velocity integrated with drift bias.
    Odometry,
}

/// A motion command from a client. `mode` selects whether `x`, `y`, `a` are
/// a target rate or a target pose.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Command {
    pub mode: ControlMode,
    pub x: f64,
    pub y: f64,
    pub a: f64,
}

impl Command {
    pub const fn velocity(x: f64, y: f64, a: f64) -> Self {
        Command {
            mode: ControlMode::Velocity,
            x,
            y,
            a,
        }
    }

    pub const fn goto(x: f64, y: f64, a: f64) -> Self {
        Command {
            mode: ControlMode::Position,
            x,
            y,
            a,
        }
    }
}
