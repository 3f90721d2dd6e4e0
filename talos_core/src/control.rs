// talos_core/src/control.rs

//! Proportional go-to-pose controller.
//!
//! Given the believed pose and a target pose it produces a velocity command.
//! The omni branch treats each axis independently; the differential branch
//! uses a turn-then-drive policy re-derived from the current error every
//! tick, so there is no stored phase to get stuck in.

use crate::types::{normalize_angle, DriveMode, Pose, Velocity};

// Speed limits for the controllers.
// TODO: make these configurable per model.
pub const MAX_SPEED_X: f64 = 0.4;
pub const MAX_SPEED_Y: f64 = 0.4;
pub const MAX_SPEED_A: f64 = 1.0;

/// Linear deadband: inside this box we only rotate.
pub const CLOSE_ENOUGH: f64 = 0.02;

/// Heading deadband for driving towards the goal point.
pub const ANGLE_DEADBAND: f64 = std::f64::consts::PI / 16.0;

/// Compute the velocity that reduces the error between `pose` and `target`.
pub fn goto(drive: DriveMode, pose: Pose, target: Pose) -> Velocity {
    let x_error = target.x - pose.x;
    let y_error = target.y - pose.y;
    let a_error = normalize_angle(target.a - pose.a);

    match drive {
        DriveMode::Omni => {
            // Reduce the error in each axis independently, speed limited.
            // Only the upper bound is applied here; this asymmetry is
            // longstanding observed behavior and is kept as-is.
            Velocity::new(
                x_error.min(MAX_SPEED_X),
                y_error.min(MAX_SPEED_Y),
                a_error.min(MAX_SPEED_A),
            )
        }
        DriveMode::Differential => {
            // Axes can not be controlled independently: turn towards the
            // goal point, drive there, then turn to face the target angle.
            let mut calc = Velocity::zero();

            if x_error.abs() < CLOSE_ENOUGH && y_error.abs() < CLOSE_ENOUGH {
                // At the right spot: turn on the spot to minimize the error.
                calc.a = a_error.clamp(-MAX_SPEED_A, MAX_SPEED_A);
            } else {
                // Turn to face the goal point.
                let goal_angle = y_error.atan2(x_error);
                let goal_distance = y_error.hypot(x_error);

                let steer_error = normalize_angle(goal_angle - pose.a);
                calc.a = steer_error.clamp(-MAX_SPEED_A, MAX_SPEED_A);

                // If we're pointing about the right direction, move forward.
                if steer_error.abs() < ANGLE_DEADBAND {
                    calc.x = goal_distance.min(MAX_SPEED_X);
                }
            }

            // Lateral velocity stays zero under the diff-steer model.
            Velocity::new(calc.x, 0.0, calc.a)
        }
    }
}
