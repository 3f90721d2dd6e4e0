// talos_core/src/kinematics.rs

//! The drive kinematics policy: what a requested motion becomes once the
//! steering hardware has its say.

use crate::types::{DriveMode, Velocity};

/// Map an intended motion onto what the drive train can actually do.
///
/// Axes the drive mode cannot realize are silently zeroed; asking a
/// differential base to strafe is not an error, it just doesn't strafe.
pub fn achievable(drive: DriveMode, intended: Velocity) -> Velocity {
    match drive {
        // differential-steering model, like a Pioneer
        DriveMode::Differential => Velocity::new(intended.x, 0.0, intended.a),
        // direct steering model, like an omnidirectional robot
        DriveMode::Omni => intended,
    }
}
