// talos_core/src/prelude.rs

//! Convenient glob import for consumers of the core library.

pub use crate::control::{self, goto};
pub use crate::kinematics::achievable;
pub use crate::localization::{
    ground_truth_fix, integrate_odometry, origin_rebase, DriftError, DriftMaxima,
};
pub use crate::types::{
    normalize_angle, Command, ControlMode, DriveMode, LocalizationMode, Pose, Velocity,
};
