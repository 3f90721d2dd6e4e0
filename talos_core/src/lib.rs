// talos_core/src/lib.rs

// This file defines the public modules of your library.
pub mod control;
pub mod kinematics;
pub mod localization;
pub mod prelude;
pub mod types;
