// talos_sim/src/prelude.rs

//! Convenient glob import for hosts embedding the position model.

pub use crate::config::{ConfigError, PositionConfig, WorldConfig};
pub use crate::model::{PositionData, PositionModel};
pub use crate::physics::{MotionIntegrator, PlanarIntegrator};
pub use crate::properties::{ObserverId, PropertyBus, PropertyId, Subscription};
pub use crate::render::RenderFrame;
pub use crate::rng::SimulationRng;

pub use talos_core::prelude::*;
