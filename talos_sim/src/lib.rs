// talos_sim/src/lib.rs

//! Host-facing layer of the talos position model.
//!
//! `talos_core` holds the pure control and localization math; this crate
//! wires it into a host simulation: model lifecycle (create / configure /
//! enable / tick / disable), the typed property store with change
//! notification, world-file configuration, the injected simulation RNG and
//! the integrator seam towards the host's physics.

pub mod cli;
pub mod config;
pub mod model;
pub mod physics;
pub mod prelude;
pub mod properties;
pub mod render;
pub mod rng;
