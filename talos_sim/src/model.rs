// talos_sim/src/model.rs

//! The position model: lifecycle and per-tick pipeline.
//!
//! Tick order is fixed: interpret the current command into an achievable
//! velocity, hand that to the host integrator which advances the true pose,
//! then update the believed pose under the selected localization mode.

use tracing::{debug, warn};

use talos_core::control;
use talos_core::kinematics;
use talos_core::localization::{
    ground_truth_fix, integrate_odometry, origin_rebase, DriftError, DriftMaxima,
};
use talos_core::types::{Command, ControlMode, DriveMode, LocalizationMode, Pose, Velocity};

use crate::config::PositionConfig;
use crate::physics::MotionIntegrator;
use crate::properties::{ObserverId, PropertyBus, PropertyId, Subscription};
use crate::rng::SimulationRng;

/// The localization state published under [`PropertyId::PositionData`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionData {
    /// Believed pose, relative to `origin`. Heading always in `(-PI, PI]`.
    pub pose: Pose,
    /// Reference frame the believed pose is reported against.
    pub origin: Pose,
    /// Drift coefficients sampled at creation (or at an `odom_error`
    /// reconfiguration); constant otherwise.
    pub error: DriftError,
    pub mode: LocalizationMode,
}

/// A simulated mobile robot base.
pub struct PositionModel {
    command: Command,
    drive: DriveMode,
    velocity: Velocity,
    data: PositionData,
    stalled: bool,
    drift_maxima: DriftMaxima,
    geometry: [f64; 2],
    bus: PropertyBus,
}

impl PositionModel {
    /// Install a model with sensible defaults: differential drive,
    /// velocity-control command of zero, ground-truth localization, origin
    /// captured from the robot's current placement, drift coefficients
    /// sampled once from the default maxima.
    pub fn create(true_pose: Pose, rng: &mut SimulationRng) -> Self {
        let drift_maxima = DriftMaxima::default();
        debug!("created position model");
        PositionModel {
            command: Command::default(),
            drive: DriveMode::default(),
            velocity: Velocity::zero(),
            data: PositionData {
                pose: Pose::default(),
                origin: true_pose,
                error: rng.sample_drift(drift_maxima),
                mode: LocalizationMode::default(),
            },
            stalled: false,
            drift_maxima,
            geometry: [0.4, 0.4],
            bus: PropertyBus::new(),
        }
    }

    /// Apply a `[position]` world-file table. Unrecognized mode strings warn
    /// and keep the previously held value; absent keys change nothing.
    pub fn configure(&mut self, cfg: &PositionConfig, true_pose: Pose, rng: &mut SimulationRng) {
        if let Some(mode) = cfg.drive.as_deref() {
            match mode {
                "diff" => {
                    self.drive = DriveMode::Differential;
                    self.bus.notify(PropertyId::DriveMode);
                }
                "omni" => {
                    self.drive = DriveMode::Omni;
                    self.bus.notify(PropertyId::DriveMode);
                }
                other => warn!(
                    "invalid drive mode \"{other}\" - should be one of: \
                     \"diff\", \"omni\". Keeping the current mode."
                ),
            }
        }

        if cfg.odom.is_some() {
            warn!(
                "the odom property is no longer available. \
                 Use localization_origin instead."
            );
        }

        if let Some(origin) = cfg.localization_origin {
            // Rebase the believed pose onto the new origin and assume we
            // know exactly where we are at this instant.
            self.data.origin = origin;
            self.data.pose = origin_rebase(true_pose, origin);
        }

        if let Some(maxima) = cfg.odom_error {
            self.drift_maxima = maxima;
            self.data.error = rng.sample_drift(maxima);
        }

        if let Some(loc) = cfg.localization.as_deref() {
            match loc {
                "gps" => self.data.mode = LocalizationMode::GroundTruth,
                "odom" => self.data.mode = LocalizationMode::Odometry,
                other => warn!(
                    "unrecognized localization mode \"{other}\". \
                     Valid choices are \"gps\" and \"odom\". Keeping the current mode."
                ),
            }
        }

        if let Some(size) = cfg.geometry {
            self.geometry = size;
            self.bus.notify(PropertyId::Geometry);
        }

        // We've probably poked the localization data, so refresh it.
        self.bus.notify(PropertyId::PositionData);
    }

    /// Register as a consumer of the model's output. Commands are only
    /// applied while at least one subscription is alive.
    pub fn subscribe(&self) -> Subscription {
        self.bus.subscribe()
    }

    /// Register a change observer; called with the id of every property the
    /// model writes.
    pub fn observe(&mut self, f: impl FnMut(PropertyId) + 'static) -> ObserverId {
        self.bus.observe(f)
    }

    pub fn remove_observer(&mut self, id: ObserverId) {
        self.bus.remove_observer(id);
    }

    /// Write the motion command. Takes effect on the next tick.
    pub fn set_command(&mut self, command: Command) {
        self.command = command;
        self.bus.notify(PropertyId::Command);
    }

    pub fn enable(&mut self) {
        debug!("position model enabled");
    }

    /// Safety stop: force command and velocity to zero.
    pub fn disable(&mut self) {
        debug!("position model disabled");
        self.command = Command::default();
        self.velocity = Velocity::zero();
        self.bus.notify(PropertyId::Command);
        self.bus.notify(PropertyId::Velocity);
    }

    /// One simulation step. Called exactly once per step by the host.
    pub fn tick(&mut self, world: &mut dyn MotionIntegrator) {
        // Stop by default; stall detection is external, so the flag is
        // cleared at the top of every tick.
        self.velocity = Velocity::zero();
        self.stalled = false;
        self.bus.notify(PropertyId::Stall);

        // No driving if no one is subscribed.
        if self.bus.subscriber_count() > 0 {
            self.velocity = match self.command.mode {
                ControlMode::Velocity => kinematics::achievable(
                    self.drive,
                    Velocity::new(self.command.x, self.command.y, self.command.a),
                ),
                ControlMode::Position => control::goto(
                    self.drive,
                    self.data.pose,
                    Pose::new(self.command.x, self.command.y, self.command.a),
                ),
            };
        }
        // The integrator and renderer poll nothing; they rely on this.
        self.bus.notify(PropertyId::Velocity);

        // The host's physics does the actual moving.
        let true_pose = world.advance(self.velocity);
        let dt = world.step_interval();

        match self.data.mode {
            LocalizationMode::GroundTruth => {
                self.data.pose = ground_truth_fix(true_pose, self.data.origin);
            }
            LocalizationMode::Odometry => {
                self.data.pose =
                    integrate_odometry(self.data.pose, self.velocity, dt, self.data.error);
            }
        }
        self.bus.notify(PropertyId::PositionData);
    }

    // --- Read-only property access ---

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn drive(&self) -> DriveMode {
        self.drive
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn data(&self) -> &PositionData {
        &self.data
    }

    pub fn believed_pose(&self) -> Pose {
        self.data.pose
    }

    pub fn stalled(&self) -> bool {
        self.stalled
    }

    pub fn geometry(&self) -> [f64; 2] {
        self.geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::physics::PlanarIntegrator;
    use approx::assert_relative_eq;

    fn model() -> (PositionModel, SimulationRng) {
        let mut rng = SimulationRng::from_seed(1);
        let m = PositionModel::create(Pose::default(), &mut rng);
        (m, rng)
    }

    #[test]
    fn defaults_match_the_contract() {
        let (m, _) = model();
        assert_eq!(m.drive(), DriveMode::Differential);
        assert_eq!(m.command().mode, ControlMode::Velocity);
        assert_eq!(m.velocity(), Velocity::zero());
        assert_eq!(m.data().mode, LocalizationMode::GroundTruth);
        assert_eq!(m.believed_pose(), Pose::default());
        assert!(!m.stalled());
    }

    #[test]
    fn drift_is_sampled_within_default_bounds() {
        let (m, _) = model();
        let e = m.data().error;
        assert!(e.x.abs() <= 0.015);
        assert!(e.y.abs() <= 0.015);
        assert!(e.a.abs() <= 0.025);
    }

    #[test]
    fn no_subscriber_means_zero_velocity() {
        let (mut m, _) = model();
        let mut world = PlanarIntegrator::new(Pose::default(), 0.1);
        m.set_command(Command::velocity(0.3, 0.0, 0.5));
        m.tick(&mut world);
        assert_eq!(m.velocity(), Velocity::zero());
        assert_eq!(world.true_pose(), Pose::default());
    }

    #[test]
    fn disable_is_a_safety_stop() {
        let (mut m, _) = model();
        let _sub = m.subscribe();
        let mut world = PlanarIntegrator::new(Pose::default(), 0.1);
        m.set_command(Command::velocity(0.3, 0.0, 0.0));
        m.tick(&mut world);
        assert!(m.velocity().x > 0.0);

        m.disable();
        assert_eq!(m.command(), Command::default());
        assert_eq!(m.velocity(), Velocity::zero());
    }

    #[test]
    fn bad_mode_strings_keep_previous_values() {
        let (mut m, mut rng) = model();
        let world = WorldConfig::from_toml_str(
            "[position]\ndrive = \"omni\"\nlocalization = \"odom\"\n",
        )
        .unwrap();
        m.configure(&world.position, Pose::default(), &mut rng);
        assert_eq!(m.drive(), DriveMode::Omni);
        assert_eq!(m.data().mode, LocalizationMode::Odometry);

        // A later partial misconfiguration falls back to what we had, not
        // to the hardcoded defaults.
        let bad = WorldConfig::from_toml_str(
            "[position]\ndrive = \"ackermann\"\nlocalization = \"slam\"\n",
        )
        .unwrap();
        m.configure(&bad.position, Pose::default(), &mut rng);
        assert_eq!(m.drive(), DriveMode::Omni);
        assert_eq!(m.data().mode, LocalizationMode::Odometry);
    }

    #[test]
    fn deprecated_odom_key_changes_nothing() {
        let (mut m, mut rng) = model();
        let before = *m.data();
        let world = WorldConfig::from_toml_str("[position]\nodom = [1.0, 2.0, 3.0]\n").unwrap();
        m.configure(&world.position, Pose::default(), &mut rng);
        assert_eq!(*m.data(), before);
    }

    #[test]
    fn origin_override_rebases_the_believed_pose() {
        let (mut m, mut rng) = model();
        let truth = Pose::new(2.0, 1.0, 0.3);
        let world =
            WorldConfig::from_toml_str("[position]\nlocalization_origin = [2.0, 1.0, 0.3]\n")
                .unwrap();
        m.configure(&world.position, truth, &mut rng);
        // Origin placed exactly at the true pose: exact knowledge, zero pose.
        assert_eq!(m.data().origin, truth);
        assert_relative_eq!(m.believed_pose().x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(m.believed_pose().y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(m.believed_pose().a, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn odom_error_reconfiguration_resamples_within_bounds() {
        let (mut m, mut rng) = model();
        let world =
            WorldConfig::from_toml_str("[position]\nodom_error = [0.0, 0.0, 0.0]\n").unwrap();
        m.configure(&world.position, Pose::default(), &mut rng);
        assert_eq!(m.data().error, DriftError::ZERO);
    }

    #[test]
    fn rejected_drive_string_is_not_announced() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let (mut m, mut rng) = model();
        let log: Rc<RefCell<Vec<PropertyId>>> = Rc::default();
        let sink = Rc::clone(&log);
        m.observe(move |id| sink.borrow_mut().push(id));

        let bad = WorldConfig::from_toml_str("[position]\ndrive = \"ackermann\"\n").unwrap();
        m.configure(&bad.position, Pose::default(), &mut rng);
        // The mode was not written, so no drive-mode notification; only the
        // end-of-configure localization refresh is announced.
        assert_eq!(*log.borrow(), vec![PropertyId::PositionData]);

        log.borrow_mut().clear();
        let good = WorldConfig::from_toml_str("[position]\ndrive = \"omni\"\n").unwrap();
        m.configure(&good.position, Pose::default(), &mut rng);
        assert_eq!(
            *log.borrow(),
            vec![PropertyId::DriveMode, PropertyId::PositionData]
        );
    }

    #[test]
    fn every_write_is_announced() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let (mut m, _) = model();
        let log: Rc<RefCell<Vec<PropertyId>>> = Rc::default();
        let sink = Rc::clone(&log);
        m.observe(move |id| sink.borrow_mut().push(id));

        let _sub = m.subscribe();
        let mut world = PlanarIntegrator::new(Pose::default(), 0.1);
        m.set_command(Command::velocity(0.1, 0.0, 0.0));
        m.tick(&mut world);

        let seen = log.borrow();
        assert_eq!(
            *seen,
            vec![
                PropertyId::Command,
                PropertyId::Stall,
                PropertyId::Velocity,
                PropertyId::PositionData,
            ]
        );
    }
}
