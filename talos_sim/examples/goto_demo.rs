// talos_sim/examples/goto_demo.rs

//! Headless go-to-pose run: load a world file, subscribe a client, send a
//! position command and tick the model against the planar integrator.
//!
//! Run with `cargo run --example goto_demo -- --steps 400 --seed 7`.

use clap::Parser;
use tracing::info;

use talos_sim::cli::Cli;
use talos_sim::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let world_cfg = WorldConfig::load(&cli.world)?;

    let mut rng = match cli.seed.or(world_cfg.simulation.seed) {
        Some(seed) => SimulationRng::from_seed(seed),
        None => SimulationRng::seed_from_clock(),
    };

    let start = Pose::default();
    let mut world = PlanarIntegrator::new(start, world_cfg.simulation.step_interval);
    let mut robot = PositionModel::create(start, &mut rng);
    robot.configure(&world_cfg.position, world.true_pose(), &mut rng);
    robot.enable();

    // The consumer gate: commands only apply while a client is subscribed.
    let _client = robot.subscribe();
    robot.set_command(Command::goto(2.0, 1.0, std::f64::consts::FRAC_PI_2));

    for step in 0..cli.steps {
        robot.tick(&mut world);
        if step % 50 == 0 {
            let f = robot.render_frame();
            info!(
                step = step as u64,
                x = f.pose.x,
                y = f.pose.y,
                a = f.pose.a,
                "believed pose"
            );
        }
    }

    robot.disable();
    println!("{}", serde_json::to_string_pretty(&robot.render_frame())?);
    Ok(())
}
