// talos_sim/src/cli.rs

use clap::Parser;
use std::path::PathBuf;

/// Talos: a headless mobile-base simulation harness.
///
/// These are the command-line arguments shared by binaries that drive the
/// talos position model from a world file.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the world TOML file to run.
    #[arg(short, long, default_value = "assets/worlds/goto_demo.toml")]
    pub world: PathBuf,

    /// Number of simulation steps to run.
    #[arg(long, default_value_t = 600)]
    pub steps: u32,

    /// Fixed RNG seed; overrides the world file and the wall clock.
    #[arg(long)]
    pub seed: Option<u64>,
}
