use std::path::PathBuf;

use beamx::{offset, BeamConfig, ConfigError, Offset};
use clap::Parser;

use crate::scenario::ScenarioOptions;

/// Command line arguments of the headless animation runner.
#[derive(Debug, Parser)]
#[command(
    name = "beamx",
    version,
    about = "Animate a beam mode shape headlessly and report the final frame"
)]
pub struct Cli {
    /// JSON configuration file; omitted fields keep their defaults
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Number of clock ticks to run
    #[arg(long, default_value_t = 40)]
    pub ticks: u64,
    /// Mode number, overriding the configuration
    #[arg(long)]
    pub mode: Option<f64>,
    /// Angular frequency, overriding the configuration
    #[arg(long)]
    pub omega: Option<f64>,
    /// Number of beam nodes, overriding the configuration
    #[arg(long)]
    pub nodes: Option<usize>,
    /// Emit the solid as a wireframe
    #[arg(long)]
    pub wireframe: bool,
    /// Attach the camera to the POSITION node looking at the FOCAL node
    #[arg(long, num_args = 2, value_names = ["POSITION", "FOCAL"])]
    pub attach: Option<Vec<usize>>,
    /// Camera offset from the position node
    #[arg(
        long,
        num_args = 3,
        value_names = ["DX", "DY", "DZ"],
        allow_negative_numbers = true
    )]
    pub delta: Option<Vec<f64>>,
    /// Sleep one tick interval between ticks
    #[arg(long)]
    pub realtime: bool,
    /// Log every tick and rebuild
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the session configuration from the file and the overrides.
    pub fn beam_config(&self) -> Result<BeamConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => BeamConfig::load(path)?,
            None => BeamConfig::default(),
        };
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(omega) = self.omega {
            config.omega = omega;
        }
        if let Some(nodes) = self.nodes {
            config.node_count = nodes;
        }
        if self.wireframe {
            config.transparent = true;
        }
        config.validate()?;
        Ok(config)
    }

    /// Options for the scenario runner.
    pub fn scenario_options(&self) -> ScenarioOptions {
        let attach = match self.attach.as_deref() {
            Some(&[position, focal]) => Some((position, focal)),
            _ => None,
        };
        let delta = match self.delta.as_deref() {
            Some(&[dx, dy, dz]) => offset(dx, dy, dz),
            _ => Offset::default(),
        };
        ScenarioOptions {
            ticks: self.ticks,
            attach,
            delta,
            realtime: self.realtime,
        }
    }
}
