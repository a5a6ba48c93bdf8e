mod cli;
mod report;
mod scenario;

use std::error::Error;

use clap::Parser;
use cli::Cli;
use report::render_summary;
use scenario::run_scenario;

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // RUST_LOG always wins; --verbose only changes the fallback level.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    // Merge the optional config file with the command line overrides and
    // reject anything that cannot form a beam before building the session.
    let config = cli.beam_config()?;

    // Drive the animation exactly like a front end would: attach picks first,
    // then one clock tick after another against a headless renderer.
    let summary = run_scenario(&config, &cli.scenario_options())?;

    println!("{}", render_summary(&summary));

    Ok(())
}
