use anyhow::{Context, Result};
use clap::Parser;

use filament_curvature::cli::Args;
use filament_curvature::pipeline;

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    pipeline::run(&args).with_context(|| {
        format!(
            "plotting curvature from {} into {}",
            args.input.display(),
            args.output.display()
        )
    })
}
