use anyhow::{Context, Result};
use charger_uptime::UptimeProcessor;
use charger_uptime::cli::{Args, setup_logging};
use clap::Parser;
use std::process;

fn main() {
    let args = Args::parse();

    if let Err(error) = run(args) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    setup_logging(&args)?;
    let config = args.to_config()?;

    let processor = UptimeProcessor::new(args.input_path.clone()).with_config(config);
    let outcome = processor.process().with_context(|| {
        format!(
            "failed to compute uptime for {}",
            processor.input_path().display()
        )
    })?;

    print!("{}", processor.render(&outcome)?);
    Ok(())
}
