use anyhow::Result;
use clap::Parser;

use cabana_cli::cli::Cli;

fn main() -> Result<()> {
    cabana_cli::init_tracing();

    let cli = Cli::parse();
    let output = cabana_cli::run(cli)?;
    println!("{output}");

    Ok(())
}
