mod args;
mod commands;
mod error;
mod logging;
mod output;
mod profile;

use args::Cli;
use clap::Parser;
use profile::KitchenProfile;

fn run(cli: &Cli) -> error::Result<()> {
    // Profile first, then each command lets explicit flags win.
    let mut profile = match &cli.profile {
        Some(path) => KitchenProfile::load(path)?,
        None => KitchenProfile::default(),
    };

    commands::run(&cli.command, &mut profile)?;

    if let Some(path) = &cli.save_profile {
        profile.save(path)?;
        println!("\nProfile saved to {}", path.display());
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logging::init_with_level(if cli.verbose { "debug" } else { "warn" });

    if let Err(e) = run(&cli) {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {e}");
        if let Some(hint) = e.hint() {
            eprintln!("{hint}");
        }
        std::process::exit(1);
    }
}
