use anyhow::Result;
use clap::{Arg, Command};
use colored::*;

use barline::commands;

fn main() -> Result<()> {
    barline::init_logging();

    let matches = Command::new("barline")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Fixed-interval system-status reporter for dzen2-style bars")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(clap::ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("run")
                .about("Sample system metrics once per second and feed the status bar")
                .arg(
                    Arg::new("command")
                        .short('c')
                        .long("command")
                        .value_name("CMD")
                        .help("Display process to spawn and pipe lines into"),
                )
                .arg(
                    Arg::new("stdout")
                        .long("stdout")
                        .help("Write lines to stdout instead of spawning a display process")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Emit one JSON object per cycle (for scripting)")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("quiet")
                        .short('q')
                        .long("quiet")
                        .help("Suppress desktop notifications")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .get_matches();

    if matches.get_flag("version") {
        println!("barline version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    match matches.subcommand() {
        Some(("run", sub_matches)) => commands::run::execute(sub_matches),
        _ => {
            println!("{}", "barline - system status reporter".white().bold());
            println!(
                "Use '{}' to start reporting, or '{}' for more information.",
                "barline run".cyan().bold(),
                "barline --help".cyan()
            );
            Ok(())
        }
    }
}
