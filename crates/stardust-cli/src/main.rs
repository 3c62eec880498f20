//! Stardust CLI - headless driver for the particle field

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, config, simulate};

#[derive(Parser)]
#[command(name = "stardust")]
#[command(about = "Interactive audio- and pointer-reactive particle field", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the field headlessly with a scripted pointer and report stats
    Simulate {
        /// Path to a field config (TOML)
        #[arg(short, long)]
        config: Option<String>,

        /// Number of frames to simulate
        #[arg(long, default_value = "600")]
        frames: u32,

        /// Simulated frame rate
        #[arg(long, default_value = "60")]
        fps: f32,

        /// Override the config seed
        #[arg(long)]
        seed: Option<u32>,

        /// Feed a synthetic audio spectrum
        #[arg(long)]
        audio: bool,
    },

    /// Write the default configuration
    Config {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Parse and validate a configuration file
    Check {
        /// Path to config file
        file: String,
    },
}

/// Log filter chosen by the verbosity flags. `-v` wins over `--quiet`.
fn log_level(verbose: u8, quiet: bool) -> log::LevelFilter {
    match verbose {
        0 if quiet => log::LevelFilter::Error,
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG directives still override the flag-derived level
    env_logger::Builder::new()
        .filter_level(log_level(cli.verbose, cli.quiet))
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Simulate {
            config,
            frames,
            fps,
            seed,
            audio,
        } => simulate::run(simulate::SimulateArgs {
            config,
            frames,
            fps,
            seed,
            audio,
        }),
        Commands::Config { output } => config::run(output.as_deref()),
        Commands::Check { file } => check::run(&file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;

    #[test]
    fn verbosity_maps_to_level() {
        assert_eq!(log_level(0, false), LevelFilter::Warn);
        assert_eq!(log_level(0, true), LevelFilter::Error);
        assert_eq!(log_level(1, false), LevelFilter::Info);
        assert_eq!(log_level(2, false), LevelFilter::Debug);
        assert_eq!(log_level(3, false), LevelFilter::Trace);
        assert_eq!(log_level(9, true), LevelFilter::Trace);
    }

    #[test]
    fn repeated_verbose_flag_is_counted() {
        let cli = Cli::try_parse_from(["stardust", "-vv", "simulate", "--frames", "61"]).unwrap();
        assert_eq!(log_level(cli.verbose, cli.quiet), LevelFilter::Debug);

        let cli = Cli::try_parse_from(["stardust", "config", "-q"]).unwrap();
        assert_eq!(log_level(cli.verbose, cli.quiet), LevelFilter::Error);
    }
}
