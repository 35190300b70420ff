//! Bundle inspection entry point.
//!
//! # Responsibility
//! - Open an exploded bundle directory and print its resolved
//!   application-context configuration.
//! - Keep text output as stable `key=value` lines for scripting.

use clap::Parser;
use extender_core::{
    default_log_level, init_logging, ApplicationContextConfiguration, DirectoryBundle, LogTarget,
};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "extender", version, about = "Resolve Spring context configuration for a bundle")]
struct Cli {
    /// Exploded bundle root (the directory holding `META-INF/`).
    bundle_dir: PathBuf,

    /// Print the resolved configuration as JSON.
    #[arg(long)]
    json: bool,

    /// trace|debug|info|warn|error; defaults to the build-mode level.
    #[arg(long, env = "EXTENDER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rotated log files; logs go to stderr otherwise.
    #[arg(long, env = "EXTENDER_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("extender: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    let target = match &cli.log_dir {
        Some(dir) => LogTarget::Directory(dir.clone()),
        None => LogTarget::Stderr,
    };
    init_logging(level, target).map_err(|err| err.to_string())?;

    let bundle = DirectoryBundle::open(&cli.bundle_dir).map_err(|err| {
        error!("event=bundle_open module=cli status=error error={err}");
        err.to_string()
    })?;
    let config = ApplicationContextConfiguration::new(&bundle);

    if cli.json {
        let rendered = serde_json::to_string_pretty(&config).map_err(|err| err.to_string())?;
        println!("{rendered}");
        return Ok(());
    }

    for line in render_lines(&config) {
        println!("{line}");
    }
    Ok(())
}

fn render_lines(config: &ApplicationContextConfiguration) -> Vec<String> {
    let mut lines = vec![
        format!("spring_powered={}", config.is_spring_powered_bundle()),
        format!("wait_for_dependencies={}", config.wait_for_dependencies()),
    ];
    lines.extend(
        config
            .configuration_locations()
            .iter()
            .map(|location| format!("location={location}")),
    );
    lines
}
