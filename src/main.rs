//! prguard CLI entry point.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use console::Style;
use prguard::cli::{Cli, CommandDispatcher, EXIT_ERROR};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr; stdout carries the report.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("prguard=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("prguard=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("prguard starting with args: {:?}", cli);

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let project_root = std::env::current_dir().unwrap_or_default();
    let dispatcher = CommandDispatcher::new(project_root);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = dispatcher.dispatch(&cli, &mut out);
    let _ = out.flush();

    match outcome {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            let style = Style::new().for_stderr().red().bold();
            eprintln!("{}", style.apply_to(format!("Error: {}", e)));
            ExitCode::from(EXIT_ERROR as u8)
        }
    }
}
