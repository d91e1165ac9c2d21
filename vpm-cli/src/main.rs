use std::io::IsTerminal;
use std::path::Path;

use anyhow::Result;
use vpm_core::{ActionLog, PackageManagerKind, Palette, Session, SystemRunner, ACTION_LOGS_KEPT};

mod cli;
mod interrupt;

fn main() -> Result<()> {
    let args = cli::parse_args();

    // Initialize logger with appropriate level based on verbose flag
    if std::env::var("RUST_LOG").is_err() {
        if args.verbose {
            std::env::set_var("RUST_LOG", "debug");
        } else {
            std::env::set_var("RUST_LOG", "warn");
        }
    }
    env_logger::init();

    interrupt::install_handler();

    let runner = SystemRunner::new();

    let kind = vpm_core::detect_package_manager(&runner);
    if let Some(failure) = unsupported_environment(kind) {
        eprintln!("{}", failure.message);
        std::process::exit(failure.exit_code);
    }

    // Only a supported system gets an action log
    let runner = attach_action_log(runner, &std::env::temp_dir());

    let color = !args.no_color
        && std::env::var_os("NO_COLOR").is_none()
        && std::io::stdout().is_terminal();

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let end = Session::new(&runner, kind, stdin.lock(), stdout.lock())
        .with_palette(Palette::new(color))
        .run()?;

    log::debug!("Session ended: {:?}", end);
    if let Some(action_log) = runner.action_log() {
        action_log.info(&format!("Session ended: {:?}", end));
    }

    std::process::exit(end.exit_code());
}

/// Starts a fresh action log in `dir` and prunes old ones
fn attach_action_log(runner: SystemRunner, dir: &Path) -> SystemRunner {
    match ActionLog::create_in(dir) {
        Ok(action_log) => {
            log::info!("Action log: {}", action_log.path().display());
            if let Err(e) = ActionLog::cleanup_old_logs(dir, ACTION_LOGS_KEPT) {
                log::warn!("Failed to clean up old action logs: {:#}", e);
            }
            runner.with_action_log(action_log)
        }
        Err(e) => {
            log::warn!("Continuing without an action log: {:#}", e);
            runner
        }
    }
}

/// Reason to stop before the menu is shown
#[derive(Debug)]
struct StartupFailure {
    exit_code: i32,
    message: String,
}

/// Returns the fatal error for a system without a supported package manager
fn unsupported_environment(kind: PackageManagerKind) -> Option<StartupFailure> {
    if kind.is_supported() {
        return None;
    }

    let supported = PackageManagerKind::SUPPORTED
        .iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    Some(StartupFailure {
        exit_code: 1,
        message: format!(
            "⚠️ Could not detect a supported package manager.\nSupported package managers: {}",
            supported
        ),
    })
}
