//! Install and remove video players through the system package manager
//!
//! The host system is reached only through [`CommandRunner`]; everything
//! else is a static table or a pure function of what the runner reports.

// Internal modules (private)
mod action_log;
mod catalog;
mod detector;
mod installer;
mod manager;
mod runner;
mod session;
mod style;

#[cfg(test)]
mod fake;

// Re-export public types
pub use action_log::ActionLog;
pub use catalog::{find_player, PlayerEntry, PLAYERS};
pub use detector::detect_package_manager;
pub use installer::{install, is_installed, uninstall, ActionOutcome};
pub use manager::{CommandTemplate, ManagerCommands, PackageManagerKind, PACKAGE_PLACEHOLDER};
pub use runner::{CommandRunner, Invocation, SystemRunner};
pub use session::{Session, SessionEnd};
pub use style::{Palette, Tone};

/// Number of action logs kept in the temp directory
pub const ACTION_LOGS_KEPT: usize = 5;
