use std::io::Write;

use anyhow::Result;
use log::{debug, error, warn};

use crate::manager::PackageManagerKind;
use crate::runner::{CommandRunner, Invocation};
use crate::style::{Palette, Tone};

/// Reported result of an install or uninstall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The follow-up query confirmed the new state
    Succeeded,
    /// The package manager ran but the package is not in the expected state
    LikelyFailed,
    /// Nothing was run because the package manager is not supported
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Install,
    Uninstall,
}

impl Action {
    fn invocations(self, kind: PackageManagerKind, package: &str) -> Option<Vec<Invocation>> {
        match self {
            Action::Install => kind.install_invocations(package),
            Action::Uninstall => kind.uninstall_invocations(package),
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Action::Install => "install",
            Action::Uninstall => "uninstall",
        }
    }
}

/// Checks whether `package` is installed according to the package manager
///
/// The query runs unprivileged with its output discarded. A query that
/// cannot be spawned counts as not installed.
pub fn is_installed<R: CommandRunner + ?Sized>(
    runner: &R,
    package: &str,
    kind: PackageManagerKind,
) -> bool {
    let Some(invocation) = kind.check_invocation(package) else {
        error!("Could not determine package manager to query {}", package);
        return false;
    };

    match runner.run(&invocation) {
        Ok(installed) => installed,
        Err(e) => {
            debug!("Installed-state query for {} failed: {:#}", package, e);
            false
        }
    }
}

/// Installs `package` and reports whether it ended up installed
pub fn install<R, W>(
    runner: &R,
    package: &str,
    kind: PackageManagerKind,
    out: &mut W,
    palette: &Palette,
) -> Result<ActionOutcome>
where
    R: CommandRunner + ?Sized,
    W: Write + ?Sized,
{
    perform(runner, Action::Install, package, kind, out, palette)
}

/// Removes `package` and reports whether it is gone
pub fn uninstall<R, W>(
    runner: &R,
    package: &str,
    kind: PackageManagerKind,
    out: &mut W,
    palette: &Palette,
) -> Result<ActionOutcome>
where
    R: CommandRunner + ?Sized,
    W: Write + ?Sized,
{
    perform(runner, Action::Uninstall, package, kind, out, palette)
}

fn perform<R, W>(
    runner: &R,
    action: Action,
    package: &str,
    kind: PackageManagerKind,
    out: &mut W,
    palette: &Palette,
) -> Result<ActionOutcome>
where
    R: CommandRunner + ?Sized,
    W: Write + ?Sized,
{
    let Some(steps) = action.invocations(kind, package) else {
        error!("Cannot {} {}: unsupported package manager", action.verb(), package);
        writeln!(
            out,
            "{}",
            palette.paint(
                &format!(
                    "❌ Cannot {}: Unsupported package manager '{}'.",
                    action.verb(),
                    kind
                ),
                Tone::Failure
            )
        )?;
        return Ok(ActionOutcome::Unsupported);
    };

    let announce = match action {
        Action::Install => format!("\n📥 Installing {} using {}...\n", package, kind),
        Action::Uninstall => format!("\n🗑️  Uninstalling {} using {}...\n", package, kind),
    };
    writeln!(out, "{}", palette.paint(&announce, Tone::Info))?;
    out.flush()?;

    // Later steps still run after a failure
    for step in &steps {
        match runner.run(step) {
            Ok(true) => {}
            Ok(false) => {
                warn!("Step `{}` exited with an error", step);
                writeln!(
                    out,
                    "{}",
                    palette.paint(&format!("⚠️  `{}` exited with an error", step), Tone::Warning)
                )?;
            }
            Err(e) => {
                warn!("Step `{}` could not be run: {:#}", step, e);
                writeln!(
                    out,
                    "{}",
                    palette.paint(&format!("⚠️  Failed to run `{}`: {:#}", step, e), Tone::Warning)
                )?;
            }
        }
    }

    let installed = is_installed(runner, package, kind);
    let succeeded = match action {
        Action::Install => installed,
        Action::Uninstall => !installed,
    };

    let (message, tone) = match (action, succeeded) {
        (Action::Install, true) => (
            format!("\n✅ {} has been successfully installed.\n", package),
            Tone::Success,
        ),
        (Action::Install, false) => (
            format!(
                "\n⚠️ Installation of {} may have failed. Please check manually.\n",
                package
            ),
            Tone::Warning,
        ),
        (Action::Uninstall, true) => (
            format!("\n✅ {} has been successfully removed.\n", package),
            Tone::Success,
        ),
        (Action::Uninstall, false) => (
            format!(
                "\n⚠️ Uninstallation of {} may have failed or requires manual intervention.\n",
                package
            ),
            Tone::Warning,
        ),
    };
    writeln!(out, "{}", palette.paint(&message, tone))?;

    Ok(if succeeded {
        ActionOutcome::Succeeded
    } else {
        ActionOutcome::LikelyFailed
    })
}
