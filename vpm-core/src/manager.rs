//! Supported package managers and the commands used to drive them
//!
//! Each manager maps to a static [`ManagerCommands`] record, so adding a new
//! manager means adding one table entry rather than another branch in every
//! operation.

use std::fmt;

use crate::runner::Invocation;

/// Placeholder replaced by the package name in command templates
pub const PACKAGE_PLACEHOLDER: &str = "{pkg}";

/// The package manager detected on this system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManagerKind {
    Apt,
    Dnf,
    Pacman,
    Zypper,
    /// No supported package manager was found
    Unknown,
}

/// A command as an argument vector, program first
pub type CommandTemplate = &'static [&'static str];

/// Commands needed to query and mutate packages with one manager
#[derive(Debug)]
pub struct ManagerCommands {
    /// Exits with status zero iff the package is installed
    pub check: CommandTemplate,
    /// Run in order, with elevated privileges
    pub install: &'static [CommandTemplate],
    /// Run in order, with elevated privileges
    pub uninstall: &'static [CommandTemplate],
}

const APT: ManagerCommands = ManagerCommands {
    check: &["dpkg", "-s", PACKAGE_PLACEHOLDER],
    install: &[
        &["apt", "update"],
        &["apt", "install", "-y", PACKAGE_PLACEHOLDER],
    ],
    uninstall: &[
        &["apt", "remove", "-y", PACKAGE_PLACEHOLDER],
        &["apt", "autoremove", "-y"],
    ],
};

const DNF: ManagerCommands = ManagerCommands {
    check: &["dnf", "list", "installed", PACKAGE_PLACEHOLDER],
    install: &[&["dnf", "install", "-y", PACKAGE_PLACEHOLDER]],
    uninstall: &[&["dnf", "remove", "-y", PACKAGE_PLACEHOLDER]],
};

const PACMAN: ManagerCommands = ManagerCommands {
    check: &["pacman", "-Q", PACKAGE_PLACEHOLDER],
    install: &[&["pacman", "-Sy", "--noconfirm", PACKAGE_PLACEHOLDER]],
    uninstall: &[&["pacman", "-R", "--noconfirm", PACKAGE_PLACEHOLDER]],
};

const ZYPPER: ManagerCommands = ManagerCommands {
    check: &["zypper", "search", "--installed-only", PACKAGE_PLACEHOLDER],
    install: &[&["zypper", "install", "-y", PACKAGE_PLACEHOLDER]],
    uninstall: &[&["zypper", "remove", "-y", PACKAGE_PLACEHOLDER]],
};

impl PackageManagerKind {
    /// Supported managers in detection priority order
    pub const SUPPORTED: [PackageManagerKind; 4] = [
        PackageManagerKind::Apt,
        PackageManagerKind::Dnf,
        PackageManagerKind::Pacman,
        PackageManagerKind::Zypper,
    ];

    /// Executable name probed on PATH during detection
    pub fn executable(&self) -> Option<&'static str> {
        match self {
            PackageManagerKind::Apt => Some("apt"),
            PackageManagerKind::Dnf => Some("dnf"),
            PackageManagerKind::Pacman => Some("pacman"),
            PackageManagerKind::Zypper => Some("zypper"),
            PackageManagerKind::Unknown => None,
        }
    }

    /// Command table for this manager, `None` for [`PackageManagerKind::Unknown`]
    pub fn commands(&self) -> Option<&'static ManagerCommands> {
        match self {
            PackageManagerKind::Apt => Some(&APT),
            PackageManagerKind::Dnf => Some(&DNF),
            PackageManagerKind::Pacman => Some(&PACMAN),
            PackageManagerKind::Zypper => Some(&ZYPPER),
            PackageManagerKind::Unknown => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.commands().is_some()
    }

    /// Quiet, unprivileged query for whether `package` is installed
    pub fn check_invocation(&self, package: &str) -> Option<Invocation> {
        self.commands()
            .map(|commands| Invocation::quiet(expand(commands.check, package)))
    }

    /// Elevated command sequence that installs `package`
    pub fn install_invocations(&self, package: &str) -> Option<Vec<Invocation>> {
        self.commands()
            .map(|commands| elevated_sequence(commands.install, package))
    }

    /// Elevated command sequence that removes `package`
    pub fn uninstall_invocations(&self, package: &str) -> Option<Vec<Invocation>> {
        self.commands()
            .map(|commands| elevated_sequence(commands.uninstall, package))
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.executable().unwrap_or("none"))
    }
}

/// Substitutes the package name into a template
fn expand(template: CommandTemplate, package: &str) -> Vec<String> {
    template
        .iter()
        .map(|part| {
            if *part == PACKAGE_PLACEHOLDER {
                package.to_string()
            } else {
                part.to_string()
            }
        })
        .collect()
}

fn elevated_sequence(templates: &[CommandTemplate], package: &str) -> Vec<Invocation> {
    templates
        .iter()
        .map(|template| Invocation::elevated(expand(template, package)))
        .collect()
}
