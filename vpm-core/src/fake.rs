//! In-memory stand-in for the host system used by the unit tests

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use anyhow::{bail, Result};

use crate::runner::{CommandRunner, Invocation};

/// Simulates PATH contents and package manager bookkeeping
pub(crate) struct FakeSystem {
    available: HashSet<String>,
    installed: RefCell<HashSet<String>>,
    invocations: RefCell<Vec<Invocation>>,
    fail_mutations: Cell<bool>,
}

impl FakeSystem {
    pub(crate) fn new(available: &[&str]) -> Self {
        Self {
            available: available.iter().map(|s| s.to_string()).collect(),
            installed: RefCell::new(HashSet::new()),
            invocations: RefCell::new(Vec::new()),
            fail_mutations: Cell::new(false),
        }
    }

    pub(crate) fn with_installed(self, packages: &[&str]) -> Self {
        self.installed
            .borrow_mut()
            .extend(packages.iter().map(|s| s.to_string()));
        self
    }

    /// Makes every install/remove step exit non-zero without changing state
    pub(crate) fn fail_mutations(&self) {
        self.fail_mutations.set(true);
    }

    pub(crate) fn has_package(&self, package: &str) -> bool {
        self.installed.borrow().contains(package)
    }

    pub(crate) fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }

    /// Elevated commands only, rendered as strings
    pub(crate) fn mutations(&self) -> Vec<String> {
        self.invocations
            .borrow()
            .iter()
            .filter(|inv| inv.elevated)
            .map(|inv| inv.to_string())
            .collect()
    }
}

impl CommandRunner for FakeSystem {
    fn is_available(&self, program: &str) -> bool {
        self.available.contains(program)
    }

    fn run(&self, invocation: &Invocation) -> Result<bool> {
        self.invocations.borrow_mut().push(invocation.clone());

        let failing = self.fail_mutations.get();
        let argv = invocation.argv();

        match argv.as_slice() {
            ["dpkg", "-s", pkg]
            | ["dnf", "list", "installed", pkg]
            | ["pacman", "-Q", pkg]
            | ["zypper", "search", "--installed-only", pkg] => {
                Ok(self.installed.borrow().contains(*pkg))
            }
            [_, "install", "-y", pkg] | ["pacman", "-Sy", "--noconfirm", pkg] => {
                if !failing {
                    self.installed.borrow_mut().insert(pkg.to_string());
                }
                Ok(!failing)
            }
            [_, "remove", "-y", pkg] | ["pacman", "-R", "--noconfirm", pkg] => {
                if !failing {
                    self.installed.borrow_mut().remove(*pkg);
                }
                Ok(!failing)
            }
            ["apt", "update"] | ["apt", "autoremove", "-y"] => Ok(!failing),
            _ => bail!("Failed to execute {}", invocation.program),
        }
    }
}
