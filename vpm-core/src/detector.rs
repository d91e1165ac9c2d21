use log::info;

use crate::manager::PackageManagerKind;
use crate::runner::CommandRunner;

/// Detects the package manager by probing PATH in priority order
///
/// apt wins over dnf, dnf over pacman, pacman over zypper. Returns
/// [`PackageManagerKind::Unknown`] when none of them is present.
pub fn detect_package_manager<R: CommandRunner + ?Sized>(runner: &R) -> PackageManagerKind {
    let detected = PackageManagerKind::SUPPORTED
        .into_iter()
        .find(|kind| {
            kind.executable()
                .map(|exe| runner.is_available(exe))
                .unwrap_or(false)
        })
        .unwrap_or(PackageManagerKind::Unknown);

    info!("Detected package manager: {}", detected);
    detected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeSystem;

    #[test]
    fn test_apt_wins_regardless_of_others() {
        let system = FakeSystem::new(&["zypper", "pacman", "dnf", "apt"]);
        assert_eq!(detect_package_manager(&system), PackageManagerKind::Apt);

        let system = FakeSystem::new(&["apt", "zypper"]);
        assert_eq!(detect_package_manager(&system), PackageManagerKind::Apt);
    }

    #[test]
    fn test_priority_order_below_apt() {
        let system = FakeSystem::new(&["zypper", "pacman", "dnf"]);
        assert_eq!(detect_package_manager(&system), PackageManagerKind::Dnf);

        let system = FakeSystem::new(&["zypper", "pacman"]);
        assert_eq!(detect_package_manager(&system), PackageManagerKind::Pacman);

        let system = FakeSystem::new(&["zypper"]);
        assert_eq!(detect_package_manager(&system), PackageManagerKind::Zypper);
    }

    #[test]
    fn test_no_manager_is_unknown() {
        let system = FakeSystem::new(&["dpkg", "sudo", "yum"]);
        assert_eq!(detect_package_manager(&system), PackageManagerKind::Unknown);
    }

    #[test]
    fn test_detection_runs_no_commands() {
        let system = FakeSystem::new(&["pacman"]);
        detect_package_manager(&system);
        assert!(system.invocations().is_empty());
    }
}
