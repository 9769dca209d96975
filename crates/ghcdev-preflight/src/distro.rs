//! Best-effort OS/distribution detection.
//!
//! Only used to pick which package-manager command to put in remediation
//! hints; a wrong guess degrades to showing several alternatives.

use std::path::Path;

/// Detected distribution family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distro {
    Debian,
    Fedora,
    Arch,
    MacOs,
    Unknown,
}

impl Distro {
    /// Detect the current distribution.
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            return Distro::MacOs;
        }
        std::fs::read_to_string("/etc/os-release")
            .map(|content| Self::from_os_release(&content))
            .unwrap_or(Distro::Unknown)
    }

    /// Parse a distribution family out of /etc/os-release content.
    pub fn from_os_release(content: &str) -> Self {
        let mut id = None;
        let mut id_like = None;
        for line in content.lines() {
            if let Some(value) = line.strip_prefix("ID=") {
                id = Some(value.trim_matches('"').to_ascii_lowercase());
            } else if let Some(value) = line.strip_prefix("ID_LIKE=") {
                id_like = Some(value.trim_matches('"').to_ascii_lowercase());
            }
        }

        let haystack = format!(
            "{} {}",
            id.unwrap_or_default(),
            id_like.unwrap_or_default()
        );

        if haystack.contains("debian") || haystack.contains("ubuntu") {
            Distro::Debian
        } else if haystack.contains("fedora") || haystack.contains("rhel") {
            Distro::Fedora
        } else if haystack.contains("arch") {
            Distro::Arch
        } else {
            Distro::Unknown
        }
    }

    /// Whether a path exists; split out so probes stay readable.
    pub(crate) fn path_exists(path: &str) -> bool {
        Path::new(path).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debian_by_id() {
        let content = "NAME=\"Debian GNU/Linux\"\nID=debian\n";
        assert_eq!(Distro::from_os_release(content), Distro::Debian);
    }

    #[test]
    fn test_ubuntu_via_id_like() {
        let content = "ID=linuxmint\nID_LIKE=\"ubuntu debian\"\n";
        assert_eq!(Distro::from_os_release(content), Distro::Debian);
    }

    #[test]
    fn test_fedora_family() {
        let content = "ID=\"rocky\"\nID_LIKE=\"rhel centos fedora\"\n";
        assert_eq!(Distro::from_os_release(content), Distro::Fedora);
    }

    #[test]
    fn test_arch() {
        let content = "ID=arch\n";
        assert_eq!(Distro::from_os_release(content), Distro::Arch);
    }

    #[test]
    fn test_unknown() {
        assert_eq!(Distro::from_os_release(""), Distro::Unknown);
        assert_eq!(Distro::from_os_release("ID=nixos\n"), Distro::Unknown);
    }
}
