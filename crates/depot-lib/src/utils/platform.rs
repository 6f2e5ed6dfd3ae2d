//! Library applicability and storage paths for the host platform

use crate::models::{LibraryInfo, Rule, RuleAction};

/// Pure predicates the resolver consults for every library entry
pub trait LibraryPlatform: Send + Sync {
    /// Whether the library is usable on this platform
    fn is_library_allowed(&self, library: &LibraryInfo) -> bool;

    /// Canonical storage path of the library, relative to the libraries root
    fn library_path(&self, library: &LibraryInfo) -> String;
}

/// Operating system types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsType {
    Windows,
    MacOS,
    Linux,
}

impl OsType {
    /// Detect the current OS
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => OsType::Windows,
            "macos" => OsType::MacOS,
            _ => OsType::Linux,
        }
    }

    /// Get the OS name as a string (for rule matching)
    pub fn as_str(&self) -> &'static str {
        match self {
            OsType::Windows => "windows",
            OsType::Linux => "linux",
            OsType::MacOS => "osx",
        }
    }

    fn matches_name(&self, name: &str) -> bool {
        // Permissive mapping: treat "osx"/"macos" as interchangeable
        name == self.as_str() || (*self == OsType::MacOS && name == "macos")
    }
}

/// Architecture types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X64,
    X86,
    Arm64,
    Arm32,
}

impl Arch {
    /// Detect the current architecture
    pub fn current() -> Self {
        match std::env::consts::ARCH {
            "x86" => Arch::X86,
            "aarch64" => Arch::Arm64,
            "arm" => Arch::Arm32,
            _ => Arch::X64,
        }
    }

    /// Parse the arch names used in manifest rules
    pub fn from_rule_name(name: &str) -> Option<Self> {
        match name {
            "x64" | "amd64" | "x86_64" => Some(Arch::X64),
            "x86" => Some(Arch::X86),
            "arm64" | "aarch64" => Some(Arch::Arm64),
            "arm" | "arm32" => Some(Arch::Arm32),
            _ => None,
        }
    }

    /// Value substituted for `${arch}` in native classifiers
    pub fn bits(&self) -> &'static str {
        match self {
            Arch::X64 | Arch::Arm64 => "64",
            Arch::X86 | Arch::Arm32 => "32",
        }
    }
}

/// Evaluates library rules against a fixed OS and architecture
#[derive(Debug, Clone, Copy)]
pub struct HostPlatform {
    pub os: OsType,
    pub arch: Arch,
}

impl HostPlatform {
    pub fn new(os: OsType, arch: Arch) -> Self {
        Self { os, arch }
    }

    pub fn current() -> Self {
        Self::new(OsType::current(), Arch::current())
    }

    fn rule_matches(&self, rule: &Rule) -> bool {
        let Some(ref os_rule) = rule.os else {
            return true;
        };

        if let Some(ref name) = os_rule.name {
            if !self.os.matches_name(name) {
                return false;
            }
        }

        if let Some(ref arch) = os_rule.arch {
            if Arch::from_rule_name(arch) != Some(self.arch) {
                return false;
            }
        }

        true
    }

    /// Native classifier for this platform, with `${arch}` substituted
    fn native_classifier(&self, library: &LibraryInfo) -> Option<String> {
        let natives = library.natives.as_ref()?;
        natives
            .get(self.os.as_str())
            .or_else(|| {
                if self.os == OsType::MacOS {
                    natives.get("macos")
                } else {
                    None
                }
            })
            .map(|classifier| classifier.replace("${arch}", self.arch.bits()))
    }
}

impl LibraryPlatform for HostPlatform {
    fn is_library_allowed(&self, library: &LibraryInfo) -> bool {
        let Some(rules) = &library.rules else {
            return true;
        };

        let mut include = false;
        for rule in rules {
            if self.rule_matches(rule) {
                match rule.action {
                    RuleAction::Allow => include = true,
                    RuleAction::Disallow => include = false,
                }
            }
        }
        include
    }

    fn library_path(&self, library: &LibraryInfo) -> String {
        let coords = match self.native_classifier(library) {
            Some(classifier) => format!("{}:{}", library.name, classifier),
            None => library.name.clone(),
        };

        maven_to_path(&coords).unwrap_or_else(|| {
            log::debug!("Library '{}' has no Maven coordinates", library.name);
            library.name.replace(':', "/")
        })
    }
}

/// Convert Maven coordinates to a relative path
/// Format: group:artifact:version[:classifier][@extension]
/// Example: "com.google.guava:guava:21.0" -> "com/google/guava/guava/21.0/guava-21.0.jar"
pub fn maven_to_path(coords: &str) -> Option<String> {
    let parts: Vec<&str> = coords.split(':').collect();

    if parts.len() < 3 || parts.iter().any(|p| p.is_empty()) {
        return None;
    }

    let group = parts[0].replace('.', "/");
    let artifact = parts[1];
    let mut version = parts[2];
    let mut classifier = None;
    let mut extension = "jar";

    if parts.len() == 3 {
        // group:artifact:version@extension
        if let Some((v, ext)) = version.split_once('@') {
            version = v;
            extension = ext;
        }
    } else {
        // group:artifact:version:classifier[@extension]
        if let Some((clf, ext)) = parts[3].split_once('@') {
            classifier = Some(clf);
            extension = ext;
        } else {
            classifier = Some(parts[3]);
        }
    }

    let filename = if let Some(clf) = classifier {
        format!("{}-{}-{}.{}", artifact, version, clf, extension)
    } else {
        format!("{}-{}.{}", artifact, version, extension)
    };

    Some(format!("{}/{}/{}/{}", group, artifact, version, filename))
}
