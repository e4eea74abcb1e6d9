//! Version-key parsing
//!
//! Table keys are either semantic versions or something else (the `"None"`
//! sentinel, a channel name, a typo). Parsing never fails; it tags the key.

use semver::Version;

use crate::table::SENTINEL_KEY;

/// Result of interpreting a table key as a version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedVersion {
    /// The key is a semantic version.
    Version(Version),
    /// The key is the sentinel or not a version at all.
    NotAVersion,
}

impl ParsedVersion {
    /// Interpret `key` as a version.
    ///
    /// Strict semver is tried first. Recipe tables often use short versions,
    /// so a leading `v` is dropped and one- or two-component cores are padded
    /// with zeros (`5.2` -> `5.2.0`, `5-beta` -> `5.0.0-beta`).
    pub fn parse(key: &str) -> Self {
        if key == SENTINEL_KEY {
            return Self::NotAVersion;
        }
        if let Ok(v) = Version::parse(key) {
            return Self::Version(v);
        }
        parse_lenient(key).map_or(Self::NotAVersion, Self::Version)
    }

    /// The parsed version, if any.
    pub fn as_version(&self) -> Option<&Version> {
        match self {
            Self::Version(v) => Some(v),
            Self::NotAVersion => None,
        }
    }

    /// Consume into the parsed version, if any.
    pub fn into_version(self) -> Option<Version> {
        match self {
            Self::Version(v) => Some(v),
            Self::NotAVersion => None,
        }
    }
}

/// Project a version onto its `major.minor.patch` core, dropping prerelease
/// and build metadata.
pub fn core(version: &Version) -> Version {
    Version::new(version.major, version.minor, version.patch)
}

fn parse_lenient(key: &str) -> Option<Version> {
    let key = key.strip_prefix(['v', 'V']).unwrap_or(key);
    let split = key.find(['-', '+']).unwrap_or(key.len());
    let (numbers, suffix) = key.split_at(split);

    let parts: Vec<&str> = numbers.split('.').collect();
    if parts.is_empty()
        || parts.len() > 3
        || parts
            .iter()
            .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    let mut padded = parts.join(".");
    for _ in parts.len()..3 {
        padded.push_str(".0");
    }
    padded.push_str(suffix);
    Version::parse(&padded).ok()
}
