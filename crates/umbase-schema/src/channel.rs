//! Build channels
//!
//! A channel names the track a recipe is built for. Three spellings are
//! reserved for the stable track (`stable`, `_` and the empty string),
//! `testing` is the unpinned development track, and everything else is a
//! custom channel (usually a feature-branch ticket id).

use serde::{Deserialize, Serialize};

/// Length of a ticket-style channel such as `CURA-1234`.
const TICKET_CHANNEL_LEN: usize = 9;

/// Prefix of branch names that map onto a ticket channel.
const TICKET_PREFIX: &str = "CURA-";

/// A classified build channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Channel {
    /// Development builds. Always resolve to the unpinned default entry.
    Testing,
    /// Release builds (`stable`, `_` or empty).
    #[default]
    Stable,
    /// Any other channel name, matched literally against table keys.
    Custom(String),
}

impl Channel {
    /// Classify a channel string. Every input maps to exactly one variant.
    pub fn parse(channel: &str) -> Self {
        match channel {
            "testing" => Self::Testing,
            "stable" | "_" | "" => Self::Stable,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Derive the channel a git ref is exported under.
    ///
    /// `main` exports to `stable`, `dev` to `testing`, and ticket branches
    /// (`CURA-1234_some_feature`) are cut down to their ticket id.
    pub fn from_ref_name(ref_name: &str) -> Self {
        match ref_name {
            "main" => Self::Stable,
            "dev" => Self::Testing,
            name if name.starts_with(TICKET_PREFIX) && name.chars().count() >= TICKET_CHANNEL_LEN => {
                Self::parse(&name.chars().take(TICKET_CHANNEL_LEN).collect::<String>())
            }
            name => Self::parse(name),
        }
    }

    /// Canonical spelling of the channel.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Testing => "testing",
            Self::Stable => "stable",
            Self::Custom(name) => name,
        }
    }

    /// Whether this is one of the reserved channels.
    pub fn is_reserved(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Channel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Channel {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for Channel {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<Channel> for String {
    fn from(channel: Channel) -> Self {
        channel.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_spellings() {
        assert_eq!(Channel::parse("testing"), Channel::Testing);
        assert_eq!(Channel::parse("stable"), Channel::Stable);
        assert_eq!(Channel::parse("_"), Channel::Stable);
        assert_eq!(Channel::parse(""), Channel::Stable);
    }

    #[test]
    fn test_custom_channel() {
        let channel = Channel::parse("myfeature");
        assert_eq!(channel, Channel::Custom("myfeature".to_string()));
        assert!(!channel.is_reserved());
        assert_eq!(channel.to_string(), "myfeature");
    }

    #[test]
    fn test_channel_names_are_case_sensitive() {
        assert_eq!(
            Channel::parse("Stable"),
            Channel::Custom("Stable".to_string())
        );
    }

    #[test]
    fn test_from_ref_name() {
        assert_eq!(Channel::from_ref_name("main"), Channel::Stable);
        assert_eq!(Channel::from_ref_name("dev"), Channel::Testing);
        assert_eq!(
            Channel::from_ref_name("CURA-9876_fix_the_thing"),
            Channel::Custom("CURA-9876".to_string())
        );
        assert_eq!(
            Channel::from_ref_name("CURA-12"),
            Channel::Custom("CURA-12".to_string())
        );
        assert_eq!(
            Channel::from_ref_name("release"),
            Channel::Custom("release".to_string())
        );
        // A branch literally named "testing" still classifies
        assert_eq!(Channel::from_ref_name("testing"), Channel::Testing);
    }

    #[test]
    fn test_serde_uses_canonical_spelling() {
        let yaml = serde_yaml::to_string(&Channel::Stable).unwrap();
        assert_eq!(yaml.trim(), "stable");

        let parsed: Channel = serde_yaml::from_str("_").unwrap();
        assert_eq!(parsed, Channel::Stable);
    }
}
