//! Advisory messages produced by resolution.
//!
//! The resolver returns these instead of logging, so it stays pure. Callers
//! decide whether to [`Diagnostic::emit`] them.

use serde::Serialize;

/// A non-fatal note about how a block was selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// No exact key matched; the closest lower version was used instead.
    NearestVersion {
        /// Version the recipe is built for.
        requested: String,
        /// Key whose block was selected.
        selected: String,
    },
    /// Nothing at or below the requested version; the `"None"` entry was used.
    NoSatisfyingVersion {
        /// Version the recipe is built for.
        requested: String,
        /// Channel the recipe is built for.
        channel: String,
        /// Every key in the table, in declaration order.
        available: Vec<String>,
    },
}

impl Diagnostic {
    /// Whether this should be surfaced as a warning.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::NoSatisfyingVersion { .. })
    }

    /// Log through `tracing`: warnings at WARN, the rest at INFO.
    pub fn emit(&self) {
        if self.is_warning() {
            tracing::warn!("{self}");
        } else {
            tracing::info!("{self}");
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NearestVersion {
                requested,
                selected,
            } => write!(
                f,
                "Using data specified for version {selected} while recipe is built for version {requested}"
            ),
            Self::NoSatisfyingVersion {
                requested,
                channel,
                available,
            } => write!(
                f,
                "No data satisfies version {requested} on channel '{channel}' (available: {}), using defaults",
                available.join(", ")
            ),
        }
    }
}
