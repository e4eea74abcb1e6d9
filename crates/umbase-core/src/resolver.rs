//! Version-data resolution.

use semver::Version;
use umbase_schema::version::{ParsedVersion, core};
use umbase_schema::{Channel, SENTINEL_KEY, VersionTable};

use crate::diagnostic::Diagnostic;

/// The block selected for a build, and how it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'a, T> {
    /// Key of the selected entry.
    pub key: &'a str,
    /// The selected block, borrowed from the table.
    pub block: &'a T,
    /// Advisory note, if the selection was not an exact or default match.
    pub diagnostic: Option<Diagnostic>,
}

impl<'a, T> Resolution<'a, T> {
    fn found((key, block): (&'a str, &'a T)) -> Self {
        Self {
            key,
            block,
            diagnostic: None,
        }
    }

    fn sentinel(table: &'a VersionTable<T>) -> Self {
        Self::found(table.sentinel_entry())
    }

    fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostic = Some(diagnostic);
        self
    }

    /// Whether the `"None"` entry was selected.
    pub fn is_fallback(&self) -> bool {
        self.key == SENTINEL_KEY
    }
}

/// Select the configuration block for a build of `requested` on `channel`.
///
/// - `testing` always gets the `"None"` entry.
/// - The stable channels take an exact key match first, then the highest
///   version not above the request, then the same comparison on
///   `major.minor.patch` only, and finally the `"None"` entry with a warning.
/// - A custom channel takes the entry keyed by its own name, else `"None"`.
///
/// Never fails: every path ends in some entry of the table.
pub fn resolve<'a, T>(
    table: &'a VersionTable<T>,
    requested: Option<&str>,
    channel: &Channel,
) -> Resolution<'a, T> {
    match channel {
        Channel::Testing => Resolution::sentinel(table),
        Channel::Stable => resolve_stable(table, requested, channel),
        Channel::Custom(name) => table
            .get_key_value(name)
            .map_or_else(|| Resolution::sentinel(table), Resolution::found),
    }
}

fn resolve_stable<'a, T>(
    table: &'a VersionTable<T>,
    requested: Option<&str>,
    channel: &Channel,
) -> Resolution<'a, T> {
    let Some(requested) = requested.filter(|v| !v.is_empty()) else {
        return Resolution::sentinel(table);
    };

    if let Some(entry) = table.get_key_value(requested) {
        return Resolution::found(entry);
    }

    let nearest = ParsedVersion::parse(requested)
        .into_version()
        .and_then(|target| {
            highest_not_above(table, &target, Version::clone)
                .or_else(|| highest_not_above(table, &core(&target), core))
        });

    match nearest {
        Some(entry) => Resolution::found(entry).with_diagnostic(Diagnostic::NearestVersion {
            requested: requested.to_string(),
            selected: entry.0.to_string(),
        }),
        None => Resolution::sentinel(table).with_diagnostic(Diagnostic::NoSatisfyingVersion {
            requested: requested.to_string(),
            channel: channel.to_string(),
            available: table.keys().map(str::to_string).collect(),
        }),
    }
}

/// Highest version key `<= target` after mapping keys through `project`.
///
/// Candidates are sorted ascending by (projected version, key) and the last
/// one wins, so equal versions spelled differently resolve the same way
/// every time.
fn highest_not_above<'a, T>(
    table: &'a VersionTable<T>,
    target: &Version,
    project: impl Fn(&Version) -> Version,
) -> Option<(&'a str, &'a T)> {
    let mut candidates: Vec<(Version, &str, &T)> = table
        .versions()
        .map(|(v, key, block)| (project(&v), key, block))
        .filter(|(v, _, _)| v <= target)
        .collect();

    candidates.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    candidates.pop().map(|(_, key, block)| (key, block))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&'static str, &'static str)]) -> VersionTable<&'static str> {
        VersionTable::new(entries.iter().copied()).unwrap()
    }

    fn monotonic() -> VersionTable<&'static str> {
        table(&[("1.0.0", "A"), ("2.0.0", "B"), ("None", "C")])
    }

    #[test]
    fn test_testing_always_uses_sentinel() {
        let t = monotonic();
        for requested in [None, Some("1.0.0"), Some("2.5.0"), Some("garbage")] {
            let r = resolve(&t, requested, &Channel::Testing);
            assert_eq!(*r.block, "C");
            assert!(r.is_fallback());
            assert_eq!(r.diagnostic, None);
        }
    }

    #[test]
    fn test_exact_match_on_stable() {
        let t = monotonic();
        let r = resolve(&t, Some("2.0.0"), &Channel::Stable);
        assert_eq!(r.key, "2.0.0");
        assert_eq!(*r.block, "B");
        assert_eq!(r.diagnostic, None);
    }

    #[test]
    fn test_monotonic_fallback() {
        let t = monotonic();
        assert_eq!(*resolve(&t, Some("1.5.0"), &Channel::Stable).block, "A");
        assert_eq!(*resolve(&t, Some("2.5.0"), &Channel::Stable).block, "B");

        let low = resolve(&t, Some("0.5.0"), &Channel::Stable);
        assert_eq!(*low.block, "C");
        assert!(matches!(
            low.diagnostic,
            Some(Diagnostic::NoSatisfyingVersion { ref requested, ref channel, ref available })
                if requested == "0.5.0" && channel == "stable" && available.len() == 3
        ));
    }

    #[test]
    fn test_nearest_version_is_reported() {
        let t = monotonic();
        let r = resolve(&t, Some("1.5.0"), &Channel::Stable);
        assert_eq!(
            r.diagnostic,
            Some(Diagnostic::NearestVersion {
                requested: "1.5.0".into(),
                selected: "1.0.0".into(),
            })
        );
    }

    #[test]
    fn test_all_stable_spellings_behave_alike() {
        let t = monotonic();
        for spelling in ["stable", "_", ""] {
            let channel = Channel::parse(spelling);
            assert_eq!(*resolve(&t, Some("1.5.0"), &channel).block, "A");
        }
    }

    #[test]
    fn test_prerelease_strip_pass() {
        let t = table(&[("1.2.3", "A"), ("None", "B")]);
        let r = resolve(&t, Some("1.2.3-rc1"), &Channel::Stable);
        assert_eq!(*r.block, "A");
        assert!(!r.is_fallback());
    }

    #[test]
    fn test_full_comparison_wins_over_core_pass() {
        // 1.2.2 <= 1.2.3-rc1 under full ordering, so the core pass never runs
        let t = table(&[("1.2.2", "old"), ("1.2.3", "new"), ("None", "default")]);
        assert_eq!(*resolve(&t, Some("1.2.3-rc1"), &Channel::Stable).block, "old");
    }

    #[test]
    fn test_prerelease_keys_order_below_release() {
        let t = table(&[("2.0.0-beta.1", "beta"), ("1.9.0", "old"), ("None", "default")]);
        assert_eq!(*resolve(&t, Some("2.0.0"), &Channel::Stable).block, "beta");
        assert_eq!(*resolve(&t, Some("2.0.0-alpha"), &Channel::Stable).block, "old");
    }

    #[test]
    fn test_short_keys_take_part_in_comparison() {
        let t = table(&[("5.1", "five-one"), ("5.2", "five-two"), ("None", "default")]);
        let r = resolve(&t, Some("5.2.4"), &Channel::Stable);
        assert_eq!(r.key, "5.2");
    }

    #[test]
    fn test_equal_versions_tie_break_on_key() {
        let t = table(&[("1.0", "short"), ("1.0.0", "full"), ("None", "default")]);
        let r = resolve(&t, Some("1.1.0"), &Channel::Stable);
        assert_eq!(r.key, "1.0.0");
    }

    #[test]
    fn test_missing_or_empty_request_uses_sentinel_quietly() {
        let t = monotonic();
        for requested in [None, Some("")] {
            let r = resolve(&t, requested, &Channel::Stable);
            assert!(r.is_fallback());
            assert_eq!(r.diagnostic, None);
        }
    }

    #[test]
    fn test_unparseable_request_warns() {
        let t = monotonic();
        let r = resolve(&t, Some("not-a-version"), &Channel::Stable);
        assert!(r.is_fallback());
        assert!(r.diagnostic.is_some_and(|d| d.is_warning()));
    }

    #[test]
    fn test_non_version_keys_are_skipped() {
        let t = table(&[("myfeature", "F"), ("1.0.0", "A"), ("None", "C")]);
        assert_eq!(*resolve(&t, Some("3.0.0"), &Channel::Stable).block, "A");
    }

    #[test]
    fn test_custom_channel() {
        let t = table(&[("myfeature", "A"), ("1.0.0", "V"), ("None", "B")]);
        let hit = resolve(&t, Some("1.0.0"), &Channel::parse("myfeature"));
        assert_eq!(*hit.block, "A");

        let miss = resolve(&t, Some("1.0.0"), &Channel::parse("unknown-channel"));
        assert_eq!(*miss.block, "B");
        assert_eq!(miss.diagnostic, None);
    }

    #[test]
    fn test_always_returns_an_entry() {
        let t = monotonic();
        let channels = ["testing", "stable", "", "_", "custom"];
        let versions = [None, Some("0.0.1"), Some("1.0.0"), Some("9.9.9-rc"), Some("x")];
        for channel in channels {
            for requested in versions {
                let r = resolve(&t, requested, &Channel::parse(channel));
                assert_eq!(t.get(r.key), Some(r.block));
            }
        }
    }
}
