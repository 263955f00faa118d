//! Version arithmetic and the compare-and-swap decision function.
//!
//! Every version comparison in the system goes through [`classify`]; the
//! store actor never inspects versions directly. Keeping the policy in one
//! place is what lets the conditional-write path stay a single, auditable
//! decision.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Revision counter attached to every stored entity.
///
/// Starts at 1 on creation and advances by exactly 1 on each successful
/// mutation. A version never decreases and is never reattached after the
/// entity is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(u32);

impl Version {
    /// The version stamped on a freshly created entity.
    pub fn initial() -> Self {
        Version(1)
    }

    /// The only successor a matching conditional update is allowed to write.
    pub fn next(self) -> Self {
        Version(self.0 + 1)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of comparing a caller-supplied expected version against the
/// stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionCheck {
    /// No entity is stored under the id.
    Absent,
    /// The stored version equals the expected one; a write is authorized.
    Match,
    /// The stored version differs; the caller's view is stale.
    Mismatch,
}

/// Classifies a mutation attempt.
///
/// Total over all inputs: every `(expected, current)` pair maps to exactly
/// one [`VersionCheck`]. `Match` is the only case that authorizes a write,
/// and the authorized next version is always `expected.next()`.
pub fn classify(expected: Version, current: Option<Version>) -> VersionCheck {
    match current {
        None => VersionCheck::Absent,
        Some(stored) if stored == expected => VersionCheck::Match,
        Some(_) => VersionCheck::Mismatch,
    }
}

/// Opaque revision token exchanged with callers.
///
/// Formatted like an HTTP entity tag (`"3"`). Callers only ever compare
/// tags for equality or hand them back on update; [`EntityTag::version`]
/// is how the boundary layer recovers the version, and a tag that does not
/// parse is an input error, never a conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTag(String);

impl EntityTag {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recovers the version the tag stands for, if it is well formed.
    pub fn version(&self) -> Option<Version> {
        let raw = self.0.trim().trim_matches('"');
        raw.parse::<u32>().ok().filter(|v| *v > 0).map(Version)
    }
}

impl From<Version> for EntityTag {
    fn from(version: Version) -> Self {
        EntityTag(format!("\"{}\"", version.0))
    }
}

impl From<&str> for EntityTag {
    fn from(raw: &str) -> Self {
        EntityTag(raw.to_string())
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_covers_every_case() {
        let one = Version::initial();
        let two = one.next();

        assert_eq!(classify(one, None), VersionCheck::Absent);
        assert_eq!(classify(one, Some(one)), VersionCheck::Match);
        assert_eq!(classify(one, Some(two)), VersionCheck::Mismatch);
        assert_eq!(classify(two, Some(one)), VersionCheck::Mismatch);
    }

    #[test]
    fn versions_start_at_one_and_advance_by_one() {
        let v = Version::initial();
        assert_eq!(v.get(), 1);
        assert_eq!(v.next().get(), 2);
        assert_eq!(v.next().next().get(), 3);
    }

    #[test]
    fn entity_tag_round_trips_a_version() {
        let tag = EntityTag::from(Version::initial().next());
        assert_eq!(tag.as_str(), "\"2\"");
        assert_eq!(tag.version(), Some(Version::initial().next()));
    }

    #[test]
    fn entity_tag_accepts_unquoted_input() {
        let tag = EntityTag::from("3");
        assert_eq!(tag.version(), Some(Version::initial().next().next()));
    }

    #[test]
    fn entity_tag_rejects_junk() {
        assert_eq!(EntityTag::from("").version(), None);
        assert_eq!(EntityTag::from("\"0\"").version(), None);
        assert_eq!(EntityTag::from("latest").version(), None);
        assert_eq!(EntityTag::from("\"-1\"").version(), None);
    }
}
