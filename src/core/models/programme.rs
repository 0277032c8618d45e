//! Programme catalogue and subject targeting

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel stored on subjects that are open to every programme
pub const ALL_PROGRAMMES: &str = "For All Programmes";

/// Programmes offered, with the short form used in listings
pub const PROGRAMMES: [(&str, &str); 4] = [
    ("Degree in Computer Science (AI)", "BCS(AI)"),
    ("Degree in Computer Science (ST)", "BCS(ST)"),
    ("Degree in Computer Science (DCN)", "BCS(DCN)"),
    ("Degree in Computer Science (BIA)", "BCS(BIA)"),
];

/// Short form of a programme name (e.g. `BCS(AI)`), or the name itself when unknown
#[must_use]
pub fn abbreviate(programme: &str) -> &str {
    if programme == ALL_PROGRAMMES {
        return "ALL";
    }
    PROGRAMMES
        .iter()
        .find(|(name, _)| *name == programme)
        .map_or(programme, |(_, short)| short)
}

/// Resolve user input to a catalogue programme name.
///
/// Accepts the full name or the short form, case-insensitively. Unknown input
/// is returned trimmed so new programmes can be introduced without a release.
#[must_use]
pub fn canonical_programme(input: &str) -> String {
    let trimmed = input.trim();
    PROGRAMMES
        .iter()
        .find(|(name, short)| {
            name.eq_ignore_ascii_case(trimmed) || short.eq_ignore_ascii_case(trimmed)
        })
        .map_or_else(|| trimmed.to_string(), |(name, _)| (*name).to_string())
}

/// Which students a subject is offered to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProgrammeScope {
    /// Open to every programme
    All,
    /// Offered to a single programme
    Only(String),
}

impl ProgrammeScope {
    /// Whether a student in `programme` may take the subject
    #[must_use]
    pub fn admits(&self, programme: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(target) => target.trim() == programme.trim(),
        }
    }

    /// Parse user input; the sentinel, `all` and the `ALL` short form mean every programme
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case(ALL_PROGRAMMES)
            || trimmed.eq_ignore_ascii_case("all")
        {
            Self::All
        } else {
            Self::Only(canonical_programme(trimmed))
        }
    }

    /// Stored name of the scope
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_PROGRAMMES,
            Self::Only(programme) => programme,
        }
    }
}

impl From<String> for ProgrammeScope {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ProgrammeScope> for String {
    fn from(scope: ProgrammeScope) -> Self {
        scope.as_str().to_string()
    }
}

impl fmt::Display for ProgrammeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_parse_sentinels() {
        assert_eq!(ProgrammeScope::parse(ALL_PROGRAMMES), ProgrammeScope::All);
        assert_eq!(ProgrammeScope::parse("All"), ProgrammeScope::All);
        assert_eq!(ProgrammeScope::parse(""), ProgrammeScope::All);
    }

    #[test]
    fn test_scope_parse_short_form() {
        assert_eq!(
            ProgrammeScope::parse("bcs(ai)"),
            ProgrammeScope::Only("Degree in Computer Science (AI)".to_string())
        );
    }

    #[test]
    fn test_scope_admits() {
        let ai = ProgrammeScope::Only("Degree in Computer Science (AI)".to_string());
        assert!(ai.admits("Degree in Computer Science (AI)"));
        assert!(!ai.admits("Degree in Computer Science (ST)"));
        assert!(ProgrammeScope::All.admits("anything"));
    }

    #[test]
    fn test_abbreviate() {
        assert_eq!(abbreviate("Degree in Computer Science (DCN)"), "BCS(DCN)");
        assert_eq!(abbreviate(ALL_PROGRAMMES), "ALL");
        assert_eq!(abbreviate("Law"), "Law");
    }
}
