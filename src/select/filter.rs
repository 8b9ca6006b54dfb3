//! Include patterns on group, artifact and version.

use regex::Regex;

use crate::error::ConfigError;
use crate::maven::Coordinate;

/// Optional regexes a coordinate must match to be selected.
///
/// Matching is a search: a pattern matches when it is found anywhere in the
/// field, not only when it spans the whole value.
#[derive(Debug, Clone, Default)]
pub struct IncludePatterns {
    /// Pattern applied to `groupId`.
    pub group: Option<Regex>,
    /// Pattern applied to `artifactId`.
    pub artifact: Option<Regex>,
    /// Pattern applied to `version`.
    pub version: Option<Regex>,
}

impl IncludePatterns {
    /// Compiles the given pattern strings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] naming the offending flag when
    /// a pattern is not a valid regex.
    pub fn compile(
        group: Option<&str>,
        artifact: Option<&str>,
        version: Option<&str>,
    ) -> Result<Self, ConfigError> {
        fn one(flag: &'static str, pattern: Option<&str>) -> Result<Option<Regex>, ConfigError> {
            pattern
                .map(|p| Regex::new(p).map_err(|source| ConfigError::InvalidPattern { flag, source }))
                .transpose()
        }

        Ok(Self {
            group: one("include-group", group)?,
            artifact: one("include-artifact", artifact)?,
            version: one("include-version", version)?,
        })
    }

    /// Returns `true` if every supplied pattern is found in its field.
    #[must_use]
    pub fn matches(&self, coordinate: &Coordinate) -> bool {
        let found = |pattern: &Option<Regex>, field: &str| pattern.as_ref().map_or(true, |re| re.is_match(field));
        found(&self.group, &coordinate.group_id)
            && found(&self.artifact, &coordinate.artifact_id)
            && found(&self.version, &coordinate.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(group: &str, artifact: &str, version: &str) -> Coordinate {
        Coordinate { group_id: group.into(), artifact_id: artifact.into(), version: version.into() }
    }

    #[test]
    fn no_patterns_match_everything() {
        let patterns = IncludePatterns::default();
        assert!(patterns.matches(&coord("", "x", "1")));
    }

    #[test]
    fn patterns_search_rather_than_full_match() {
        let patterns = IncludePatterns::compile(Some(r"com\.acme"), None, Some("SNAPSHOT")).unwrap();
        assert!(patterns.matches(&coord("org.com.acme.tools", "w", "1.0-SNAPSHOT")));
        assert!(patterns.matches(&coord("com.acmex", "w", "1.0-SNAPSHOT")));
        assert!(!patterns.matches(&coord("comXacme", "w", "1.0-SNAPSHOT")));
        assert!(!patterns.matches(&coord("com.acme", "w", "1.0")));
    }

    #[test]
    fn every_supplied_pattern_must_match() {
        let patterns = IncludePatterns::compile(None, Some("^widget$"), None).unwrap();
        assert!(patterns.matches(&coord("com.acme", "widget", "1")));
        assert!(!patterns.matches(&coord("com.acme", "widget-api", "1")));
    }

    #[test]
    fn invalid_pattern_names_its_flag() {
        let err = IncludePatterns::compile(None, None, Some("(")).unwrap_err();
        assert!(err.to_string().contains("--include-version"));
    }
}
