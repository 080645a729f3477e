/// Pattern parsing
///
/// Turns a route pattern such as `/characters/:id` into its typed segments
/// plus the bookkeeping the router needs. Parsing folds over the segments
/// with a local accumulator.

use super::pattern::{classify_segment, PatternSegmentType};

/// Result of parsing one route pattern
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPattern {
    /// Canonical pattern, e.g. `/characters/:id` or `/*pathMatch`
    pub pattern: String,
    /// Typed segments in order
    pub segments: Vec<PatternSegmentType>,
    /// Names of every bound parameter, in order
    pub params: Vec<String>,
    /// Whether the pattern ends in a catch-all
    pub has_catch_all: bool,
}

impl ParsedPattern {
    fn with_segment(mut self, segment: PatternSegmentType) -> Self {
        self.pattern.push('/');
        self.pattern.push_str(&segment.canonical());

        if let Some(name) = segment.param_name() {
            self.params.push(name.to_string());
        }
        if matches!(segment, PatternSegmentType::CatchAll(_)) {
            self.has_catch_all = true;
        }

        self.segments.push(segment);
        self
    }

    fn finalize(mut self) -> Self {
        if self.pattern.is_empty() {
            self.pattern = "/".to_string();
        }
        self
    }
}

/// Parses a route pattern (pure function)
///
/// Empty segments are dropped, so `characters/:id/`, `/characters//:id`
/// and `/characters/:id` all parse to the same thing.
///
/// # Examples
///
/// ```
/// use character_router::route::parser::parse_pattern;
///
/// let parsed = parse_pattern("/characters/:id");
/// assert_eq!(parsed.pattern, "/characters/:id");
/// assert_eq!(parsed.params, vec!["id".to_string()]);
///
/// let parsed = parse_pattern("/:pathMatch(.*)*");
/// assert_eq!(parsed.pattern, "/*pathMatch");
/// assert!(parsed.has_catch_all);
/// ```
pub fn parse_pattern(pattern: &str) -> ParsedPattern {
    pattern
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(classify_segment)
        .fold(ParsedPattern::default(), ParsedPattern::with_segment)
        .finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_pattern() {
        let parsed = parse_pattern("/");
        assert_eq!(parsed.pattern, "/");
        assert!(parsed.segments.is_empty());
        assert!(parsed.params.is_empty());
    }

    #[test]
    fn test_pattern_without_leading_slash() {
        assert_eq!(parse_pattern("characters").pattern, "/characters");
    }

    #[test]
    fn test_messy_slashes_collapse() {
        assert_eq!(parse_pattern("//characters//:id/").pattern, "/characters/:id");
    }

    #[test]
    fn test_unnamed_catch_all_binds_nothing() {
        let parsed = parse_pattern("/*");
        assert!(parsed.has_catch_all);
        assert!(parsed.params.is_empty());
    }
}
