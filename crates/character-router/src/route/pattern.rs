/// Pattern segment classification
///
/// Pure functions mapping one `/`-separated piece of a route pattern to a
/// typed segment. Same input, same output, no side effects.

/// A single segment of a route pattern
///
/// # Examples
///
/// ```
/// use character_router::route::pattern::{classify_segment, PatternSegmentType};
///
/// assert!(matches!(classify_segment("characters"), PatternSegmentType::Static(_)));
/// assert!(matches!(classify_segment(":id"), PatternSegmentType::Param(_)));
/// assert!(matches!(classify_segment("*"), PatternSegmentType::CatchAll(None)));
/// assert!(matches!(classify_segment("*rest"), PatternSegmentType::CatchAll(Some(_))));
/// assert!(matches!(
///     classify_segment(":pathMatch(.*)*"),
///     PatternSegmentType::CatchAll(Some(_))
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegmentType {
    /// Literal text that must equal the path segment
    Static(String),
    /// `:name` - exactly one non-empty path segment, bound to `name`
    Param(String),
    /// `*`, `*name` or `:name(.*)*` - the remaining suffix, possibly empty
    CatchAll(Option<String>),
}

impl PatternSegmentType {
    /// Name of the parameter this segment binds, if any
    pub fn param_name(&self) -> Option<&str> {
        match self {
            PatternSegmentType::Static(_) => None,
            PatternSegmentType::Param(name) => Some(name),
            PatternSegmentType::CatchAll(name) => name.as_deref(),
        }
    }

    /// Canonical spelling used in `Route::pattern`
    pub fn canonical(&self) -> String {
        match self {
            PatternSegmentType::Static(text) => text.clone(),
            PatternSegmentType::Param(name) => format!(":{name}"),
            PatternSegmentType::CatchAll(Some(name)) => format!("*{name}"),
            PatternSegmentType::CatchAll(None) => "*".to_string(),
        }
    }
}

/// Classifies a segment into a pattern type (pure function)
///
/// # Parsing Rules (evaluated in order)
///
/// 1. `:name(.*)*` or `:name(.*)` - named catch-all
/// 2. `*` / `*name` - catch-all
/// 3. `:name` - required parameter
/// 4. anything else - static text
pub fn classify_segment(segment: &str) -> PatternSegmentType {
    if let Some(rest) = segment.strip_prefix(':') {
        if let Some(name) = rest
            .strip_suffix("(.*)*")
            .or_else(|| rest.strip_suffix("(.*)"))
        {
            return PatternSegmentType::CatchAll(non_empty(name));
        }
        if !rest.is_empty() {
            return PatternSegmentType::Param(rest.to_string());
        }
    }

    match segment.strip_prefix('*') {
        Some(name) => PatternSegmentType::CatchAll(non_empty(name)),
        None => PatternSegmentType::Static(segment.to_string()),
    }
}

fn non_empty(name: &str) -> Option<String> {
    (!name.is_empty()).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_segment() {
        assert_eq!(
            classify_segment("characters"),
            PatternSegmentType::Static("characters".to_string())
        );
    }

    #[test]
    fn test_param_segment() {
        assert_eq!(
            classify_segment(":id"),
            PatternSegmentType::Param("id".to_string())
        );
    }

    #[test]
    fn test_bare_colon_is_static() {
        assert_eq!(
            classify_segment(":"),
            PatternSegmentType::Static(":".to_string())
        );
    }

    #[test]
    fn test_catch_all_spellings() {
        assert_eq!(classify_segment("*"), PatternSegmentType::CatchAll(None));
        assert_eq!(
            classify_segment("*rest"),
            PatternSegmentType::CatchAll(Some("rest".to_string()))
        );
        assert_eq!(
            classify_segment(":pathMatch(.*)*"),
            PatternSegmentType::CatchAll(Some("pathMatch".to_string()))
        );
        assert_eq!(
            classify_segment(":all(.*)"),
            PatternSegmentType::CatchAll(Some("all".to_string()))
        );
    }

    #[test]
    fn test_canonical_form() {
        assert_eq!(classify_segment(":pathMatch(.*)*").canonical(), "*pathMatch");
        assert_eq!(classify_segment(":id").canonical(), ":id");
        assert_eq!(classify_segment("*").canonical(), "*");
    }
}
