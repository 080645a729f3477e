/// Route pattern parsing
///
/// - `pattern` classifies individual segments
/// - `parser` folds a whole pattern into a `ParsedPattern`

pub mod parser;
pub mod pattern;

pub use parser::{parse_pattern, ParsedPattern};
pub use pattern::{classify_segment, PatternSegmentType};
