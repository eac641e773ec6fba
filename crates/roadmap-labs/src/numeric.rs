//! Parsing of the numeric value syntaxes emitted by lab extractors.

use std::sync::LazyLock;

use regex::Regex;
use roadmap_core::models::lab::Qualifier;

/// Optional comparator, the number (thousands separators allowed), then an
/// optional abnormal flag such as `H`, `L` or `*`.
static NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)^
        (?P<cmp><=|>=|<|>)?\s*
        (?P<num>[+-]?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?|[+-]?\.\d+)
        \s*(?:high|low|h|l|a|\*)?
        $",
    )
    .unwrap_or_else(|e| panic!("numeric value pattern failed to compile: {e}"))
});

/// A decoded numeric result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedNumber {
    pub value: f64,
    pub qualifier: Option<Qualifier>,
}

/// Parse `raw` as a lab numeric. Returns `None` for anything that is not a
/// finite number in one of the accepted forms.
pub fn parse_numeric(raw: &str) -> Option<ParsedNumber> {
    let caps = NUMERIC.captures(raw.trim())?;
    let value = caps["num"].replace(',', "").parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }
    let qualifier = caps.name("cmp").and_then(|m| Qualifier::parse(m.as_str()));
    Some(ParsedNumber { value, qualifier })
}
