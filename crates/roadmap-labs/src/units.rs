//! Unit spelling normalisation.

/// Canonical spelling for comparison: lower case, no whitespace, micro
/// sign folded to `u`.
pub fn normalize(unit: &str) -> String {
    unit.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            'µ' | 'μ' => 'u',
            other => other,
        })
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn same_unit(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}
