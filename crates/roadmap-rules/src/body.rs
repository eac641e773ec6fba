//! Height and weight parsing for the free-text questionnaire answers.

use std::sync::LazyLock;

use regex::Regex;

const METRES_PER_INCH: f64 = 0.0254;
const KG_PER_POUND: f64 = 0.453_592_37;

/// `5'10"`, `5 ft 10 in`, `6 feet`.
static FEET_INCHES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?P<ft>\d+(?:\.\d+)?)\s*(?:'|ft\.?|feet|foot)\s*(?:(?P<in>\d+(?:\.\d+)?)\s*(?:"|''|in\.?|inch|inches)?)?$"#,
    )
    .unwrap_or_else(|e| panic!("feet/inches pattern failed to compile: {e}"))
});

/// A number with an optional alphabetic unit suffix.
static QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<num>\d+(?:\.\d+)?)\s*(?P<unit>[a-z]*)\.?$")
        .unwrap_or_else(|e| panic!("quantity pattern failed to compile: {e}"))
});

/// Parse a height answer into metres.
///
/// Bare numbers are read by magnitude: 100 and above is centimetres, below
/// 3 is metres, 3 to 8 is feet and 48 to 96 is inches.
pub fn parse_height_m(raw: &str) -> Option<f64> {
    let text = raw.trim().to_lowercase();

    if let Some(caps) = FEET_INCHES.captures(&text) {
        let feet: f64 = caps["ft"].parse().ok()?;
        let inches: f64 = caps.name("in").map_or(Ok(0.0), |m| m.as_str().parse()).ok()?;
        return plausible_height((feet * 12.0 + inches) * METRES_PER_INCH);
    }

    let caps = QUANTITY.captures(&text)?;
    let value: f64 = caps["num"].parse().ok()?;
    let metres = match &caps["unit"] {
        "cm" | "cms" => value / 100.0,
        "m" | "meter" | "meters" | "metre" | "metres" => value,
        "in" | "inch" | "inches" => value * METRES_PER_INCH,
        "" if value >= 100.0 => value / 100.0,
        "" if value < 3.0 => value,
        "" if (3.0..=8.0).contains(&value) => value * 12.0 * METRES_PER_INCH,
        "" if (48.0..=96.0).contains(&value) => value * METRES_PER_INCH,
        _ => return None,
    };
    plausible_height(metres)
}

/// Parse a weight answer into kilograms. Bare numbers are pounds.
pub fn parse_weight_kg(raw: &str) -> Option<f64> {
    let text = raw.trim().to_lowercase();
    let caps = QUANTITY.captures(&text)?;
    let value: f64 = caps["num"].parse().ok()?;
    let kg = match &caps["unit"] {
        "kg" | "kgs" | "kilo" | "kilos" | "kilogram" | "kilograms" => value,
        "" | "lb" | "lbs" | "pound" | "pounds" => value * KG_PER_POUND,
        _ => return None,
    };
    (20.0..=400.0).contains(&kg).then_some(kg)
}

/// Body-mass index from the two answers, when both parse.
pub fn bmi(height: &str, weight: &str) -> Option<f64> {
    let metres = parse_height_m(height)?;
    let kg = parse_weight_kg(weight)?;
    Some(kg / (metres * metres))
}

fn plausible_height(metres: f64) -> Option<f64> {
    (0.5..=2.75).contains(&metres).then_some(metres)
}
