use roadmap_rules::body::{bmi, parse_height_m, parse_weight_kg};
use roadmap_rules::format::format_number;

fn close(actual: Option<f64>, expected: f64) -> bool {
    actual.is_some_and(|v| (v - expected).abs() < 1e-3)
}

#[test]
fn heights_in_common_spellings() {
    assert!(close(parse_height_m("5'10\""), 1.778));
    assert!(close(parse_height_m("5 ft 10 in"), 1.778));
    assert!(close(parse_height_m("6 feet"), 1.8288));
    assert!(close(parse_height_m("170 cm"), 1.70));
    assert!(close(parse_height_m("1.7 m"), 1.70));
    assert!(close(parse_height_m("68 inches"), 1.7272));
}

#[test]
fn bare_heights_are_read_by_magnitude() {
    assert!(close(parse_height_m("172"), 1.72));
    assert!(close(parse_height_m("1.65"), 1.65));
    assert!(close(parse_height_m("5.5"), 1.6764));
    assert!(close(parse_height_m("66"), 1.6764));
    assert_eq!(parse_height_m("30"), None);
}

#[test]
fn implausible_or_garbled_heights_are_rejected() {
    assert_eq!(parse_height_m("tall"), None);
    assert_eq!(parse_height_m("400 cm"), None);
    assert_eq!(parse_height_m(""), None);
}

#[test]
fn weights_default_to_pounds() {
    assert!(close(parse_weight_kg("150"), 68.039));
    assert!(close(parse_weight_kg("150 lbs"), 68.039));
    assert!(close(parse_weight_kg("70 kg"), 70.0));
    assert_eq!(parse_weight_kg("5 stone"), None);
    assert_eq!(parse_weight_kg("2000"), None);
}

#[test]
fn bmi_needs_both_answers() {
    assert!(close(bmi("180 cm", "81 kg"), 25.0));
    assert_eq!(bmi("180 cm", "heavy"), None);
}

#[test]
fn numbers_are_formatted_without_trailing_zeros() {
    assert_eq!(format_number(25.0, 2), "25");
    assert_eq!(format_number(1.5, 2), "1.5");
    assert_eq!(format_number(1.234_56, 2), "1.23");
    assert_eq!(format_number(28.696, 1), "28.7");
    assert_eq!(format_number(-0.001, 2), "0");
    assert_eq!(format_number(1250.0, 0), "1250");
}
