//! Decoding of categorical genetics results.

use roadmap_core::models::lab::MthfrStatus;

/// Decode an APOE genotype such as `E3/E4` into its two alleles, in the
/// order written. Case and whitespace are ignored; the `E` prefix is
/// optional.
pub fn decode_apoe(raw: &str) -> Option<(u8, u8)> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let (first, second) = compact.split_once('/')?;
    Some((decode_allele(first)?, decode_allele(second)?))
}

/// Inverse of [`decode_apoe`].
pub fn encode_apoe(first: u8, second: u8) -> String {
    format!("E{first}/E{second}")
}

/// Decode a single allele (`4`, `E4`, `e4`). Only 2, 3 and 4 exist.
pub fn decode_allele(raw: &str) -> Option<u8> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix('E')
        .or_else(|| trimmed.strip_prefix('e'))
        .unwrap_or(trimmed);
    match digits.parse::<u8>().ok()? {
        allele @ 2..=4 => Some(allele),
        _ => None,
    }
}

/// Collapse a free-form MTHFR description to its zygosity.
///
/// `Not Detected` always means normal. Otherwise `Homozygous` wins, then
/// `Heterozygous` or a bare `Detected`.
pub fn decode_mthfr(raw: &str) -> Option<MthfrStatus> {
    let text = raw.to_lowercase();
    if text.contains("not detected") {
        Some(MthfrStatus::Normal)
    } else if text.contains("homozygous") {
        Some(MthfrStatus::Homozygous)
    } else if text.contains("heterozygous") || text.contains("detected") {
        Some(MthfrStatus::Heterozygous)
    } else if text.contains("normal") || text.contains("negative") || text.contains("wild") {
        Some(MthfrStatus::Normal)
    } else {
        None
    }
}
