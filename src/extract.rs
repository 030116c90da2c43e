//! Turns the loosely formatted address and phone markup of a detail page into
//! structured fields.
//!
//! Every step works on an immutable snapshot: the zip code is found in the raw
//! address and removed from a copy, the neighborhood comes from the raw address
//! split on `-`, and the street address from the zip-stripped copy split on `-`.
//! Nothing here fails; a missing piece becomes an empty string.

use crate::text::collapse_whitespace;
use lazy_regex::regex;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub address: String,
    pub neighborhood: String,
    pub zip_code: String,
    pub phone: String,
}

/// Returns the first `ddddd-ddd` zip code and the address with every zip code
/// removed.
pub fn extract_zip_code(address: &str) -> (String, String) {
    let zip = regex!(r"\d{5}-\d{3}");
    let zip_code = zip
        .find(address)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    let stripped = zip.replace_all(address, "").into_owned();
    (zip_code, stripped)
}

/// Segment after the first `-`, without any 5 digit run glued to it.
pub fn extract_neighborhood(address: &str) -> String {
    match address.split('-').nth(1) {
        Some(segment) => collapse_whitespace(&regex!(r"\d{5}").replace_all(segment, "")),
        None => String::new(),
    }
}

/// Segment before the first `-`. An address without a separator is all street.
pub fn sanitize_address(address: &str) -> String {
    address
        .split('-')
        .next()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// First run of digits, e.g. the literal inside `ligarPara('11987654321')`.
pub fn extract_phone(attr: &str) -> String {
    regex!(r"\d+")
        .find(attr)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

pub fn extract_fields(raw_address: &str, raw_phone_attr: &str) -> ExtractedFields {
    let raw_address = collapse_whitespace(raw_address);
    let (zip_code, without_zip) = extract_zip_code(&raw_address);

    ExtractedFields {
        address: sanitize_address(&without_zip),
        neighborhood: extract_neighborhood(&raw_address),
        zip_code,
        phone: extract_phone(raw_phone_attr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn full_address() {
        let fields = extract_fields(
            "Rua das Flores, 123 - Centro 13201-000",
            "ligarPara('11987654321')",
        );
        assert_eq!(
            fields,
            ExtractedFields {
                address: "Rua das Flores, 123".to_string(),
                neighborhood: "Centro".to_string(),
                zip_code: "13201-000".to_string(),
                phone: "11987654321".to_string(),
            }
        );
    }

    #[test]
    fn zip_glued_to_neighborhood() {
        let fields = extract_fields(
            "Av. Nove de Julho, 1500 -\n    Anhangabaú13208-056\n",
            "",
        );
        assert_eq!(fields.address, "Av. Nove de Julho, 1500");
        assert_eq!(fields.neighborhood, "Anhangabaú");
        assert_eq!(fields.zip_code, "13208-056");
        assert_eq!(fields.phone, "");
    }

    #[test]
    fn zip_code_removed_from_working_copy() {
        let (zip, rest) = extract_zip_code("Rua A, 10 - Centro 13201-000");
        assert_eq!(zip, "13201-000");
        assert_eq!(rest, "Rua A, 10 - Centro ");

        let (zip, rest) = extract_zip_code("Rua A, 10 - Centro");
        assert_eq!(zip, "");
        assert_eq!(rest, "Rua A, 10 - Centro");
    }

    #[test]
    fn zip_code_shape_is_strict() {
        assert_eq!(extract_zip_code("Centro 13201 -000").0, "");
        assert_eq!(extract_zip_code("Centro 1320-000").0, "");
        assert_eq!(extract_zip_code("x 99999-999 y").0, "99999-999");
    }

    #[test]
    fn no_separator() {
        let fields = extract_fields("Rua Sem Bairro, 45", "tel: none");
        assert_eq!(fields.address, "Rua Sem Bairro, 45");
        assert_eq!(fields.neighborhood, "");
        assert_eq!(fields.zip_code, "");
        assert_eq!(fields.phone, "");
    }

    #[test]
    fn empty_input() {
        assert_eq!(extract_fields("", ""), ExtractedFields::default());
    }

    #[test]
    fn phone_takes_first_digit_run() {
        assert_eq!(extract_phone("ligarPara('1145231234'); track(2)"), "1145231234");
        assert_eq!(extract_phone("void(0)"), "0");
        assert_eq!(extract_phone("ligarPara()"), "");
    }

    #[test]
    fn normalizing_output_is_stable() {
        let fields = extract_fields(
            "  Rua  das   Flores, 123  -  Vila   Arens 13201-000 ",
            "",
        );
        assert_eq!(fields.address, "Rua das Flores, 123");
        assert_eq!(fields.neighborhood, "Vila Arens");
        assert_eq!(collapse_whitespace(&fields.address), fields.address);
        assert_eq!(collapse_whitespace(&fields.neighborhood), fields.neighborhood);
        assert_eq!(sanitize_address(&fields.address), fields.address);

        let again = extract_fields(
            &format!("{} - {}", fields.address, fields.neighborhood),
            "",
        );
        assert_eq!(again.address, fields.address);
        assert_eq!(again.neighborhood, fields.neighborhood);
        assert_eq!(
            extract_neighborhood(&format!("{} - {}", again.address, again.neighborhood)),
            fields.neighborhood
        );
    }
}
