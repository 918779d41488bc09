//! Attribute coercion with per-field null and default policy.
//!
//! - optional strings: absent -> `None`, present (even empty) -> `Some`
//! - usually-present numbers: absent -> caller default, present -> must parse
//! - required numbers: absent -> [`ExtractError::MissingAttribute`]
//! - optional numbers: absent or empty -> `None`, otherwise must parse

use fmi_ingest::Element;

use crate::error::{ExtractError, Result};

pub(crate) fn optional_string(element: &Element<'_>, name: &str) -> Option<String> {
    element.attribute(name).map(str::to_string)
}

pub(crate) fn float_or(element: &Element<'_>, name: &str, default: f64) -> Result<f64> {
    match element.attribute(name) {
        Some(raw) => parse_f64(name, raw),
        None => Ok(default),
    }
}

pub(crate) fn int_or(element: &Element<'_>, name: &str, default: i64) -> Result<i64> {
    match element.attribute(name) {
        Some(raw) => parse_i64(name, raw),
        None => Ok(default),
    }
}

pub(crate) fn required_float(element: &Element<'_>, name: &str) -> Result<f64> {
    parse_f64(name, required(element, name)?)
}

pub(crate) fn required_int(element: &Element<'_>, name: &str) -> Result<i64> {
    parse_i64(name, required(element, name)?)
}

pub(crate) fn optional_float(element: &Element<'_>, name: &str) -> Result<Option<f64>> {
    match element.attribute(name) {
        Some(raw) if !raw.trim().is_empty() => parse_f64(name, raw).map(Some),
        _ => Ok(None),
    }
}

fn required<'a>(element: &Element<'a>, name: &str) -> Result<&'a str> {
    element
        .attribute(name)
        .ok_or_else(|| ExtractError::MissingAttribute {
            element: element.local_name().to_string(),
            attribute: name.to_string(),
        })
}

pub(crate) fn parse_f64(field: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ExtractError::Conversion {
            field: field.to_string(),
            value: raw.to_string(),
            expected: "float",
        })
}

pub(crate) fn parse_i64(field: &str, raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ExtractError::Conversion {
            field: field.to_string(),
            value: raw.to_string(),
            expected: "integer",
        })
}

#[cfg(test)]
mod tests {
    use fmi_ingest::ReportDocument;

    use super::*;

    fn with_element<T>(xml: &str, check: impl FnOnce(&Element<'_>) -> T) -> T {
        let document = ReportDocument::parse_str(xml, "test.xml").unwrap();
        check(&document.root())
    }

    #[test]
    fn test_optional_string_keeps_empty_values() {
        with_element(r#"<e a="" b="x"/>"#, |e| {
            assert_eq!(optional_string(e, "a"), Some(String::new()));
            assert_eq!(optional_string(e, "b"), Some("x".to_string()));
            assert_eq!(optional_string(e, "c"), None);
        });
    }

    #[test]
    fn test_defaults_apply_only_when_absent() {
        with_element(r#"<e depth="120" af="0.35"/>"#, |e| {
            assert_eq!(int_or(e, "depth", 0).unwrap(), 120);
            assert_eq!(int_or(e, "missing", 0).unwrap(), 0);
            assert!((float_or(e, "af", 0.0).unwrap() - 0.35).abs() < 1e-12);
            assert_eq!(float_or(e, "missing", 0.0).unwrap(), 0.0);
        });
    }

    #[test]
    fn test_present_garbage_is_a_conversion_error() {
        with_element(r#"<e depth="deep" af="" n="1.5"/>"#, |e| {
            assert!(matches!(
                int_or(e, "depth", 0),
                Err(ExtractError::Conversion { expected: "integer", .. })
            ));
            assert!(matches!(
                float_or(e, "af", 0.0),
                Err(ExtractError::Conversion { expected: "float", .. })
            ));
            assert!(int_or(e, "n", 0).is_err());
        });
    }

    #[test]
    fn test_required_values() {
        with_element(r#"<cna copy-number=" 8 "/>"#, |e| {
            assert_eq!(required_float(e, "copy-number").unwrap(), 8.0);
            let err = required_float(e, "ratio").unwrap_err();
            assert!(matches!(
                err,
                ExtractError::MissingAttribute { ref element, ref attribute }
                    if element == "cna" && attribute == "ratio"
            ));
            assert!(required_int(e, "supporting-read-pairs").is_err());
        });
    }

    #[test]
    fn test_optional_float_treats_empty_as_null() {
        with_element(r#"<e a="" b="4.2" c="n/a"/>"#, |e| {
            assert_eq!(optional_float(e, "a").unwrap(), None);
            assert_eq!(optional_float(e, "b").unwrap(), Some(4.2));
            assert_eq!(optional_float(e, "missing").unwrap(), None);
            assert!(optional_float(e, "c").is_err());
        });
    }
}
