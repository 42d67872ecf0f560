//! # Violation Formatter
//!
//! Turns one violation into the leading half of a user message. The
//! fragment always ends with a connective (`" in "` / `" present in "`) so
//! the location resolver's context can be appended directly.

use crate::engine::{Violation, ViolationDetail};

/// Format the keyword-specific fragment of a violation.
///
/// A keyword without its matching detail falls back to the engine message.
pub fn format_violation(violation: &Violation) -> String {
    match (violation.keyword.as_str(), &violation.detail) {
        ("additionalProperties", ViolationDetail::AdditionalProperties { unwanted }) => {
            format!("Unknown fields {} present in ", field_list(unwanted))
        }
        ("required", ViolationDetail::Required { missing }) => {
            format!("Missing required fields {} in ", field_list(missing))
        }
        _ => format!("{} in ", violation.message),
    }
}

/// `[a, b, c]`
fn field_list(fields: &[String]) -> String {
    format!("[{}]", fields.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Severity;
    use catalint_core::InstancePath;

    fn violation(keyword: &str, message: &str, detail: ViolationDetail) -> Violation {
        Violation {
            pointer: InstancePath::parse(""),
            keyword: keyword.to_string(),
            severity: Severity::Error,
            message: message.to_string(),
            detail,
        }
    }

    #[test]
    fn additional_properties() {
        let v = violation(
            "additionalProperties",
            "ignored",
            ViolationDetail::AdditionalProperties {
                unwanted: vec!["foo".into(), "bar".into()],
            },
        );
        assert_eq!(format_violation(&v), "Unknown fields [foo, bar] present in ");
    }

    #[test]
    fn required() {
        let v = violation(
            "required",
            "ignored",
            ViolationDetail::Required {
                missing: vec!["pfn".into()],
            },
        );
        assert_eq!(format_violation(&v), "Missing required fields [pfn] in ");
    }

    #[test]
    fn other_keyword_uses_engine_message() {
        let v = violation(
            "type",
            "\"x\" is not of type \"object\"",
            ViolationDetail::None,
        );
        assert_eq!(format_violation(&v), "\"x\" is not of type \"object\" in ");
    }

    #[test]
    fn keyword_without_matching_detail_uses_engine_message() {
        let v = violation("required", "False schema does not allow 1", ViolationDetail::None);
        assert_eq!(format_violation(&v), "False schema does not allow 1 in ");

        let v = violation(
            "additionalProperties",
            "False schema does not allow 2",
            ViolationDetail::None,
        );
        assert_eq!(format_violation(&v), "False schema does not allow 2 in ");
    }

    #[test]
    fn mismatched_detail_uses_engine_message() {
        let v = violation(
            "required",
            "engine text",
            ViolationDetail::AdditionalProperties {
                unwanted: vec!["x".into()],
            },
        );
        assert_eq!(format_violation(&v), "engine text in ");
    }
}
