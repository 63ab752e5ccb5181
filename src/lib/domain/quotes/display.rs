//! Display helpers shared by the plain text and HTML renderings

use super::request::FieldValue;

/// Shown in place of any missing or blank value
pub const PLACEHOLDER: &str = "—";

/// Returns the trimmed value, or [`PLACEHOLDER`] when it is absent or blank.
pub fn value_or_dash(value: Option<&FieldValue>) -> String {
    value
        .and_then(FieldValue::non_blank)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Joins the trimmed, non-blank items with `", "`, or returns [`PLACEHOLDER`]
/// when none are left.
pub fn list_or_dash(values: &[FieldValue]) -> String {
    let items: Vec<String> = values.iter().filter_map(FieldValue::non_blank).collect();

    if items.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Number;

    use super::*;

    #[test]
    fn test_value_or_dash() {
        assert_eq!(value_or_dash(None), PLACEHOLDER);
        assert_eq!(value_or_dash(Some(&FieldValue::from(""))), PLACEHOLDER);
        assert_eq!(value_or_dash(Some(&FieldValue::from(" \t "))), PLACEHOLDER);
        assert_eq!(value_or_dash(Some(&FieldValue::from(" Lyon "))), "Lyon");
        assert_eq!(
            value_or_dash(Some(&FieldValue::Number(Number::from(5u64)))),
            "5"
        );
    }

    #[test]
    fn test_list_or_dash() {
        assert_eq!(list_or_dash(&[]), PLACEHOLDER);
        assert_eq!(
            list_or_dash(&[FieldValue::from(" Bureaux "), FieldValue::from("Cuisine")]),
            "Bureaux, Cuisine"
        );
        assert_eq!(
            list_or_dash(&[FieldValue::from("Hall"), FieldValue::from("  ")]),
            "Hall"
        );
    }

    #[test]
    fn test_list_of_blank_items_is_placeholder() {
        assert_eq!(
            list_or_dash(&[FieldValue::from(""), FieldValue::from(" ")]),
            PLACEHOLDER
        );
    }
}
