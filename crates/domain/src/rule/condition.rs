//! Condition — a single field/operator/value test against an event payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::payload;

/// Comparison operator for a [`Condition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    /// Numeric comparison when both sides are numeric, string comparison
    /// otherwise.
    Equals,
    /// Negation of [`Equals`](Self::Equals). A missing field matches: an
    /// absent value is trivially not equal to anything.
    NotEquals,
    /// Substring test on the string-coerced field value.
    Contains,
    /// Strictly-greater numeric comparison; non-numeric values fail.
    GreaterThan,
    /// Strictly-less numeric comparison; non-numeric values fail.
    LessThan,
    /// True iff the field resolves to a non-null value (`0`, `false` and
    /// `""` all count as present).
    Exists,
    /// The condition value is a comma-delimited set; passes if the
    /// string-coerced field value is a member.
    In,
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Equals => "equals",
            Self::NotEquals => "notEquals",
            Self::Contains => "contains",
            Self::GreaterThan => "greaterThan",
            Self::LessThan => "lessThan",
            Self::Exists => "exists",
            Self::In => "in",
        };
        f.write_str(s)
    }
}

/// A predicate over an event payload.
///
/// All conditions in a rule must pass (logical AND); an empty condition
/// list always matches.
// No `Eq`: the comparison value is arbitrary JSON, and floats are not `Eq`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Dot-path into the event payload, e.g. `"lead.status"`.
    pub field: String,
    pub operator: Operator,
    /// Comparison value; ignored by [`Operator::Exists`].
    #[serde(default)]
    pub value: Value,
}

impl Condition {
    /// Evaluate this condition against an event payload.
    ///
    /// Never panics: anomalies (non-scalar comparisons, non-numeric values
    /// on numeric operators) fail closed and are reported at warn level.
    #[must_use]
    pub fn evaluate(&self, event_payload: &Value) -> bool {
        let resolved = payload::lookup(event_payload, &self.field);

        match self.operator {
            Operator::Exists => resolved.is_some(),
            Operator::NotEquals => match resolved {
                // Missing field: trivially not equal.
                None => true,
                Some(actual) => match compare_equals(actual, &self.value) {
                    Some(equal) => !equal,
                    None => self.fail_closed(actual),
                },
            },
            Operator::Equals => match resolved {
                None => false,
                Some(actual) => match compare_equals(actual, &self.value) {
                    Some(equal) => equal,
                    None => self.fail_closed(actual),
                },
            },
            Operator::Contains => match resolved {
                None => false,
                Some(actual) => {
                    match (
                        payload::as_scalar_string(actual),
                        payload::as_scalar_string(&self.value),
                    ) {
                        (Some(haystack), Some(needle)) => haystack.contains(&needle),
                        _ => self.fail_closed(actual),
                    }
                }
            },
            Operator::GreaterThan | Operator::LessThan => match resolved {
                None => false,
                Some(actual) => {
                    match (payload::as_number(actual), payload::as_number(&self.value)) {
                        (Some(lhs), Some(rhs)) => {
                            if self.operator == Operator::GreaterThan {
                                lhs > rhs
                            } else {
                                lhs < rhs
                            }
                        }
                        _ => false,
                    }
                }
            },
            Operator::In => match resolved {
                None => false,
                Some(actual) => {
                    match (
                        payload::as_scalar_string(actual),
                        payload::as_scalar_string(&self.value),
                    ) {
                        (Some(member), Some(set)) => {
                            set.split(',').any(|item| item.trim() == member)
                        }
                        _ => self.fail_closed(actual),
                    }
                }
            },
        }
    }

    /// Anomaly path: the condition cannot be evaluated meaningfully.
    fn fail_closed(&self, actual: &Value) -> bool {
        tracing::warn!(
            field = %self.field,
            operator = %self.operator,
            actual = %actual,
            "condition evaluation anomaly, failing closed"
        );
        false
    }
}

/// Equality with coercion: numeric when both sides are numeric, string
/// otherwise. `None` signals an anomaly (a side with no scalar form).
fn compare_equals(actual: &Value, expected: &Value) -> Option<bool> {
    if let (Some(lhs), Some(rhs)) = (payload::as_number(actual), payload::as_number(expected)) {
        return Some((lhs - rhs).abs() < f64::EPSILON);
    }
    let lhs = payload::as_scalar_string(actual)?;
    let rhs = payload::as_scalar_string(expected)?;
    Some(lhs == rhs)
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn condition(field: &str, operator: Operator, value: Value) -> Condition {
        Condition {
            field: field.to_string(),
            operator,
            value,
        }
    }

    #[test]
    fn should_match_equals_on_identical_strings() {
        let c = condition("status", Operator::Equals, json!("qualified"));
        assert!(c.evaluate(&json!({"status": "qualified"})));
        assert!(!c.evaluate(&json!({"status": "new"})));
    }

    #[test]
    fn should_match_equals_numerically_across_representations() {
        let c = condition("durationSeconds", Operator::Equals, json!("90"));
        assert!(c.evaluate(&json!({"durationSeconds": 90})));
    }

    #[test]
    fn should_coerce_number_and_string_for_equals() {
        let c = condition("percentUsed", Operator::Equals, json!(80));
        assert!(c.evaluate(&json!({"percentUsed": "80"})));
    }

    #[test]
    fn should_fail_equals_on_missing_field() {
        let c = condition("status", Operator::Equals, json!("new"));
        assert!(!c.evaluate(&json!({})));
    }

    #[test]
    fn should_match_not_equals_on_different_values() {
        let c = condition("status", Operator::NotEquals, json!("closed"));
        assert!(c.evaluate(&json!({"status": "open"})));
        assert!(!c.evaluate(&json!({"status": "closed"})));
    }

    #[test]
    fn should_match_not_equals_on_missing_field() {
        // Documented policy: a missing field is trivially not equal.
        let c = condition("status", Operator::NotEquals, json!("closed"));
        assert!(c.evaluate(&json!({})));
    }

    #[test]
    fn should_match_contains_substring() {
        let c = condition("outcome", Operator::Contains, json!("voice"));
        assert!(c.evaluate(&json!({"outcome": "voicemail"})));
        assert!(!c.evaluate(&json!({"outcome": "answered"})));
    }

    #[test]
    fn should_fail_contains_on_missing_field() {
        let c = condition("outcome", Operator::Contains, json!("voice"));
        assert!(!c.evaluate(&json!({})));
    }

    #[test]
    fn should_compare_greater_than_numerically() {
        let c = condition("durationSeconds", Operator::GreaterThan, json!(60));
        assert!(c.evaluate(&json!({"durationSeconds": 61})));
        assert!(!c.evaluate(&json!({"durationSeconds": 60})));
        assert!(!c.evaluate(&json!({"durationSeconds": 59})));
    }

    #[test]
    fn should_compare_less_than_numerically() {
        let c = condition("daysLeft", Operator::LessThan, json!(3));
        assert!(c.evaluate(&json!({"daysLeft": 2})));
        assert!(!c.evaluate(&json!({"daysLeft": 3})));
    }

    #[test]
    fn should_fail_numeric_comparison_on_non_numeric_value() {
        let c = condition("outcome", Operator::GreaterThan, json!(10));
        assert!(!c.evaluate(&json!({"outcome": "voicemail"})));
    }

    #[test]
    fn should_accept_numeric_strings_in_comparisons() {
        let c = condition("minutesUsed", Operator::GreaterThan, json!("100"));
        assert!(c.evaluate(&json!({"minutesUsed": "150"})));
    }

    #[test]
    fn should_match_exists_for_any_non_null_value() {
        let c = condition("phone", Operator::Exists, Value::Null);
        assert!(c.evaluate(&json!({"phone": 0})));
        assert!(c.evaluate(&json!({"phone": false})));
        assert!(c.evaluate(&json!({"phone": ""})));
    }

    #[test]
    fn should_fail_exists_for_missing_or_null_field() {
        let c = condition("phone", Operator::Exists, Value::Null);
        assert!(!c.evaluate(&json!({})));
        assert!(!c.evaluate(&json!({"phone": null})));
    }

    #[test]
    fn should_match_in_against_comma_delimited_set() {
        let c = condition("source", Operator::In, json!("web, phone, referral"));
        assert!(c.evaluate(&json!({"source": "phone"})));
        assert!(!c.evaluate(&json!({"source": "billboard"})));
    }

    #[test]
    fn should_match_in_with_numeric_member() {
        let c = condition("percentUsed", Operator::In, json!("80,100"));
        assert!(c.evaluate(&json!({"percentUsed": 80})));
    }

    #[test]
    fn should_fail_closed_when_field_resolves_to_object() {
        let c = condition("lead", Operator::Equals, json!("x"));
        assert!(!c.evaluate(&json!({"lead": {"name": "Jane"}})));
    }

    #[test]
    fn should_fail_closed_not_equals_on_object_value() {
        // Anomalies fail closed even for notEquals on a present field.
        let c = condition("lead", Operator::NotEquals, json!("x"));
        assert!(!c.evaluate(&json!({"lead": {"name": "Jane"}})));
    }

    #[test]
    fn should_evaluate_nested_dot_path_fields() {
        let c = condition("lead.status", Operator::Equals, json!("new"));
        assert!(c.evaluate(&json!({"lead": {"status": "new"}})));
    }

    #[test]
    fn should_roundtrip_condition_through_serde_json() {
        let c = condition("status", Operator::NotEquals, json!("spam"));
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"notEquals\""));
        let parsed: Condition = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, c);
    }

    #[test]
    fn should_default_value_to_null_when_absent() {
        let c: Condition =
            serde_json::from_str(r#"{"field": "phone", "operator": "exists"}"#).unwrap();
        assert_eq!(c.value, Value::Null);
        assert_eq!(c.operator, Operator::Exists);
    }

    #[test]
    fn should_reject_unknown_operator_when_deserializing() {
        let result: Result<Condition, _> =
            serde_json::from_str(r#"{"field": "a", "operator": "matchesRegex", "value": "x"}"#);
        assert!(result.is_err());
    }
}
