//! Payload helpers — dot-path lookup, scalar coercion, and `{{field}}`
//! template rendering over event payloads.

use serde_json::Value;

/// Resolve a dot-path (e.g. `"lead.phone"`) inside a payload object.
///
/// Returns `None` when any segment is missing or the parent is not an
/// object. A field that resolves to JSON `null` is treated as absent.
#[must_use]
pub fn lookup<'a>(payload: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = payload;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    if current.is_null() { None } else { Some(current) }
}

/// Coerce a scalar payload value to its string form.
///
/// Arrays and objects have no scalar form and yield `None`.
#[must_use]
pub fn as_scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Coerce a payload value to a number, accepting numeric strings.
#[must_use]
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Replace `{{field}}` tokens with the matching payload values.
///
/// Tokens whose field does not resolve to a scalar are left verbatim so
/// rule authors notice malformed templates in the delivered text.
#[must_use]
pub fn render(template: &str, payload: &Value) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            // Unterminated token: keep the tail as-is.
            out.push_str(&rest[start..]);
            return out;
        };
        let field = after[..end].trim();
        match lookup(payload, field).and_then(as_scalar_string) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_resolve_top_level_field() {
        let payload = json!({"name": "Jane"});
        assert_eq!(lookup(&payload, "name"), Some(&json!("Jane")));
    }

    #[test]
    fn should_resolve_nested_dot_path() {
        let payload = json!({"lead": {"contact": {"phone": "+15551234567"}}});
        assert_eq!(
            lookup(&payload, "lead.contact.phone"),
            Some(&json!("+15551234567"))
        );
    }

    #[test]
    fn should_return_none_for_missing_field() {
        let payload = json!({"name": "Jane"});
        assert_eq!(lookup(&payload, "phone"), None);
    }

    #[test]
    fn should_return_none_when_path_traverses_scalar() {
        let payload = json!({"name": "Jane"});
        assert_eq!(lookup(&payload, "name.first"), None);
    }

    #[test]
    fn should_treat_null_field_as_absent() {
        let payload = json!({"phone": null});
        assert_eq!(lookup(&payload, "phone"), None);
    }

    #[test]
    fn should_keep_falsy_scalars_present() {
        let payload = json!({"count": 0, "active": false, "note": ""});
        assert!(lookup(&payload, "count").is_some());
        assert!(lookup(&payload, "active").is_some());
        assert!(lookup(&payload, "note").is_some());
    }

    #[test]
    fn should_coerce_scalars_to_strings() {
        assert_eq!(as_scalar_string(&json!("hi")), Some("hi".to_string()));
        assert_eq!(as_scalar_string(&json!(42)), Some("42".to_string()));
        assert_eq!(as_scalar_string(&json!(true)), Some("true".to_string()));
    }

    #[test]
    fn should_not_coerce_containers_to_strings() {
        assert_eq!(as_scalar_string(&json!([1, 2])), None);
        assert_eq!(as_scalar_string(&json!({"a": 1})), None);
    }

    #[test]
    fn should_coerce_numeric_strings_to_numbers() {
        assert_eq!(as_number(&json!("3.5")), Some(3.5));
        assert_eq!(as_number(&json!(" 7 ")), Some(7.0));
        assert_eq!(as_number(&json!(12)), Some(12.0));
        assert_eq!(as_number(&json!("twelve")), None);
    }

    #[test]
    fn should_render_known_tokens() {
        let payload = json!({"name": "Jane", "minutes": 12});
        assert_eq!(
            render("Hi {{name}}, you used {{minutes}} minutes", &payload),
            "Hi Jane, you used 12 minutes"
        );
    }

    #[test]
    fn should_leave_unresolved_tokens_verbatim() {
        let payload = json!({"name": "Jane"});
        assert_eq!(render("Hi {{nmae}}", &payload), "Hi {{nmae}}");
    }

    #[test]
    fn should_leave_unterminated_token_verbatim() {
        let payload = json!({"name": "Jane"});
        assert_eq!(render("Hi {{name", &payload), "Hi {{name");
    }

    #[test]
    fn should_render_nested_path_token() {
        let payload = json!({"lead": {"name": "Omar"}});
        assert_eq!(render("Welcome {{lead.name}}!", &payload), "Welcome Omar!");
    }

    #[test]
    fn should_render_token_with_inner_whitespace() {
        let payload = json!({"name": "Jane"});
        assert_eq!(render("Hi {{ name }}", &payload), "Hi Jane");
    }

    #[test]
    fn should_pass_through_text_without_tokens() {
        let payload = json!({});
        assert_eq!(render("plain text", &payload), "plain text");
    }
}
