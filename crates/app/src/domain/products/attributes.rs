//! Validation of product attribute values against the category's
//! declared attribute set.

use serde_json::Value;

use crate::domain::{
    categories::records::{AttributeKind, AttributeSpec},
    products::records::AttributeValues,
};

/// Check attribute values against the category's declarations.
///
/// Unknown keys are rejected so a category's attribute set stays the
/// single source of truth for what a product may carry.
pub fn validate_attributes(
    specs: &[AttributeSpec],
    values: &AttributeValues,
) -> Result<(), &'static str> {
    for key in values.keys() {
        if !specs.iter().any(|spec| spec.key == *key) {
            return Err("attribute is not declared by the category");
        }
    }

    for spec in specs {
        match values.get(&spec.key) {
            None if spec.required => return Err("required attribute is missing"),
            None => {}
            Some(value) => validate_value(spec, value)?,
        }
    }

    Ok(())
}

fn validate_value(spec: &AttributeSpec, value: &Value) -> Result<(), &'static str> {
    match spec.kind {
        AttributeKind::Text => match value {
            Value::String(_) => Ok(()),
            _ => Err("attribute must be text"),
        },
        AttributeKind::Integer => match value {
            Value::Number(number) if number.is_i64() => Ok(()),
            _ => Err("attribute must be a whole number"),
        },
        AttributeKind::Flag => match value {
            Value::Bool(_) => Ok(()),
            _ => Err("attribute must be true or false"),
        },
        AttributeKind::Select => match value {
            Value::String(choice) if spec.options.iter().any(|option| option == choice) => Ok(()),
            Value::String(_) => Err("attribute is not one of the allowed options"),
            _ => Err("attribute must be one of the allowed options"),
        },
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn specs() -> Vec<AttributeSpec> {
        vec![
            AttributeSpec {
                key: "length_mm".to_string(),
                kind: AttributeKind::Integer,
                options: vec![],
                required: true,
            },
            AttributeSpec {
                key: "grade".to_string(),
                kind: AttributeKind::Select,
                options: vec!["a".to_string(), "b".to_string()],
                required: false,
            },
            AttributeSpec {
                key: "treated".to_string(),
                kind: AttributeKind::Flag,
                options: vec![],
                required: false,
            },
        ]
    }

    fn values(entries: &[(&str, Value)]) -> AttributeValues {
        entries
            .iter()
            .map(|(key, value)| ((*key).to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn valid_values_pass() {
        let result = validate_attributes(
            &specs(),
            &values(&[
                ("length_mm", json!(2400)),
                ("grade", json!("a")),
                ("treated", json!(true)),
            ]),
        );

        assert_eq!(result, Ok(()));
    }

    #[test]
    fn missing_required_attribute_fails() {
        assert!(validate_attributes(&specs(), &values(&[("grade", json!("a"))])).is_err());
    }

    #[test]
    fn undeclared_attribute_fails() {
        assert!(
            validate_attributes(
                &specs(),
                &values(&[("length_mm", json!(1)), ("color", json!("red"))])
            )
            .is_err()
        );
    }

    #[test]
    fn wrong_kinds_fail() {
        assert!(
            validate_attributes(&specs(), &values(&[("length_mm", json!("long"))])).is_err()
        );
        assert!(
            validate_attributes(
                &specs(),
                &values(&[("length_mm", json!(1)), ("grade", json!("z"))])
            )
            .is_err()
        );
        assert!(
            validate_attributes(
                &specs(),
                &values(&[("length_mm", json!(1)), ("treated", json!("yes"))])
            )
            .is_err()
        );
    }

    #[test]
    fn fractional_numbers_are_not_integers() {
        assert!(
            validate_attributes(&specs(), &values(&[("length_mm", json!(2.5))])).is_err()
        );
    }

    #[test]
    fn optional_attributes_may_be_omitted() {
        assert_eq!(
            validate_attributes(&specs(), &values(&[("length_mm", json!(100))])),
            Ok(())
        );
    }
}
