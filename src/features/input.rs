//! The six clinical inputs a caller supplies, and their validation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ModelError, Result};

/// Accepted closed interval for a numeric input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
}

impl FieldRange {
    pub const AGE: FieldRange = FieldRange::new("age", 1.0, 120.0);
    pub const HBA1C: FieldRange = FieldRange::new("hba1c", 0.0, 20.0);
    pub const BMI: FieldRange = FieldRange::new("bmi", 10.0, 60.0);
    pub const CHOLESTEROL: FieldRange = FieldRange::new("chol", 0.0, 600.0);
    pub const TRIGLYCERIDES: FieldRange = FieldRange::new("tg", 0.0, 2000.0);

    const fn new(field: &'static str, min: f64, max: f64) -> Self {
        Self { field, min, max }
    }

    fn check(&self, value: f64) -> Result<f64> {
        if !value.is_finite() {
            return Err(ModelError::invalid_input(self.field, "must be a finite number"));
        }
        if value < self.min || value > self.max {
            return Err(ModelError::invalid_input(
                self.field,
                format!("{value} is outside {}..={}", self.min, self.max),
            ));
        }
        Ok(value)
    }
}

/// One prediction request.
///
/// Wire names are `age`, `gender`, `hba1c`, `bmi`, `chol`, `tg`; the long
/// forms `genderLabel`, `cholesterol` and `triglycerides` are accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    pub age: i64,
    #[serde(alias = "genderLabel")]
    pub gender: String,
    pub hba1c: f64,
    pub bmi: f64,
    #[serde(rename = "chol", alias = "cholesterol")]
    pub cholesterol: f64,
    #[serde(rename = "tg", alias = "triglycerides")]
    pub triglycerides: f64,
}

impl RawInput {
    /// Extract and type-check the six fields from a JSON object.
    ///
    /// Fails with [`ModelError::InvalidInput`] naming the first field that is
    /// absent, `null`, or of the wrong JSON type. Values are not range-checked
    /// here; see [`validate`](Self::validate).
    pub fn from_json(value: &Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| ModelError::invalid_input("body", "expected a JSON object"))?;

        Ok(Self {
            age: integer_field(obj, "age", &[])?,
            gender: string_field(obj, "gender", &["genderLabel"])?,
            hba1c: number_field(obj, "hba1c", &[])?,
            bmi: number_field(obj, "bmi", &[])?,
            cholesterol: number_field(obj, "chol", &["cholesterol"])?,
            triglycerides: number_field(obj, "tg", &["triglycerides"])?,
        })
    }

    /// Check every numeric field is finite and inside its [`FieldRange`].
    pub fn validate(&self) -> Result<()> {
        FieldRange::AGE.check(self.age as f64)?;
        FieldRange::HBA1C.check(self.hba1c)?;
        FieldRange::BMI.check(self.bmi)?;
        FieldRange::CHOLESTEROL.check(self.cholesterol)?;
        FieldRange::TRIGLYCERIDES.check(self.triglycerides)?;
        Ok(())
    }
}

fn lookup<'a>(
    obj: &'a Map<String, Value>,
    field: &'static str,
    aliases: &[&str],
) -> Result<&'a Value> {
    std::iter::once(field)
        .chain(aliases.iter().copied())
        .find_map(|key| obj.get(key).filter(|v| !v.is_null()))
        .ok_or_else(|| ModelError::invalid_input(field, "missing"))
}

fn number_field(obj: &Map<String, Value>, field: &'static str, aliases: &[&str]) -> Result<f64> {
    lookup(obj, field, aliases)?
        .as_f64()
        .ok_or_else(|| ModelError::invalid_input(field, "must be a number"))
}

fn integer_field(obj: &Map<String, Value>, field: &'static str, aliases: &[&str]) -> Result<i64> {
    let value = lookup(obj, field, aliases)?;
    if let Some(i) = value.as_i64() {
        return Ok(i);
    }
    match value.as_f64() {
        // 30.0 is accepted as 30; 30.5 is not an age in years.
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        Some(_) => Err(ModelError::invalid_input(field, "must be a whole number")),
        None => Err(ModelError::invalid_input(field, "must be a number")),
    }
}

fn string_field(obj: &Map<String, Value>, field: &'static str, aliases: &[&str]) -> Result<String> {
    lookup(obj, field, aliases)?
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| ModelError::invalid_input(field, "must be a string"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn body() -> Value {
        json!({"age": 45, "gender": "F", "hba1c": 6.1, "bmi": 27.5, "chol": 190.0, "tg": 140.0})
    }

    #[test]
    fn parses_wire_names() {
        let input = RawInput::from_json(&body()).unwrap();
        assert_eq!(
            input,
            RawInput {
                age: 45,
                gender: "F".into(),
                hba1c: 6.1,
                bmi: 27.5,
                cholesterol: 190.0,
                triglycerides: 140.0,
            }
        );
        assert!(input.validate().is_ok());
    }

    #[test]
    fn parses_long_names() {
        let long = json!({
            "age": 45.0, "genderLabel": "F", "hba1c": 6.1, "bmi": 27.5,
            "cholesterol": 190.0, "triglycerides": 140.0,
        });
        assert_eq!(
            RawInput::from_json(&long).unwrap(),
            RawInput::from_json(&body()).unwrap()
        );
    }

    #[test]
    fn serde_accepts_aliases() {
        let input: RawInput = serde_json::from_value(json!({
            "age": 45, "genderLabel": "F", "hba1c": 6.1, "bmi": 27.5,
            "cholesterol": 190.0, "tg": 140.0,
        }))
        .unwrap();
        assert_eq!(input, RawInput::from_json(&body()).unwrap());
    }

    #[rstest]
    #[case("age")]
    #[case("gender")]
    #[case("hba1c")]
    #[case("bmi")]
    #[case("chol")]
    #[case("tg")]
    fn missing_field_is_invalid_input(#[case] field: &str) {
        let mut value = body();
        value.as_object_mut().unwrap().remove(field);
        match RawInput::from_json(&value) {
            Err(ModelError::InvalidInput { field: f, reason }) => {
                assert_eq!(f, field);
                assert_eq!(reason, "missing");
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[rstest]
    #[case("bmi", json!(null), "missing")]
    #[case("bmi", json!("27.5"), "must be a number")]
    #[case("gender", json!(1), "must be a string")]
    #[case("age", json!(30.5), "must be a whole number")]
    #[case("age", json!("30"), "must be a number")]
    fn mistyped_field_is_invalid_input(
        #[case] field: &str,
        #[case] bad: Value,
        #[case] expected_reason: &str,
    ) {
        let mut value = body();
        value[field] = bad;
        match RawInput::from_json(&value) {
            Err(ModelError::InvalidInput { field: f, reason }) => {
                assert_eq!(f, field);
                assert_eq!(reason, expected_reason);
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn non_object_body_rejected() {
        assert!(matches!(
            RawInput::from_json(&json!([1, 2, 3])),
            Err(ModelError::InvalidInput { field: "body", .. })
        ));
    }

    #[rstest]
    #[case(RawInput { age: 0, ..sample() }, "age")]
    #[case(RawInput { age: 121, ..sample() }, "age")]
    #[case(RawInput { hba1c: -0.1, ..sample() }, "hba1c")]
    #[case(RawInput { bmi: 9.9, ..sample() }, "bmi")]
    #[case(RawInput { cholesterol: f64::NAN, ..sample() }, "chol")]
    #[case(RawInput { triglycerides: 2000.5, ..sample() }, "tg")]
    fn out_of_range_rejected(#[case] input: RawInput, #[case] field: &str) {
        match input.validate() {
            Err(ModelError::InvalidInput { field: f, .. }) => assert_eq!(f, field),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let low = RawInput { age: 1, hba1c: 0.0, bmi: 10.0, cholesterol: 0.0, triglycerides: 0.0, ..sample() };
        let high = RawInput { age: 120, hba1c: 20.0, bmi: 60.0, cholesterol: 600.0, triglycerides: 2000.0, ..sample() };
        assert!(low.validate().is_ok());
        assert!(high.validate().is_ok());
    }

    fn sample() -> RawInput {
        RawInput::from_json(&body()).unwrap()
    }
}
