//! Payload normalization - raw JSON to `ApplicationRequest`.
//!
//! The front-end sends birth dates in whatever textual form the browser
//! produced (`Date.toISOString()`, a bare `YYYY-MM-DD`, or a Spanish
//! `DD/MM/YYYY`). Dates are rewritten to their canonical `YYYY-MM-DD` form in
//! place. Nothing else is coerced or dropped.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use super::errors::InputNormalizationError;
use super::request::{ApplicationRequest, BIRTH_DATE_KEY, HOLDERS_KEY, PERSONAL_KEY};
use crate::domain::json::kind_of;

const DATE_FIELDS: &[&str] = &[BIRTH_DATE_KEY];

/// Checks the outer shape of a raw payload and canonicalizes its dates.
///
/// # Errors
///
/// - `NotAnObject` / `InvalidShape` when the outer structure is wrong
/// - `NoHolders` when the application lists no holder at all
/// - `InvalidDate` when a date field cannot be parsed
pub fn normalize_application(payload: Value) -> Result<ApplicationRequest, InputNormalizationError> {
    let actual = kind_of(&payload);
    let Value::Object(mut root) = payload else {
        return Err(InputNormalizationError::NotAnObject { actual });
    };

    let holders = match root.get_mut(HOLDERS_KEY) {
        Some(Value::Array(items)) if !items.is_empty() => items,
        None | Some(Value::Null) | Some(Value::Array(_)) => {
            return Err(InputNormalizationError::NoHolders);
        }
        Some(other) => {
            return Err(InputNormalizationError::InvalidShape {
                field: HOLDERS_KEY.to_string(),
                expected: "array",
                actual: kind_of(other),
            });
        }
    };

    for (index, holder) in holders.iter_mut().enumerate() {
        normalize_holder_dates(holder, index)?;
    }

    Ok(ApplicationRequest::from_checked(root))
}

/// Rewrites the date fields of one holder. Holders or personal blocks that
/// are not objects carry no dates and pass through untouched.
fn normalize_holder_dates(holder: &mut Value, index: usize) -> Result<(), InputNormalizationError> {
    let Some(Value::Object(fields)) = holder.get_mut(PERSONAL_KEY) else {
        return Ok(());
    };

    for key in DATE_FIELDS {
        let Some(value) = fields.get_mut(*key) else {
            continue;
        };
        let field = format!("{}[{}].{}.{}", HOLDERS_KEY, index, PERSONAL_KEY, key);

        *value = match value {
            Value::Null => Value::Null,
            Value::String(text) if text.trim().is_empty() => Value::Null,
            Value::String(text) => {
                let date = parse_date(text).ok_or_else(|| InputNormalizationError::InvalidDate {
                    field: field.clone(),
                    value: text.clone(),
                })?;
                Value::String(date.format("%Y-%m-%d").to_string())
            }
            other => {
                return Err(InputNormalizationError::InvalidDate {
                    field,
                    value: other.to_string(),
                });
            }
        };
    }

    Ok(())
}

/// Parses the textual date forms accepted from the front-end.
///
/// Timestamps keep the calendar date of their own offset, so
/// `1990-05-20T00:00:00.000Z` is 20 May 1990.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%d/%m/%Y") {
        return Some(date);
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.date())
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload_with_birth_date(value: Value) -> Value {
        json!({
            "titulares": [{
                "datos_personales": { "SITUACION_LABORAL": "Empleado", "FECHA_NACIMIENTO": value },
                "ingresos": [{ "TIPO": "NÓMINA", "MONTO": 5500, "PERIODO": "MENSUAL", "FRECUENCIA": 12 }]
            }],
            "solicitud": { "importe": 150000, "anios": 25, "precio_tasacion": 175000 }
        })
    }

    fn birth_date_of(request: &ApplicationRequest) -> &Value {
        &request.holders()[0][PERSONAL_KEY][BIRTH_DATE_KEY]
    }

    #[test]
    fn parses_iso_timestamp_from_browser() {
        let request =
            normalize_application(payload_with_birth_date(json!("1990-05-20T00:00:00.000Z"))).unwrap();
        assert_eq!(birth_date_of(&request), &json!("1990-05-20"));
    }

    #[test]
    fn parses_plain_and_spanish_dates() {
        for text in ["1990-05-20", "20/05/1990", " 1990-05-20 ", "1990-05-20T08:30:00"] {
            let request = normalize_application(payload_with_birth_date(json!(text))).unwrap();
            assert_eq!(birth_date_of(&request), &json!("1990-05-20"), "failed for {text}");
        }
    }

    #[test]
    fn timestamp_keeps_its_own_calendar_day() {
        assert_eq!(
            parse_date("1990-05-20T23:30:00-05:00"),
            NaiveDate::from_ymd_opt(1990, 5, 20)
        );
    }

    #[test]
    fn null_and_blank_dates_become_null() {
        for value in [json!(null), json!(""), json!("   ")] {
            let request = normalize_application(payload_with_birth_date(value)).unwrap();
            assert_eq!(birth_date_of(&request), &Value::Null);
        }
    }

    #[test]
    fn unparseable_date_is_rejected_with_path() {
        let err = normalize_application(payload_with_birth_date(json!("ayer"))).unwrap_err();
        assert_eq!(
            err,
            InputNormalizationError::InvalidDate {
                field: "titulares[0].datos_personales.FECHA_NACIMIENTO".to_string(),
                value: "ayer".to_string(),
            }
        );
    }

    #[test]
    fn numeric_date_is_rejected() {
        let err = normalize_application(payload_with_birth_date(json!(19900520))).unwrap_err();
        assert!(matches!(err, InputNormalizationError::InvalidDate { .. }));
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let err = normalize_application(json!([1, 2, 3])).unwrap_err();
        assert_eq!(err, InputNormalizationError::NotAnObject { actual: "array" });
    }

    #[test]
    fn holders_must_be_an_array() {
        let err = normalize_application(json!({ "titulares": "uno" })).unwrap_err();
        assert!(matches!(
            err,
            InputNormalizationError::InvalidShape { expected: "array", actual: "string", .. }
        ));
    }

    #[test]
    fn missing_null_or_empty_holders_are_rejected() {
        for payload in [
            json!({ "solicitud": {} }),
            json!({ "titulares": null }),
            json!({ "titulares": [] }),
        ] {
            assert_eq!(
                normalize_application(payload).unwrap_err(),
                InputNormalizationError::NoHolders
            );
        }
    }

    #[test]
    fn loosely_typed_fields_pass_through_unchanged() {
        let payload = json!({
            "titulares": [{
                "datos_personales": { "SEXO_BIOLOGICO": "hombre", "HIJOS": 2.0 },
                "garantias": [{ "TIPO": "Vehiculo", "MONTO": "12000" }]
            }],
            "solicitud": { "anios": 25.5 }
        });

        let request = normalize_application(payload.clone()).unwrap();

        assert_eq!(serde_json::to_value(&request).unwrap(), payload);
    }

    #[test]
    fn undeclared_fields_are_kept() {
        let request = normalize_application(json!({
            "titulares": [{ "datos_personales": { "ANTIGUEDAD_LABORAL": "6 años" } }],
            "notas": "Cliente recomendado"
        }))
        .unwrap();

        let prompt = request.to_prompt_json();
        assert!(prompt.contains("ANTIGUEDAD_LABORAL"));
        assert!(prompt.contains("notas"));
    }

    #[test]
    fn holders_without_personal_object_are_accepted() {
        let request =
            normalize_application(json!({ "titulares": [{}, { "datos_personales": null }, "Ana"] }))
                .unwrap();
        assert_eq!(request.holders().len(), 3);
        assert!(request.loan_request().is_none());
    }
}
