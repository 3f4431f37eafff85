// src/common/validation.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use validator::ValidationError;

// Formulários mandam "" em campos opcionais; vazio vira `None` antes do `validate()`.
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()))
}

// ---
// Validações customizadas compartilhadas pelos payloads
// ---
pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

pub fn validate_percentage(val: &Decimal) -> Result<(), ValidationError> {
    if *val < Decimal::ZERO || *val > Decimal::ONE_HUNDRED {
        let mut err = ValidationError::new("range");
        err.message = Some("O percentual deve estar entre 0 e 100.".into());
        return Err(err);
    }
    Ok(())
}

pub fn validate_work_hours(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO || *val > Decimal::from(24) {
        let mut err = ValidationError::new("range");
        err.message = Some("As horas devem ser maiores que 0 e no máximo 24.".into());
        return Err(err);
    }
    Ok(())
}

pub fn validate_confidence(val: f64) -> Result<(), ValidationError> {
    if !(0.0..=1.0).contains(&val) {
        let mut err = ValidationError::new("range");
        err.message = Some("A confiança deve estar entre 0 e 1.".into());
        return Err(err);
    }
    Ok(())
}

/// Regra de consistência de agenda: o fim não pode vir antes do início.
pub fn validate_time_window(
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
) -> Result<(), ValidationError> {
    if ends_at < starts_at {
        let mut err = ValidationError::new("time_window");
        err.message = Some("O término deve ser posterior ao início.".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "blank_as_none")]
        email: Option<String>,
    }

    #[test]
    fn blank_strings_become_none() {
        let parse = |v| serde_json::from_value::<Form>(v).unwrap().email;
        assert_eq!(parse(json!({ "email": "" })), None);
        assert_eq!(parse(json!({ "email": "   " })), None);
        assert_eq!(parse(json!({ "email": null })), None);
        assert_eq!(parse(json!({})), None);
        assert_eq!(parse(json!({ "email": " a@b.de " })), Some("a@b.de".to_string()));
    }

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(validate_not_negative(&Decimal::new(-1, 2)).is_err());
        assert!(validate_not_negative(&Decimal::ZERO).is_ok());
        assert!(validate_not_negative(&Decimal::new(1999, 2)).is_ok());
    }

    #[test]
    fn percentages_are_bounded() {
        assert!(validate_percentage(&Decimal::from(19)).is_ok());
        assert!(validate_percentage(&Decimal::ONE_HUNDRED).is_ok());
        assert!(validate_percentage(&Decimal::from(101)).is_err());
        assert!(validate_percentage(&Decimal::from(-5)).is_err());
    }

    #[test]
    fn hours_must_fit_in_a_day() {
        assert!(validate_work_hours(&Decimal::ZERO).is_err());
        assert!(validate_work_hours(&Decimal::new(75, 1)).is_ok());
        assert!(validate_work_hours(&Decimal::from(25)).is_err());
    }

    #[test]
    fn confidence_is_a_ratio() {
        assert!(validate_confidence(0.85).is_ok());
        assert!(validate_confidence(1.5).is_err());
    }

    #[test]
    fn time_window_rejects_inverted_ranges() {
        let start = Utc::now();
        assert!(validate_time_window(start, start + Duration::hours(1)).is_ok());
        assert!(validate_time_window(start, start).is_ok());
        assert!(validate_time_window(start, start - Duration::minutes(1)).is_err());
    }
}
