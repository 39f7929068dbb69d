//! Field-level checks shared by the entity `validate` impls.

use chrono::NaiveDate;

use crate::errors::ModelError;

pub fn require(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let invalid = || ModelError::Validation("invalid email".into());
    let (local, domain) = email.trim().split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || email.contains(char::is_whitespace) {
        return Err(invalid());
    }
    // domain needs at least one dot with non-empty labels on both sides
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() && !host.ends_with('.') => Ok(()),
        _ => Err(invalid()),
    }
}

/// `YYYY-MM-DD`
pub fn validate_date(field: &str, value: &str) -> Result<(), ModelError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ModelError::Validation(format!("{field} must be YYYY-MM-DD")))
}

pub fn validate_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), ModelError> {
    if !value.is_finite() || value < min || value > max {
        return Err(ModelError::Validation(format!("{field} must be between {min} and {max}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(validate_email("jane@example.com").is_ok());
        assert!(validate_email("j.doe+home@mail.example.org").is_ok());
        assert!(validate_email("jane").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("jane@example").is_err());
        assert!(validate_email("jane@@example.com").is_err());
        assert!(validate_email("ja ne@example.com").is_err());
        assert!(validate_email("jane@.com").is_err());
    }

    #[test]
    fn dates_must_be_iso() {
        assert!(validate_date("preferred_date", "2024-06-01").is_ok());
        assert!(validate_date("preferred_date", "06/01/2024").is_err());
        assert!(validate_date("preferred_date", "2024-02-30").is_err());
    }

    #[test]
    fn range_rejects_nan() {
        assert!(validate_range("rating", 4.5, 0.0, 5.0).is_ok());
        assert!(validate_range("rating", f64::NAN, 0.0, 5.0).is_err());
        assert!(validate_range("rating", 5.1, 0.0, 5.0).is_err());
    }
}
