use crate::api::middleware::error::{ApiError, ApiResult};

/// Validate an email address and return its normalized (trimmed, lowercase)
/// form. Bare domains without a TLD are rejected even though the parser
/// accepts them.
pub fn validate_and_normalize_email(raw: &str) -> ApiResult<String> {
    let candidate = raw.trim();

    if !email_address::EmailAddress::is_valid(candidate) {
        return Err(ApiError::BadRequest(format!(
            "'{}' is not a valid email address",
            candidate
        )));
    }

    let domain = candidate.rsplit('@').next().unwrap_or("");
    if !domain.contains('.') {
        return Err(ApiError::BadRequest(
            "Email domain must include a TLD".to_string(),
        ));
    }

    Ok(candidate.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email_passes_through() {
        let result = validate_and_normalize_email("provider@example.com");
        assert_eq!(result.unwrap(), "provider@example.com");
    }

    #[test]
    fn test_case_and_whitespace_normalized() {
        let result = validate_and_normalize_email("  Billing@Acme.COM ");
        assert_eq!(result.unwrap(), "billing@acme.com");
    }

    #[test]
    fn test_missing_at_rejected() {
        assert!(validate_and_normalize_email("acme.com").is_err());
    }

    #[test]
    fn test_bare_domain_rejected() {
        assert!(validate_and_normalize_email("billing@acme").is_err());
    }

    #[test]
    fn test_empty_rejected() {
        assert!(validate_and_normalize_email("   ").is_err());
    }
}
