//! Short code generation and validation utilities.

use crate::error::AppError;
use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

/// Alphabet for generated codes: A-Z, a-z, 0-9.
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of server-generated codes.
pub const GENERATED_CODE_LENGTH: usize = 6;

/// Paths served by something other than the redirect handler.
///
/// Matched case-insensitively. A code equal to one of these can never be
/// followed, so custom codes are rejected and redirects short-circuit to 404.
pub const RESERVED_CODES: &[&str] = &["api", "code", "healthz", "favicon.ico", "_next"];

static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,8}$").expect("static regex is valid"));

/// Generates a random 6-character alphanumeric code.
///
/// Uniqueness is not checked here; the caller relies on the store's
/// unique constraint and retries on collision.
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..GENERATED_CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Returns true if `code` collides with a reserved path.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(code))
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - 6-8 characters
/// - ASCII letters and digits only
/// - Not a reserved path
///
/// # Errors
///
/// Returns [`AppError::Validation`] naming the first rule violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if !CUSTOM_CODE_REGEX.is_match(code) {
        return Err(AppError::validation(
            "Code must be 6-8 alphanumeric characters",
        ));
    }

    if is_reserved(code) {
        return Err(AppError::validation("This code is reserved"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        assert_eq!(generate_code().len(), GENERATED_CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_is_alphanumeric() {
        for _ in 0..100 {
            let code = generate_code();
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_generated_codes_pass_custom_validation() {
        for _ in 0..100 {
            assert!(validate_custom_code(&generate_code()).is_ok());
        }
    }

    #[test]
    fn test_generate_code_produces_varied_codes() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code()).collect();
        // 62^6 possibilities; a handful of collisions would already be suspicious.
        assert!(codes.len() > 990);
    }

    #[test]
    fn test_validate_length_bounds() {
        assert!(validate_custom_code("abc123").is_ok());
        assert!(validate_custom_code("abcd1234").is_ok());
        assert!(validate_custom_code("abc12").is_err());
        assert!(validate_custom_code("abcd12345").is_err());
        assert!(validate_custom_code("").is_err());
    }

    #[test]
    fn test_validate_mixed_case_allowed() {
        assert!(validate_custom_code("MyLink42").is_ok());
    }

    #[test]
    fn test_validate_rejects_symbols() {
        let err = validate_custom_code("my-link").unwrap_err();
        assert!(err.to_string().contains("6-8 alphanumeric"));

        assert!(validate_custom_code("my_link1").is_err());
        assert!(validate_custom_code("my link1").is_err());
        assert!(validate_custom_code("linké12").is_err());
    }

    #[test]
    fn test_validate_rejects_reserved_case_insensitive() {
        let err = validate_custom_code("healthz").unwrap_err();
        assert!(err.to_string().contains("reserved"));

        assert!(validate_custom_code("HealthZ").is_err());
    }

    #[test]
    fn test_is_reserved() {
        for &reserved in RESERVED_CODES {
            assert!(is_reserved(reserved), "'{}' should be reserved", reserved);
        }
        assert!(is_reserved("API"));
        assert!(is_reserved("Favicon.ico"));
        assert!(!is_reserved("abc123"));
    }
}
