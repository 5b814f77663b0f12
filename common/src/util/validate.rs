use std::borrow::Cow;
use validator::ValidationError;

pub const EMPTY_MESSAGE: &str = "Enter a value";

/// 必填项：去掉首尾空白后不能为空
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(EMPTY_MESSAGE)));
    }
    Ok(())
}

/// 密码强度校验：最少8位 + 字母 + 数字
pub fn validate_password(pwd: &str) -> Result<(), ValidationError> {
    if pwd.len() < 8 {
        return Err(ValidationError::new("password.too.short"));
    }
    let has_letter = pwd.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = pwd.chars().any(|c| c.is_ascii_digit());

    if has_letter && has_digit { Ok(()) } else { Err(ValidationError::new("password.too.weak")) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_rejected() {
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   \t").is_err());
        assert!(validate_not_blank(" Ann ").is_ok());
        let err = validate_not_blank("").unwrap_err();
        assert_eq!(err.message.as_deref(), Some(EMPTY_MESSAGE));
    }

    #[test]
    fn password_needs_letters_and_digits() {
        assert!(validate_password("short1").is_err());
        assert!(validate_password("lettersonly").is_err());
        assert!(validate_password("12345678").is_err());
        assert!(validate_password("letters123").is_ok());
    }
}
