//! # Field rules / 字段校验规则
//!
//! Used by the step controllers and the composite schema.
//!
//! Each rule maps a raw field value to `Ok(())` or the error to display.
//! Rules that depend on the current date take it as a parameter.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::validation::error::ValidationError;
use crate::validation::luhn;

/// Minimum password length in characters.
/// 密码最小长度。
pub const MIN_PASSWORD_LEN: usize = 8;
/// Inclusive age bounds for a new member.
/// 会员年龄范围（含边界）。
pub const MIN_AGE: i32 = 16;
pub const MAX_AGE: i32 = 100;
/// Accepted digit count for a phone number.
/// 电话号码允许的位数。
pub const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 10..=15;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-]+(\.[A-Za-z0-9_'+\-]+)*@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

static ZIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").expect("zip pattern is valid"));

pub(crate) fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Required, and shaped like `local@domain.tld`.
/// 必填，且符合邮箱格式。
pub fn email(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Required { label: "Email" });
    }
    if !EMAIL_RE.is_match(value) {
        return Err(ValidationError::EmailInvalid);
    }
    Ok(())
}

/// At least [`MIN_PASSWORD_LEN`] characters with an uppercase letter and a digit.
/// 至少 8 位，包含大写字母和数字。
pub fn password(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    if !value.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::PasswordMissingUppercase);
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::PasswordMissingDigit);
    }
    Ok(())
}

/// Must equal `password`, the sibling field's current (buffered) value.
/// 必须与同一表单中的密码一致。
pub fn confirm_password(value: &str, password: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::ConfirmPasswordRequired);
    }
    if value != password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Non-empty check used for first and last name at step level.
/// 非空校验（步骤级别的姓名字段）。
pub fn required(value: &str, label: &'static str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Required { label });
    }
    Ok(())
}

/// Digit count after stripping everything else (`+`, spaces, dashes).
/// 去除非数字字符后校验位数。
pub fn phone(value: &str) -> Result<(), ValidationError> {
    let digits = digits_only(value);
    if digits.is_empty() {
        return Err(ValidationError::Required { label: "Phone" });
    }
    if !PHONE_DIGITS.contains(&digits.len()) {
        return Err(ValidationError::PhoneInvalid);
    }
    Ok(())
}

/// Age is `today.year - birth.year`; month and day are ignored.
/// 年龄按年份差计算，不考虑月日。
pub fn date_of_birth(value: &str, today: NaiveDate) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Required {
            label: "Date of birth",
        });
    }
    let birth = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::DateOfBirthInvalid)?;
    let age = today.year() - birth.year();
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(ValidationError::AgeOutOfRange);
    }
    Ok(())
}

/// At least five characters after trimming.
/// 去除首尾空白后至少 5 个字符。
pub fn street(value: &str) -> Result<(), ValidationError> {
    if value.trim().chars().count() < 5 {
        return Err(ValidationError::StreetTooShort);
    }
    Ok(())
}

/// 城市：至少 2 个字符。
pub fn city(value: &str) -> Result<(), ValidationError> {
    min_trimmed(value, "City")
}

/// 州/省：至少 2 个字符。
pub fn state(value: &str) -> Result<(), ValidationError> {
    min_trimmed(value, "State")
}

fn min_trimmed(value: &str, label: &'static str) -> Result<(), ValidationError> {
    if value.trim().chars().count() < 2 {
        return Err(ValidationError::Required { label });
    }
    Ok(())
}

/// Four-digit postcode.
/// 四位邮编。
pub fn zip(value: &str) -> Result<(), ValidationError> {
    four_digit_zip(value, "ZIP code")
}

/// Four-digit postcode of the card holder.
/// 账单地址的四位邮编。
pub fn billing_zip(value: &str) -> Result<(), ValidationError> {
    four_digit_zip(value, "Billing ZIP")
}

fn four_digit_zip(value: &str, label: &'static str) -> Result<(), ValidationError> {
    if digits_only(value).is_empty() {
        return Err(ValidationError::Required { label });
    }
    if !ZIP_RE.is_match(value.trim()) {
        return Err(ValidationError::ZipInvalid);
    }
    Ok(())
}

/// 13 to 19 digits passing the Luhn checksum.
/// 13 至 19 位并通过 Luhn 校验。
pub fn card_number(value: &str) -> Result<(), ValidationError> {
    let digits = digits_only(value);
    if digits.is_empty() {
        return Err(ValidationError::Required {
            label: "Card number",
        });
    }
    if !luhn::CARD_DIGITS.contains(&digits.len()) {
        return Err(ValidationError::CardLengthInvalid);
    }
    if !luhn::is_valid(&digits) {
        return Err(ValidationError::CardNumberInvalid);
    }
    Ok(())
}

/// `MM/YY` (separators ignored). The card is usable through the last day of
/// its expiry month.
/// 有效期格式为 `MM/YY`，到期月份内仍可使用。
pub fn expiry(value: &str, today: NaiveDate) -> Result<(), ValidationError> {
    let digits = digits_only(value);
    if digits.is_empty() {
        return Err(ValidationError::Required { label: "Expiry" });
    }
    if digits.len() != 4 {
        return Err(ValidationError::ExpiryInvalid);
    }
    let month: u32 = digits[..2]
        .parse()
        .map_err(|_| ValidationError::ExpiryInvalid)?;
    let year: i32 = digits[2..]
        .parse()
        .map_err(|_| ValidationError::ExpiryInvalid)?;
    if !(1..=12).contains(&month) {
        return Err(ValidationError::ExpiryInvalid);
    }
    if (2000 + year, month) < (today.year(), today.month()) {
        return Err(ValidationError::CardExpired);
    }
    Ok(())
}

/// 3 or 4 digits.
/// 3 或 4 位数字。
pub fn cvv(value: &str) -> Result<(), ValidationError> {
    let digits = digits_only(value);
    if digits.is_empty() {
        return Err(ValidationError::Required { label: "CVV" });
    }
    if !(3..=4).contains(&digits.len()) {
        return Err(ValidationError::CvvInvalid);
    }
    Ok(())
}

/// At least one entry, `none` included.
/// 至少选择一项（包括“无”）。
pub fn health_selection(ids: &[String]) -> Result<(), ValidationError> {
    if ids.is_empty() {
        return Err(ValidationError::NoHealthSelection);
    }
    Ok(())
}

/// 必须同意服务条款。
pub fn agree_terms(value: bool) -> Result<(), ValidationError> {
    if !value {
        return Err(ValidationError::TermsNotAccepted);
    }
    Ok(())
}

/// 必须同意免责声明。
pub fn agree_waiver(value: bool) -> Result<(), ValidationError> {
    if !value {
        return Err(ValidationError::WaiverNotAccepted);
    }
    Ok(())
}
