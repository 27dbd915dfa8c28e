// 📞 Phone formatting - `(DD) DDDDD-DDDD`
// Pure functions: the form formats as the operator types, the ledger re-formats on record.

/// Area code (2) + mobile number (9)
pub const MIN_PHONE_DIGITS: usize = 11;

/// Formatting never renders more digits than this
const MAX_RENDERED_DIGITS: usize = 11;

/// Strip everything that is not an ASCII digit
pub fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Progressive `(DD) DDDDD-DDDD` rendering.
///
/// - up to 2 digits: the digits as typed
/// - 3 to 7 digits: area code group opened, `(34) 988`
/// - 8 or more: hyphen before the last group, `(34) 98888-5`; extra digits past 11 are dropped
///
/// Idempotent: `format_phone(&format_phone(x)) == format_phone(x)`.
pub fn format_phone(text: &str) -> String {
    let digits = digits_only(text);
    let len = digits.len();

    if len > 7 {
        let end = len.min(MAX_RENDERED_DIGITS);
        format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..end])
    } else if len > 2 {
        format!("({}) {}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}

/// True when the input carries area code + mobile number
pub fn has_full_number(text: &str) -> bool {
    digits_only(text).len() >= MIN_PHONE_DIGITS
}

// ============================================================================
// TESTS
// ============================================================================
