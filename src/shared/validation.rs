use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for coupon codes: uppercase alphanumeric, 3-20 chars.
    /// Codes are uppercased before this check, so lowercase input passes
    /// validation after normalization.
    /// - Valid: "WELCOME10", "FREESHIP", "B2G1"
    /// - Invalid: "hi", "SAVE 10", "ten-percent"
    pub static ref COUPON_CODE_REGEX: Regex = Regex::new(r"^[A-Z0-9]{3,20}$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coupon_code_valid() {
        assert!(COUPON_CODE_REGEX.is_match("WELCOME10"));
        assert!(COUPON_CODE_REGEX.is_match("FREESHIP"));
        assert!(COUPON_CODE_REGEX.is_match("B2G1"));
        assert!(COUPON_CODE_REGEX.is_match("123"));
    }

    #[test]
    fn test_coupon_code_invalid() {
        assert!(!COUPON_CODE_REGEX.is_match("hi")); // too short
        assert!(!COUPON_CODE_REGEX.is_match("save10")); // lowercase
        assert!(!COUPON_CODE_REGEX.is_match("SAVE 10")); // space
        assert!(!COUPON_CODE_REGEX.is_match("TEN-PERCENT")); // hyphen
        assert!(!COUPON_CODE_REGEX.is_match("")); // empty
        assert!(!COUPON_CODE_REGEX.is_match("AVERYLONGCOUPONCODE123456")); // too long
    }
}
