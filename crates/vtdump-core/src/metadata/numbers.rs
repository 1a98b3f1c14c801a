//! Numeric column helpers.

/// Parse a column that is hexadecimal when it carries a `0x` prefix and
/// decimal otherwise.
///
/// `readelf` prints small symbol sizes in decimal and switches to `0x`
/// notation once they no longer fit the column.
///
/// ```rust
/// use vtdump_core::metadata::parse_number;
///
/// assert_eq!(parse_number("40"), Some(40));
/// assert_eq!(parse_number("0x186a0"), Some(100_000));
/// assert_eq!(parse_number("UND"), None);
/// ```
pub fn parse_number(field: &str) -> Option<u64>
{
    let field = field.trim();
    match field.strip_prefix("0x").or_else(|| field.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => field.parse().ok(),
    }
}

/// Parse a plain hexadecimal column (no prefix required).
pub fn parse_hex(field: &str) -> Option<u64>
{
    let field = field.trim();
    let digits = field.strip_prefix("0x").unwrap_or(field);
    u64::from_str_radix(digits, 16).ok()
}

/// Parse a signed hexadecimal addend such as `+10`, `-8` or `0`.
///
/// The relocation listing prints the addend as separate sign and magnitude
/// columns; callers join them without separators first.
pub fn parse_signed_hex(text: &str) -> Option<i64>
{
    let text = text.trim();
    let (negative, digits) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = i64::try_from(parse_hex(digits)?).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_parse_number_decimal_and_hex()
    {
        assert_eq!(parse_number("16"), Some(16));
        assert_eq!(parse_number("0x10"), Some(16));
        assert_eq!(parse_number("0X10"), Some(16));
        assert_eq!(parse_number("10"), Some(10));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("0xZZ"), None);
    }

    #[test]
    fn test_parse_hex()
    {
        assert_eq!(parse_hex("0000000000401a20"), Some(0x401a20));
        assert_eq!(parse_hex("ff"), Some(0xff));
        assert_eq!(parse_hex("0x20"), Some(0x20));
        assert_eq!(parse_hex("xyz"), None);
    }

    #[test]
    fn test_parse_signed_hex()
    {
        assert_eq!(parse_signed_hex("+0"), Some(0));
        assert_eq!(parse_signed_hex("+10"), Some(16));
        assert_eq!(parse_signed_hex("-8"), Some(-8));
        assert_eq!(parse_signed_hex("20"), Some(32));
        assert_eq!(parse_signed_hex("+"), None);
        assert_eq!(parse_signed_hex(""), None);
    }
}
