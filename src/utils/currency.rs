/// Rupee sign prefixed to every rendered amount
pub const CURRENCY_SYMBOL: &str = "₹";

/// Largest magnitude rendered to the exact paisa. Beyond this the cent count
/// leaves the range where `f64` holds every integer.
pub const MAX_FORMATTED_AMOUNT: f64 = 1e13;

/// Whether `format_inr` can render `amount`
pub fn is_representable(amount: f64) -> bool {
    amount.is_finite() && amount.abs() <= MAX_FORMATTED_AMOUNT
}

/// Format an amount as rupees with thousands separators and two decimals,
/// e.g. `12345.678` -> `₹12,345.68`
///
/// Returns `None` for NaN, infinities and anything above `MAX_FORMATTED_AMOUNT`.
pub fn format_inr(amount: f64) -> Option<String> {
    if !is_representable(amount) {
        return None;
    }

    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let mut buffer = itoa::Buffer::new();
    let digits = buffer.format(whole);

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 8);
    if amount < 0.0 && cents > 0 {
        out.push('-');
    }
    out.push_str(CURRENCY_SYMBOL);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out.push('.');
    if frac < 10 {
        out.push('0');
    }
    out.push_str(buffer.format(frac));
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inr(amount: f64) -> String {
        format_inr(amount).unwrap()
    }

    #[test]
    fn test_format_small_amount() {
        assert_eq!(inr(825.0), "₹825.00");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(inr(12345.678), "₹12,345.68");
        assert_eq!(inr(1_000_000.0), "₹1,000,000.00");
    }

    #[test]
    fn test_format_cents_padding() {
        assert_eq!(inr(0.05), "₹0.05");
        assert_eq!(inr(0.0), "₹0.00");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(inr(-1500.5), "-₹1,500.50");
        assert_eq!(inr(-0.001), "₹0.00");
    }

    #[test]
    fn test_format_largest_amount_is_exact() {
        assert_eq!(inr(MAX_FORMATTED_AMOUNT), "₹10,000,000,000,000.00");
    }

    #[test]
    fn test_format_refuses_unrepresentable_amounts() {
        assert_eq!(format_inr(f64::INFINITY), None);
        assert_eq!(format_inr(f64::NEG_INFINITY), None);
        assert_eq!(format_inr(f64::NAN), None);
        assert_eq!(format_inr(1e18), None);
        assert_eq!(format_inr(-1e18), None);
        assert!(!is_representable(1.5e18));
        assert!(is_representable(-MAX_FORMATTED_AMOUNT));
    }
}
