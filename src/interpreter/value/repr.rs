/// Smallest decimal exponent printed in fixed notation.
const MIN_FIXED_EXPONENT: i32 = -4;
/// Decimal exponent from which scientific notation is used.
const MAX_FIXED_EXPONENT: i32 = 16;

/// Formats a real number the way a calculator user expects to read it.
///
/// The digits are the shortest ones that round-trip to the same `f64`.
/// Numbers whose decimal exponent lies in `[-4, 16)` print in fixed notation
/// with at least one fractional digit; others print in scientific notation
/// with a signed exponent of at least two digits.
///
/// # Example
/// ```
/// use calcguard::interpreter::value::repr::format_real;
///
/// assert_eq!(format_real(2.8), "2.8");
/// assert_eq!(format_real(3.0), "3.0");
/// assert_eq!(format_real(1e16), "1e+16");
/// assert_eq!(format_real(0.00001), "1e-05");
/// assert_eq!(format_real(-0.0), "-0.0");
/// ```
#[must_use]
pub fn format_real(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let (negative, digits, exponent) = shortest_digits(value);
    let sign = if negative { "-" } else { "" };

    let body = if (MIN_FIXED_EXPONENT..MAX_FIXED_EXPONENT).contains(&exponent) {
        fixed_notation(&digits, exponent)
    } else {
        scientific_notation(&digits, exponent)
    };

    format!("{sign}{body}")
}

/// Splits a finite, non-zero value into its sign, shortest significant
/// digits and decimal exponent, so that `value = 0.d1d2d3... * 10^(exponent + 1)`.
fn shortest_digits(value: f64) -> (bool, String, i32) {
    let formatted = format!("{:e}", value.abs());
    let (mantissa, exponent) = formatted.split_once('e')
                                        .unwrap_or((formatted.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let exponent = exponent.parse().unwrap_or(0);

    (value.is_sign_negative(), digits, exponent)
}

fn fixed_notation(digits: &str, exponent: i32) -> String {
    if exponent < 0 {
        let zeros = "0".repeat(exponent.unsigned_abs() as usize - 1);
        return format!("0.{zeros}{digits}");
    }

    let point = exponent.unsigned_abs() as usize + 1;
    if digits.len() <= point {
        let zeros = "0".repeat(point - digits.len());
        format!("{digits}{zeros}.0")
    } else {
        format!("{}.{}", &digits[..point], &digits[point..])
    }
}

fn scientific_notation(digits: &str, exponent: i32) -> String {
    let mantissa = if digits.len() > 1 {
        format!("{}.{}", &digits[..1], &digits[1..])
    } else {
        digits.to_string()
    };
    let sign = if exponent < 0 { '-' } else { '+' };

    format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
}

#[cfg(test)]
mod tests {
    use super::format_real;

    #[test]
    fn fixed_notation_keeps_a_fractional_digit() {
        assert_eq!(format_real(42.0), "42.0");
        assert_eq!(format_real(-7.25), "-7.25");
        assert_eq!(format_real(1e15), "1000000000000000.0");
        assert_eq!(format_real(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn small_magnitudes_switch_to_scientific_below_ten_to_minus_four() {
        assert_eq!(format_real(0.0001), "0.0001");
        assert_eq!(format_real(0.000_012_5), "1.25e-05");
    }

    #[test]
    fn large_magnitudes_use_signed_exponents() {
        assert_eq!(format_real(1.5e16), "1.5e+16");
        assert_eq!(format_real(-2e100), "-2e+100");
        assert_eq!(format_real(f64::MAX), "1.7976931348623157e+308");
    }
}
