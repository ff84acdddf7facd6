//! YAML 1.2 core schema resolution of scalar text.

use saphyr_parser::ScalarStyle;

use crate::document::Scalar;

/// Resolve an untagged plain scalar.
///
/// Null is `~`, empty or `null` in its three spellings; booleans are
/// `true`/`false` likewise, so `yes` and `on` stay strings. Integers are
/// decimal, `0x` hex or `0o` octal and must fit in 64 bits.
pub(super) fn plain(text: &str) -> Result<Scalar, String> {
    if is_null(text) {
        return Ok(Scalar::Null);
    }
    if let Some(flag) = boolean(text) {
        return Ok(Scalar::Bool(flag));
    }
    if let Some(parsed) = integer(text) {
        return parsed.map(Scalar::Integer);
    }
    Ok(float(text).map_or_else(|| Scalar::String(text.to_owned()), Scalar::Float))
}

/// Resolve a scalar carrying a core schema tag such as `!!str`.
///
/// Unknown core tags fall back to the untagged rules for `style`.
pub(super) fn tagged(suffix: &str, text: &str, style: ScalarStyle) -> Result<Scalar, String> {
    let invalid = || format!("`{text}` is not a valid !!{suffix}");
    match suffix {
        "str" | "binary" => Ok(Scalar::String(text.to_owned())),
        "null" if is_null(text) => Ok(Scalar::Null),
        "bool" => boolean(text).map(Scalar::Bool).ok_or_else(invalid),
        "int" => integer(text).ok_or_else(invalid)?.map(Scalar::Integer),
        "float" => float(text).map(Scalar::Float).ok_or_else(invalid),
        "null" => Err(invalid()),
        _ => untagged(text, style),
    }
}

/// Resolve a scalar without a tag: only plain scalars are typed.
pub(super) fn untagged(text: &str, style: ScalarStyle) -> Result<Scalar, String> {
    if matches!(style, ScalarStyle::Plain) {
        plain(text)
    } else {
        Ok(Scalar::String(text.to_owned()))
    }
}

fn is_null(text: &str) -> bool {
    matches!(text, "" | "~" | "null" | "Null" | "NULL")
}

fn boolean(text: &str) -> Option<bool> {
    match text {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

/// `None` when `text` is not integer syntax; `Some(Err)` when it overflows.
fn integer(text: &str) -> Option<Result<i64, String>> {
    let (radix, digits) = text
        .strip_prefix("0x")
        .map(|hex| (16, hex))
        .or_else(|| text.strip_prefix("0o").map(|octal| (8, octal)))
        .unwrap_or((10, text));
    let unsigned = if radix == 10 {
        digits.strip_prefix(['-', '+']).unwrap_or(digits)
    } else {
        digits
    };
    let well_formed = !unsigned.is_empty() && unsigned.chars().all(|ch| ch.is_digit(radix));
    well_formed.then(|| {
        i64::from_str_radix(digits, radix)
            .map_err(|_| format!("integer `{text}` exceeds the signed 64-bit range"))
    })
}

fn float(text: &str) -> Option<f64> {
    match text {
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => Some(f64::INFINITY),
        "-.inf" | "-.Inf" | "-.INF" => Some(f64::NEG_INFINITY),
        ".nan" | ".NaN" | ".NAN" => Some(f64::NAN),
        _ if is_decimal_float(text) => text.parse().ok(),
        _ => None,
    }
}

/// Matches `[-+]?(\.[0-9]+|[0-9]+(\.[0-9]*)?)([eE][-+]?[0-9]+)?`.
fn is_decimal_float(text: &str) -> bool {
    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    let (mantissa, exponent) = unsigned
        .split_once(['e', 'E'])
        .map_or((unsigned, None), |(head, tail)| (head, Some(tail)));
    let mantissa_ok = mantissa.split_once('.').map_or_else(
        || is_digits(mantissa),
        |(whole, fraction)| {
            (is_digits(whole) || whole.is_empty())
                && (is_digits(fraction) || fraction.is_empty())
                && !(whole.is_empty() && fraction.is_empty())
        },
    );
    let exponent_ok = exponent.is_none_or(|power| is_digits(power.strip_prefix(['-', '+']).unwrap_or(power)));
    mantissa_ok && exponent_ok
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|byte| byte.is_ascii_digit())
}
