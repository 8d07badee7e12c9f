//! Number formatting and name escaping for the egg text format.

use std::fmt;

/// A numeric value as it appears in an entry's content.
///
/// Integers and floats are kept apart so that `3` renders as `3` while
/// `1.0` keeps its decimal point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Integral value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
}

impl Number {
    /// The value as a float, for range checks.
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{v}"),
            // Debug keeps the trailing `.0` and switches to exponents for extremes.
            Number::Float(v) => write!(f, "{v:?}"),
        }
    }
}

macro_rules! number_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(value: $t) -> Self {
                    Number::Int(i64::from(value))
                }
            }
        )*
    };
}

number_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

/// Format a number, optionally as fixed-point with `precision` decimals.
///
/// ```
/// use pegg::fmt_number;
///
/// assert_eq!(fmt_number(3, None), "3");
/// assert_eq!(fmt_number(3, Some(3)), "3.000");
/// assert_eq!(fmt_number(0.123456, Some(4)), "0.1235");
/// assert_eq!(fmt_number(0.999999, Some(4)), "1.0000");
/// ```
pub fn fmt_number(value: impl Into<Number>, precision: Option<usize>) -> String {
    let value = value.into();
    match precision {
        None => value.to_string(),
        Some(digits) => format!("{:.*}", digits, value.as_f64()),
    }
}

/// Join numbers with single spaces using [`fmt_number`].
pub(crate) fn join_numbers(values: &[Number], precision: Option<usize>) -> String {
    values
        .iter()
        .map(|v| fmt_number(*v, precision))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert a slice of numeric inputs into [`Number`]s.
pub(crate) fn to_numbers<N: Into<Number> + Copy>(values: &[N]) -> Vec<Number> {
    values.iter().map(|&v| v.into()).collect()
}

/// Characters that force a name to be quoted.
const QUOTE_TRIGGERS: [char; 5] = [' ', '{', '}', '<', '>'];

/// Make a name safe for the egg format.
///
/// Double quotes become single quotes. The result is wrapped in double quotes
/// when it contains a space, a brace or an angle bracket, or when `quote` is set.
pub fn escape_name(name: &str, quote: bool) -> String {
    let name = name.replace('"', "'");
    if quote || name.contains(QUOTE_TRIGGERS) {
        format!("\"{name}\"")
    } else {
        name
    }
}
