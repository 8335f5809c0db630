//! d3-style number formatting.
//!
//! A format specifier has the general form:
//!
//! ```text
//! [[fill]align][sign][symbol][0][width][,][.precision][~][type]
//! ```
//!
//! Supported types are `f` (fixed point), `d` (integer), `%` (percentage),
//! `e` (exponent notation), `r` (decimal rounded to significant digits) and
//! the empty type, which behaves like `g` with insignificant trailing zeros trimmed.
//!
//! ```
//! use colorbar_scales::format_num::NumberFormat;
//!
//! let fmt = NumberFormat::parse(",f").unwrap();
//! assert_eq!(fmt.format(1234.5), "1,234.500000");
//! assert_eq!(NumberFormat::parse(".0%").unwrap().format(0.123), "12%");
//! assert_eq!(NumberFormat::parse("+08.2f").unwrap().format(-3.14159), "-0003.14");
//! ```
use std::fmt::Display;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ColorbarScaleError;

lazy_static! {
    static ref SPECIFIER_RE: Regex =
        Regex::new(r"^(?:(.)?([<>=^]))?([+\-( ])?([$#])?(0)?(\d+)?(,)?(\.\d+)?(~)?([a-zA-Z%])?$")
            .expect("valid specifier regex");
}

// JS numbers switch between fixed and exponent notation at these bounds
const MAX_FIXED_SCALED: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
    /// Padding goes between the sign and the digits
    SignAware,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Minus for negative values only
    Minus,
    Plus,
    Space,
    /// Parentheses around negative values
    Parens,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    None,
    Fixed,
    Integer,
    Percent,
    Exponent,
    Rounded,
}

/// A parsed format specifier
#[derive(Debug, Clone, PartialEq)]
pub struct NumberFormat {
    pub fill: char,
    pub align: Align,
    pub sign: Sign,
    pub currency: bool,
    pub zero: bool,
    pub width: usize,
    pub comma: bool,
    pub precision: Option<usize>,
    pub trim: bool,
    pub format_type: FormatType,
}

impl NumberFormat {
    pub fn parse(specifier: &str) -> Result<Self, ColorbarScaleError> {
        let invalid = || ColorbarScaleError::InvalidFormatSpecifier(specifier.to_string());
        let caps = SPECIFIER_RE.captures(specifier).ok_or_else(invalid)?;
        let group = |i: usize| caps.get(i).map(|m| m.as_str());

        let format_type = match group(10) {
            None => FormatType::None,
            Some("f") => FormatType::Fixed,
            Some("d") => FormatType::Integer,
            Some("%") => FormatType::Percent,
            Some("e") => FormatType::Exponent,
            Some("r") => FormatType::Rounded,
            Some(other) => {
                return Err(ColorbarScaleError::UnsupportedFormatType {
                    specifier: specifier.to_string(),
                    format_type: other.chars().next().unwrap_or_default(),
                })
            }
        };

        let mut fill = group(1).and_then(|s| s.chars().next()).unwrap_or(' ');
        let mut align = match group(2) {
            Some("<") => Align::Left,
            Some("^") => Align::Center,
            Some("=") => Align::SignAware,
            _ => Align::Right,
        };
        let sign = match group(3) {
            Some("+") => Sign::Plus,
            Some(" ") => Sign::Space,
            Some("(") => Sign::Parens,
            _ => Sign::Minus,
        };
        let mut zero = group(5).is_some();
        let width = match group(6) {
            Some(w) => w.parse().map_err(|_| invalid())?,
            None => 0,
        };
        let precision = match group(8) {
            Some(p) => Some(p[1..].parse().map_err(|_| invalid())?),
            None => None,
        };

        if zero || (fill == '0' && align == Align::SignAware) {
            zero = true;
            fill = '0';
            align = Align::SignAware;
        }

        Ok(Self {
            fill,
            align,
            sign,
            currency: group(4) == Some("$"),
            zero,
            width,
            comma: group(7).is_some(),
            precision,
            trim: group(9).is_some() || format_type == FormatType::None,
            format_type,
        })
    }

    /// Copy of this specifier with an explicit precision
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }

    fn effective_precision(&self) -> usize {
        match (self.format_type, self.precision) {
            (FormatType::None, None) => 12,
            (_, None) => 6,
            (FormatType::None | FormatType::Rounded, Some(p)) => p.clamp(1, 21),
            (_, Some(p)) => p.min(20),
        }
    }

    pub fn format(&self, input: impl Into<f64>) -> String {
        let input: f64 = input.into();
        if input.is_nan() {
            return "NaN".to_string();
        }

        let mut negative = input < 0.0 || (input == 0.0 && input.is_sign_negative());
        let abs = input.abs();
        let precision = self.effective_precision();

        let mut value = if abs.is_infinite() {
            "Infinity".to_string()
        } else {
            match self.format_type {
                FormatType::Fixed => to_fixed(abs, precision),
                FormatType::Integer => to_fixed(abs, 0),
                FormatType::Percent => to_fixed(abs * 100.0, precision),
                FormatType::Exponent => to_exponential(abs, precision),
                FormatType::Rounded => to_rounded(abs, precision),
                FormatType::None => to_precision(abs, precision),
            }
        };

        if self.trim {
            value = trim_insignificant(&value);
        }

        // Negative values that round to zero lose their sign unless '+' is requested
        if negative && value.parse::<f64>() == Ok(0.0) && self.sign != Sign::Plus {
            negative = false;
        }

        let mut prefix = match (negative, self.sign) {
            (true, Sign::Parens) => "(".to_string(),
            (true, _) => "-".to_string(),
            (false, Sign::Plus) => "+".to_string(),
            (false, Sign::Space) => " ".to_string(),
            (false, _) => String::new(),
        };
        if self.currency {
            prefix.push('$');
        }

        let mut suffix = String::new();
        if self.format_type == FormatType::Percent {
            suffix.push('%');
        }
        if negative && self.sign == Sign::Parens {
            suffix.push(')');
        }

        // Split off the fractional part and exponent so only integer digits are grouped
        let split = value
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(value.len());
        let (mut digits, rest) = (value[..split].to_string(), value[split..].to_string());
        suffix.insert_str(0, &rest);

        if self.comma && !self.zero {
            digits = group_digits(&digits, usize::MAX);
        }

        let len = prefix.chars().count() + digits.chars().count() + suffix.chars().count();
        let mut padding = if len < self.width {
            std::iter::repeat_n(self.fill, self.width - len).collect::<String>()
        } else {
            String::new()
        };

        if self.comma && self.zero {
            let limit = if padding.is_empty() {
                usize::MAX
            } else {
                self.width.saturating_sub(suffix.chars().count() + prefix.chars().count())
            };
            digits = group_digits(&format!("{padding}{digits}"), limit);
            padding.clear();
        }

        match self.align {
            Align::Left => format!("{prefix}{digits}{suffix}{padding}"),
            Align::SignAware => format!("{prefix}{padding}{digits}{suffix}"),
            Align::Center => {
                let half = padding.chars().count() / 2;
                let (before, after): (String, String) = (
                    padding.chars().take(half).collect(),
                    padding.chars().skip(half).collect(),
                );
                format!("{before}{prefix}{digits}{suffix}{after}")
            }
            Align::Right => format!("{padding}{prefix}{digits}{suffix}"),
        }
    }
}

impl FromStr for NumberFormat {
    type Err = ColorbarScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for NumberFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let align = match self.align {
            Align::Left => Some('<'),
            Align::Center => Some('^'),
            Align::SignAware if !self.zero => Some('='),
            Align::Right if self.fill != ' ' => Some('>'),
            _ => None,
        };
        if let Some(align) = align {
            write!(f, "{}{}", self.fill, align)?;
        }
        match self.sign {
            Sign::Minus => {}
            Sign::Plus => write!(f, "+")?,
            Sign::Space => write!(f, " ")?,
            Sign::Parens => write!(f, "(")?,
        }
        if self.currency {
            write!(f, "$")?;
        }
        if self.zero {
            write!(f, "0")?;
        }
        if self.width > 0 {
            write!(f, "{}", self.width)?;
        }
        if self.comma {
            write!(f, ",")?;
        }
        if let Some(p) = self.precision {
            write!(f, ".{p}")?;
        }
        if self.trim && self.format_type != FormatType::None {
            write!(f, "~")?;
        }
        let t = match self.format_type {
            FormatType::None => "",
            FormatType::Fixed => "f",
            FormatType::Integer => "d",
            FormatType::Percent => "%",
            FormatType::Exponent => "e",
            FormatType::Rounded => "r",
        };
        write!(f, "{t}")
    }
}

/// Fixed notation rounding half away from zero, like `Number.prototype.toFixed`
fn to_fixed(value: f64, precision: usize) -> String {
    let factor = 10f64.powi(precision as i32);
    let scaled = value * factor;
    if scaled.abs() < MAX_FIXED_SCALED {
        format!("{:.precision$}", scaled.round() / factor)
    } else {
        format!("{value:.precision$}")
    }
}

/// Decimal digits and exponent of `value` rounded to `significant` digits
fn decompose(value: f64, significant: usize) -> (String, i32) {
    let formatted = format!("{:.*e}", significant.saturating_sub(1), value);
    let (mantissa, exponent) = formatted.split_once('e').unwrap_or((&formatted, "0"));
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    (digits, exponent.parse().unwrap_or(0))
}

/// Exponent notation with an explicit exponent sign, e.g. `1.50e+2`
fn to_exponential(value: f64, precision: usize) -> String {
    let (digits, exponent) = decompose(value, precision + 1);
    let mantissa = if digits.len() > 1 {
        format!("{}.{}", &digits[..1], &digits[1..])
    } else {
        digits
    };
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{}", exponent.abs())
}

/// Decimal notation rounded to `significant` digits, never in exponent form
fn to_rounded(value: f64, significant: usize) -> String {
    if value == 0.0 {
        return to_fixed(0.0, significant.saturating_sub(1));
    }
    let (digits, exponent) = decompose(value, significant);
    let n = digits.len() as i32;
    if exponent < 0 {
        format!("0.{}{}", "0".repeat((-exponent - 1) as usize), digits)
    } else if exponent + 1 >= n {
        format!("{}{}", digits, "0".repeat((exponent + 1 - n) as usize))
    } else {
        let split = (exponent + 1) as usize;
        format!("{}.{}", &digits[..split], &digits[split..])
    }
}

/// Significant digit formatting, like `Number.prototype.toPrecision`
fn to_precision(value: f64, significant: usize) -> String {
    if value == 0.0 {
        return to_fixed(0.0, significant.saturating_sub(1));
    }
    let (_, exponent) = decompose(value, significant);
    if exponent < -6 || exponent >= significant as i32 {
        to_exponential(value, significant.saturating_sub(1))
    } else {
        to_fixed(value, (significant as i32 - 1 - exponent).max(0) as usize)
    }
}

/// Remove trailing zeros after the decimal point, and the point itself if nothing remains
fn trim_insignificant(value: &str) -> String {
    let (mantissa, exponent) = match value.find('e') {
        Some(i) => value.split_at(i),
        None => (value, ""),
    };
    if !mantissa.contains('.') {
        return value.to_string();
    }
    let trimmed = mantissa.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}{exponent}")
}

/// Insert a comma every three integer digits, keeping at most `width` characters
fn group_digits(digits: &str, width: usize) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut groups: Vec<String> = chars
        .rchunks(3)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect();
    groups.reverse();
    let grouped = groups.join(",");

    let len = grouped.chars().count();
    if width >= len {
        return grouped;
    }
    // Drop leading padding, never starting on a separator
    let mut out: String = grouped.chars().skip(len - width).collect();
    if out.starts_with(',') {
        out.insert(0, '0');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(",f", 1234.5, "1,234.500000")]
    #[case(",f", 5.5, "5.500000")]
    #[case(",.0f", 1234567.0, "1,234,567")]
    #[case(".1f", 0.06, "0.1")]
    #[case(".2f", -0.001, "0.00")]
    #[case("+.2f", 2.5, "+2.50")]
    #[case("(.1f", -3.25, "(3.3)")]
    #[case("d", 2.5, "3")]
    #[case(",d", -1234567.0, "-1,234,567")]
    #[case(".0%", 0.123, "12%")]
    #[case(".1%", 0.5, "50.0%")]
    #[case(".2e", 12345.0, "1.23e+4")]
    #[case(".1e", 0.00042, "4.2e-4")]
    #[case(".3r", 0.0012345, "0.00123")]
    #[case(".2r", 1234.0, "1200")]
    #[case("", 0.30000000000000004, "0.3")]
    #[case("", 42.0, "42")]
    #[case("~f", 1.5, "1.5")]
    #[case("$,.2f", 1234.5, "$1,234.50")]
    #[case(">8.1f", 3.0, "     3.0")]
    #[case("<6d", 42.0, "42    ")]
    #[case("^7d", 42.0, "  42   ")]
    #[case("+08.2f", -3.14159, "-0003.14")]
    #[case("08,d", 1234.0, "0,001,234")]
    fn test_format_cases(#[case] spec: &str, #[case] value: f64, #[case] expected: &str) {
        let fmt = NumberFormat::parse(spec).unwrap();
        assert_eq!(fmt.format(value), expected, "format {spec:?} of {value}");
    }

    #[test]
    fn test_non_finite_values() {
        let fmt = NumberFormat::parse(",f").unwrap();
        assert_eq!(fmt.format(f64::NAN), "NaN");
        assert_eq!(fmt.format(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_invalid_specifiers() {
        assert!(matches!(
            NumberFormat::parse(".2q"),
            Err(ColorbarScaleError::UnsupportedFormatType { format_type: 'q', .. })
        ));
        assert!(matches!(
            NumberFormat::parse("not a format"),
            Err(ColorbarScaleError::InvalidFormatSpecifier(_))
        ));
    }

    #[test]
    fn test_display_round_trips() {
        for spec in [",f", ".2%", "+08.2f", "$,.2f", "~e", ">8.1f"] {
            let fmt = NumberFormat::parse(spec).unwrap();
            assert_eq!(NumberFormat::parse(&fmt.to_string()).unwrap(), fmt, "{spec}");
        }
    }
}
