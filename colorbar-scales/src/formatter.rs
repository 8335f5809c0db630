use std::fmt::Debug;
use std::sync::Arc;

use crate::array::tick_step;
use crate::error::ColorbarScaleError;
use crate::format_num::{FormatType, NumberFormat};

/// Default specifier for axes and quantile legends without an explicit format
pub const DEFAULT_TICK_SPECIFIER: &str = ",f";

pub trait NumberFormatter: Debug + Send + Sync + 'static {
    /// Format each value, `index` is the value's position in the tick sequence
    fn format_one(&self, value: f32, index: usize) -> String;

    fn format(&self, values: &[f32]) -> Vec<String> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| self.format_one(*v, i))
            .collect()
    }
}

/// Formats numbers with a d3-style format specifier
#[derive(Debug, Clone, PartialEq)]
pub struct SpecifierFormatter {
    format: NumberFormat,
}

impl SpecifierFormatter {
    pub fn new(format: NumberFormat) -> Self {
        Self { format }
    }

    pub fn try_from_specifier(specifier: &str) -> Result<Self, ColorbarScaleError> {
        Ok(Self::new(NumberFormat::parse(specifier)?))
    }

    pub fn number_format(&self) -> &NumberFormat {
        &self.format
    }
}

impl NumberFormatter for SpecifierFormatter {
    fn format_one(&self, value: f32, _index: usize) -> String {
        self.format.format(value)
    }
}

/// Formatter backed by a closure over (value, index)
pub struct FnFormatter<F>
where
    F: Fn(f32, usize) -> String + Send + Sync + 'static,
{
    f: F,
}

impl<F> FnFormatter<F>
where
    F: Fn(f32, usize) -> String + Send + Sync + 'static,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }

    pub fn new_arc(f: F) -> Arc<dyn NumberFormatter> {
        Arc::new(Self::new(f))
    }
}

impl<F> Debug for FnFormatter<F>
where
    F: Fn(f32, usize) -> String + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnFormatter")
    }
}

impl<F> NumberFormatter for FnFormatter<F>
where
    F: Fn(f32, usize) -> String + Send + Sync + 'static,
{
    fn format_one(&self, value: f32, index: usize) -> String {
        (self.f)(value, index)
    }
}

/// Power of ten of the most significant digit, using the shortest decimal representation
fn exponent(value: f32) -> i32 {
    let formatted = format!("{:e}", value.abs());
    formatted
        .split_once('e')
        .and_then(|(_, e)| e.parse().ok())
        .unwrap_or(0)
}

/// Decimal places needed to distinguish multiples of `step`
pub fn precision_fixed(step: f32) -> usize {
    (-exponent(step)).max(0) as usize
}

/// Significant digits needed to distinguish multiples of `step` up to `max`
pub fn precision_round(step: f32, max: f32) -> usize {
    let step = step.abs();
    let max = max.abs() - step;
    (exponent(max) - exponent(step)).max(0) as usize + 1
}

/// Formatter for linear ticks over [start, stop], deriving a precision from the tick
/// step when the specifier doesn't carry one
pub fn linear_tick_format(
    start: f32,
    stop: f32,
    count: f32,
    specifier: Option<&str>,
) -> Result<SpecifierFormatter, ColorbarScaleError> {
    let format = NumberFormat::parse(specifier.unwrap_or(DEFAULT_TICK_SPECIFIER))?;
    let step = tick_step(start, stop, count);
    if format.precision.is_some() || !step.is_finite() || step == 0.0 {
        return Ok(SpecifierFormatter::new(format));
    }

    let format = match format.format_type {
        FormatType::Fixed => {
            let precision = precision_fixed(step);
            format.with_precision(precision)
        }
        FormatType::Percent => {
            let precision = precision_fixed(step).saturating_sub(2);
            format.with_precision(precision)
        }
        FormatType::None | FormatType::Rounded => {
            let precision = precision_round(step, start.abs().max(stop.abs()));
            format.with_precision(precision)
        }
        FormatType::Exponent => {
            let precision = precision_round(step, start.abs().max(stop.abs()));
            format.with_precision(precision.saturating_sub(1))
        }
        FormatType::Integer => format,
    };
    Ok(SpecifierFormatter::new(format))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_helpers() {
        assert_eq!(precision_fixed(1.0), 0);
        assert_eq!(precision_fixed(0.1), 1);
        assert_eq!(precision_fixed(0.05), 2);
        assert_eq!(precision_fixed(50.0), 0);
        assert_eq!(precision_round(0.01, 1.01), 3);
    }

    #[test]
    fn test_linear_tick_format_default_precision() -> Result<(), ColorbarScaleError> {
        let fmt = linear_tick_format(0.0, 1.0, 10.0, None)?;
        assert_eq!(fmt.format(&[0.0, 0.5, 1.0]), vec!["0.0", "0.5", "1.0"]);

        let fmt = linear_tick_format(0.0, 10000.0, 2.5, None)?;
        assert_eq!(fmt.format(&[5000.0]), vec!["5,000"]);
        Ok(())
    }

    #[test]
    fn test_linear_tick_format_respects_explicit_precision() -> Result<(), ColorbarScaleError> {
        let fmt = linear_tick_format(0.0, 1.0, 10.0, Some(".3f"))?;
        assert_eq!(fmt.format_one(0.5, 0), "0.500");

        let fmt = linear_tick_format(0.0, 1.0, 10.0, Some("%"))?;
        assert_eq!(fmt.format_one(0.2, 0), "20%");
        Ok(())
    }

    #[test]
    fn test_fn_formatter_receives_index() {
        let fmt = FnFormatter::new(|v: f32, i: usize| format!("{i}:{v}"));
        assert_eq!(fmt.format(&[1.5, 2.0]), vec!["0:1.5", "1:2"]);
    }
}
