//! Value-to-angle conversion for pie layouts.
//!
//! Every angle here is in radians unless the function name says otherwise.
//! Spans are accumulated strictly in sequence order and are never normalized:
//! when the values do not add up to the denominator the spans leave a gap
//! (or run past a full turn) and the caller is expected to report it.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[must_use]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

#[must_use]
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians.to_degrees()
}

#[must_use]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    (1.0 - t) * from + t * to
}

/// Converts a raw value into a percentage of `denominator`.
pub fn value_to_percentage(value: f64, denominator: f64) -> ChartResult<f64> {
    let denominator = validate_denominator(denominator)?;
    Ok(value / denominator * 100.0)
}

/// Maps `0..=100` onto `0..=2π`. Values outside the range extrapolate linearly.
#[must_use]
pub fn percentage_to_radians(percentage: f64) -> f64 {
    percentage / 100.0 * TAU
}

/// Rejects denominators that would turn the allocation into a division by
/// zero or propagate NaN into geometry.
pub fn validate_denominator(denominator: f64) -> ChartResult<f64> {
    if !denominator.is_finite() || denominator <= 0.0 {
        return Err(ChartError::invalid_configuration(format!(
            "percentage denominator must be finite and > 0, got {denominator}"
        )));
    }
    Ok(denominator)
}

/// Angular interval `[start_angle, start_angle + sweep_angle)` of one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngularSpan {
    pub start_angle: f64,
    pub sweep_angle: f64,
}

impl AngularSpan {
    #[must_use]
    pub const fn new(start_angle: f64, sweep_angle: f64) -> Self {
        Self {
            start_angle,
            sweep_angle,
        }
    }

    #[must_use]
    pub fn end_angle(self) -> f64 {
        self.start_angle + self.sweep_angle
    }

    #[must_use]
    pub fn start_degrees(self) -> f64 {
        radians_to_degrees(self.start_angle)
    }

    #[must_use]
    pub fn end_degrees(self) -> f64 {
        radians_to_degrees(self.end_angle())
    }

    #[must_use]
    pub fn sweep_degrees(self) -> f64 {
        radians_to_degrees(self.sweep_angle)
    }
}

/// Allocates one span per value, in iteration order.
///
/// The first span starts at 0 and every following span starts where the
/// previous one ends. Fails before computing any angle when the denominator
/// or one of the values is unusable, and never returns a non-finite angle.
pub fn allocate_spans<I>(values: I, denominator: f64) -> ChartResult<Vec<AngularSpan>>
where
    I: IntoIterator<Item = f64>,
{
    let denominator = validate_denominator(denominator)?;
    let values: Vec<f64> = values.into_iter().collect();
    if let Some((index, value)) = values
        .iter()
        .enumerate()
        .find(|(_, value)| !value.is_finite() || **value < 0.0)
    {
        return Err(ChartError::invalid_configuration(format!(
            "value at position {index} must be finite and >= 0, got {value}"
        )));
    }

    let mut spans = Vec::with_capacity(values.len());
    let mut start_angle = 0.0;
    for (index, value) in values.into_iter().enumerate() {
        let sweep_angle = percentage_to_radians(value / denominator * 100.0);
        if !sweep_angle.is_finite() || !(start_angle + sweep_angle).is_finite() {
            return Err(ChartError::invalid_configuration(format!(
                "value at position {index} overflows the angle range ({value} / {denominator})"
            )));
        }
        spans.push(AngularSpan::new(start_angle, sweep_angle));
        start_angle += sweep_angle;
    }
    Ok(spans)
}

/// Total angle covered by `spans`.
#[must_use]
pub fn total_sweep(spans: &[AngularSpan]) -> f64 {
    spans.iter().map(|span| span.sweep_angle).sum()
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{PI, TAU};

    use super::{
        allocate_spans, degrees_to_radians, lerp, percentage_to_radians, total_sweep,
        value_to_percentage,
    };
    use crate::error::ChartError;

    #[test]
    fn percentage_bounds_map_to_zero_and_full_turn() {
        assert_eq!(percentage_to_radians(0.0), 0.0);
        assert!((percentage_to_radians(100.0) - TAU).abs() <= 1e-12);
        assert!((percentage_to_radians(50.0) - PI).abs() <= 1e-12);
    }

    #[test]
    fn value_to_percentage_uses_denominator() {
        let percentage = value_to_percentage(30.0, 120.0).expect("valid denominator");
        assert!((percentage - 25.0).abs() <= 1e-12);
    }

    #[test]
    fn spans_accumulate_in_order() {
        let spans = allocate_spans([25.0, 10.0, 30.0], 100.0).expect("allocate");
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].start_angle, 0.0);
        assert!((spans[1].start_angle - spans[0].end_angle()).abs() <= 1e-12);
        assert!((spans[2].start_angle - spans[1].end_angle()).abs() <= 1e-12);
        assert!((spans[2].end_degrees() - 234.0).abs() <= 1e-9);
    }

    #[test]
    fn zero_denominator_is_rejected_before_any_angle() {
        let err = allocate_spans([10.0], 0.0).expect_err("zero denominator");
        assert!(matches!(err, ChartError::InvalidConfiguration(_)));
        assert!(allocate_spans([10.0], f64::NAN).is_err());
        assert!(value_to_percentage(1.0, -5.0).is_err());
    }

    #[test]
    fn negative_or_nan_value_is_rejected() {
        assert!(allocate_spans([10.0, -1.0], 100.0).is_err());
        assert!(allocate_spans([f64::NAN], 100.0).is_err());
    }

    #[test]
    fn overflowing_ratio_is_rejected_instead_of_infinite_angles() {
        let err = allocate_spans([1e308, 1e308], 1e-3).expect_err("overflow");
        assert!(matches!(err, ChartError::InvalidConfiguration(_)));
        assert!(allocate_spans([1.0, f64::MAX], 1.0).is_err());
    }

    #[test]
    fn overfull_values_wrap_past_a_full_turn() {
        let spans = allocate_spans([80.0, 40.0], 100.0).expect("allocate");
        assert!(total_sweep(&spans) > TAU);
    }

    #[test]
    fn empty_input_yields_no_spans() {
        let spans = allocate_spans(std::iter::empty(), 100.0).expect("allocate");
        assert!(spans.is_empty());
        assert_eq!(total_sweep(&spans), 0.0);
    }

    #[test]
    fn helpers_match_reference_math() {
        assert!((degrees_to_radians(-140.0) + 140.0 * PI / 180.0).abs() <= 1e-12);
        assert_eq!(lerp(2.0, 6.0, 0.25), 3.0);
    }
}
