//! Scaling request/response contract and the linear remap engine.
//!
//! Given one input value on the scale-from axis, every other axis receives
//!
//! ```text
//! out_min + (input - in_min) / (in_max - in_min) * (out_max - out_min)
//! ```
//!
//! where `(in_min, in_max)` are the scale-from axis bounds. The scale-from axis
//! echoes its own input. Target axes whose bounds are both blank are left blank.

use serde::{Deserialize, Serialize};

use super::axis::{parse_axis_input, parse_decimal, Axis, AxisRanges, AxisValues, RangeBound};
use crate::error::ScaleError;

/// A single scaling call: all three axis inputs, six bounds, the source axis and the hex flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingRequest {
    pub x_input: String,
    pub y_input: String,
    pub z_input: String,
    pub x1: String,
    pub x2: String,
    pub y1: String,
    pub y2: String,
    pub z1: String,
    pub z2: String,
    pub scale_from: Axis,
    #[serde(default)]
    pub z_in_hex: bool,
}

impl ScalingRequest {
    pub fn new(values: &AxisValues, ranges: &AxisRanges, scale_from: Axis, z_in_hex: bool) -> Self {
        Self {
            x_input: values.x.clone(),
            y_input: values.y.clone(),
            z_input: values.z.clone(),
            x1: ranges.x1.clone(),
            x2: ranges.x2.clone(),
            y1: ranges.y1.clone(),
            y2: ranges.y2.clone(),
            z1: ranges.z1.clone(),
            z2: ranges.z2.clone(),
            scale_from,
            z_in_hex,
        }
    }

    pub fn input(&self, axis: Axis) -> &str {
        match axis {
            Axis::X => &self.x_input,
            Axis::Y => &self.y_input,
            Axis::Z => &self.z_input,
        }
    }

    pub fn ranges(&self) -> AxisRanges {
        AxisRanges {
            x1: self.x1.clone(),
            x2: self.x2.clone(),
            y1: self.y1.clone(),
            y2: self.y2.clone(),
            z1: self.z1.clone(),
            z2: self.z2.clone(),
        }
    }
}

/// Result of a scaling call. Every field is text so Z can carry hex.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingResponse {
    pub x: String,
    pub y: String,
    pub z: String,
}

impl From<AxisValues> for ScalingResponse {
    fn from(v: AxisValues) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

impl From<ScalingResponse> for AxisValues {
    fn from(r: ScalingResponse) -> Self {
        AxisValues { x: r.x, y: r.y, z: r.z }
    }
}

/// Linear remap of `input` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// Returns `None` for a zero-width input range.
pub fn linear_remap(
    input: f64,
    in_min: f64,
    in_max: f64,
    out_min: f64,
    out_max: f64,
) -> Option<f64> {
    let span = in_max - in_min;
    if span == 0.0 {
        return None;
    }
    Some(out_min + (input - in_min) / span * (out_max - out_min))
}

/// Magnitudes at or above this are rendered in exponent form.
const EXP_ABOVE: f64 = 1e16;
/// Non-zero magnitudes below this are rendered in exponent form.
const EXP_BELOW: f64 = 1e-4;

/// Decimal rendering used for X, Y and non-hex Z.
///
/// Shortest round-trip digits, positional for `1e-4 <= |v| < 1e16` and
/// exponent form (`1e300`, `1.5e-5`) outside that band.
pub fn format_decimal(value: f64) -> String {
    // avoid "-0"
    let v = if value == 0.0 { 0.0 } else { value };
    let mag = v.abs();
    if mag >= EXP_ABOVE || (mag != 0.0 && mag < EXP_BELOW) {
        format!("{v:e}")
    } else {
        format!("{v}")
    }
}

/// Hex rendering for Z: truncate toward zero, lowercase digits, no prefix.
///
/// Returns `None` when the truncated value does not fit in an `i64`.
pub fn format_hex(value: f64) -> Option<String> {
    let t = value.trunc();
    if !t.is_finite() || t.abs() >= i64::MAX as f64 {
        return None;
    }
    let n = t as i64;
    Some(if n < 0 {
        format!("-{:x}", n.unsigned_abs())
    } else {
        format!("{n:x}")
    })
}

fn format_output(axis: Axis, value: f64, z_in_hex: bool) -> Result<String, ScaleError> {
    if !value.is_finite() {
        return Err(ScaleError::NonFinite { axis });
    }
    if axis == Axis::Z && z_in_hex {
        format_hex(value).ok_or(ScaleError::OutOfRange { axis, value })
    } else {
        Ok(format_decimal(value))
    }
}

fn parse_bound(ranges: &AxisRanges, bound: RangeBound) -> Result<f64, ScaleError> {
    let text = ranges.get(bound);
    if text.trim().is_empty() {
        return Err(ScaleError::MissingRange { bound: bound.name() });
    }
    parse_decimal(text).ok_or_else(|| ScaleError::InvalidRange {
        bound: bound.name(),
        value: text.to_string(),
    })
}

fn required_range(ranges: &AxisRanges, axis: Axis) -> Result<(f64, f64), ScaleError> {
    let (lo, hi) = axis.bounds();
    Ok((parse_bound(ranges, lo)?, parse_bound(ranges, hi)?))
}

/// Bounds of a target axis. Both blank means the axis is skipped.
fn optional_range(ranges: &AxisRanges, axis: Axis) -> Result<Option<(f64, f64)>, ScaleError> {
    let (lo, hi) = ranges.of(axis);
    if lo.trim().is_empty() && hi.trim().is_empty() {
        return Ok(None);
    }
    required_range(ranges, axis).map(Some)
}

/// Compute a [`ScalingResponse`] for `req`.
pub fn scale(req: &ScalingRequest) -> Result<ScalingResponse, ScaleError> {
    let from = req.scale_from;
    let ranges = req.ranges();

    let (in_min, in_max) = required_range(&ranges, from)?;
    if in_max == in_min {
        return Err(ScaleError::ZeroWidthRange { axis: from });
    }

    let raw = req.input(from);
    let input = parse_axis_input(from, raw, req.z_in_hex).ok_or_else(|| ScaleError::InvalidInput {
        axis: from,
        value: raw.to_string(),
    })?;

    let mut out = AxisValues::default();
    for axis in Axis::ALL {
        if axis == from {
            out.set(axis, raw.trim());
            continue;
        }
        let Some((out_min, out_max)) = optional_range(&ranges, axis)? else {
            continue;
        };
        let value = linear_remap(input, in_min, in_max, out_min, out_max)
            .ok_or(ScaleError::ZeroWidthRange { axis: from })?;
        out.set(axis, format_output(axis, value, req.z_in_hex)?);
    }
    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remap_rejects_zero_span() {
        assert_eq!(linear_remap(5.0, 3.0, 3.0, 0.0, 1.0), None);
        assert_eq!(linear_remap(5.0, 0.0, 10.0, 0.0, 100.0), Some(50.0));
    }

    #[test]
    fn hex_truncates_toward_zero() {
        assert_eq!(format_hex(127.5).as_deref(), Some("7f"));
        assert_eq!(format_hex(127.99).as_deref(), Some("7f"));
        assert_eq!(format_hex(-127.5).as_deref(), Some("-7f"));
        assert_eq!(format_hex(-0.4).as_deref(), Some("0"));
        assert_eq!(format_hex(1e30), None);
    }

    #[test]
    fn decimal_has_no_trailing_zero_or_negative_zero() {
        assert_eq!(format_decimal(50.0), "50");
        assert_eq!(format_decimal(2.5), "2.5");
        assert_eq!(format_decimal(-0.0), "0");
    }

    #[test]
    fn decimal_switches_to_exponent_outside_band() {
        assert_eq!(format_decimal(1e300), "1e300");
        assert_eq!(format_decimal(-2.5e16), "-2.5e16");
        assert_eq!(format_decimal(1.5e-5), "1.5e-5");
        assert_eq!(format_decimal(0.0001), "0.0001");
        assert_eq!(format_decimal(123456789.25), "123456789.25");
    }
}
