use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three scaling axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Lowercase identifier as used on the wire (`"x"`, `"y"`, `"z"`).
    pub fn id(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }

    /// Parse a wire identifier. Accepts upper or lower case.
    pub fn from_id(s: &str) -> Option<Axis> {
        match s.trim() {
            "x" | "X" => Some(Axis::X),
            "y" | "Y" => Some(Axis::Y),
            "z" | "Z" => Some(Axis::Z),
            _ => None,
        }
    }

    /// The (min, max) bound identifiers belonging to this axis.
    pub fn bounds(self) -> (RangeBound, RangeBound) {
        match self {
            Axis::X => (RangeBound::X1, RangeBound::X2),
            Axis::Y => (RangeBound::Y1, RangeBound::Y2),
            Axis::Z => (RangeBound::Z1, RangeBound::Z2),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Identifies one of the six range bound fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeBound {
    X1,
    X2,
    Y1,
    Y2,
    Z1,
    Z2,
}

impl RangeBound {
    pub const ALL: [RangeBound; 6] = [
        RangeBound::X1,
        RangeBound::X2,
        RangeBound::Y1,
        RangeBound::Y2,
        RangeBound::Z1,
        RangeBound::Z2,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RangeBound::X1 => "x1",
            RangeBound::X2 => "x2",
            RangeBound::Y1 => "y1",
            RangeBound::Y2 => "y2",
            RangeBound::Z1 => "z1",
            RangeBound::Z2 => "z2",
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            RangeBound::X1 | RangeBound::X2 => Axis::X,
            RangeBound::Y1 | RangeBound::Y2 => Axis::Y,
            RangeBound::Z1 | RangeBound::Z2 => Axis::Z,
        }
    }

    /// `true` for the lower (`*1`) bound of an axis.
    pub fn is_min(self) -> bool {
        matches!(self, RangeBound::X1 | RangeBound::Y1 | RangeBound::Z1)
    }
}

/// The six range bounds as the user typed them. Any of them may be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisRanges {
    pub x1: String,
    pub x2: String,
    pub y1: String,
    pub y2: String,
    pub z1: String,
    pub z2: String,
}

impl AxisRanges {
    /// Convenience constructor from `(min, max)` pairs for X, Y and Z.
    pub fn new(x: (&str, &str), y: (&str, &str), z: (&str, &str)) -> Self {
        Self {
            x1: x.0.to_string(),
            x2: x.1.to_string(),
            y1: y.0.to_string(),
            y2: y.1.to_string(),
            z1: z.0.to_string(),
            z2: z.1.to_string(),
        }
    }

    pub fn get(&self, bound: RangeBound) -> &str {
        match bound {
            RangeBound::X1 => &self.x1,
            RangeBound::X2 => &self.x2,
            RangeBound::Y1 => &self.y1,
            RangeBound::Y2 => &self.y2,
            RangeBound::Z1 => &self.z1,
            RangeBound::Z2 => &self.z2,
        }
    }

    pub fn get_mut(&mut self, bound: RangeBound) -> &mut String {
        match bound {
            RangeBound::X1 => &mut self.x1,
            RangeBound::X2 => &mut self.x2,
            RangeBound::Y1 => &mut self.y1,
            RangeBound::Y2 => &mut self.y2,
            RangeBound::Z1 => &mut self.z1,
            RangeBound::Z2 => &mut self.z2,
        }
    }

    pub fn set(&mut self, bound: RangeBound, text: impl Into<String>) {
        *self.get_mut(bound) = text.into();
    }

    /// The raw `(min, max)` text for an axis.
    pub fn of(&self, axis: Axis) -> (&str, &str) {
        let (lo, hi) = axis.bounds();
        (self.get(lo), self.get(hi))
    }
}

/// Latest known value per axis, as text. Blank means "no value".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisValues {
    pub x: String,
    pub y: String,
    pub z: String,
}

impl AxisValues {
    pub fn new(x: impl Into<String>, y: impl Into<String>, z: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            z: z.into(),
        }
    }

    pub fn get(&self, axis: Axis) -> &str {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    pub fn get_mut(&mut self, axis: Axis) -> &mut String {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }

    pub fn set(&mut self, axis: Axis, text: impl Into<String>) {
        *self.get_mut(axis) = text.into();
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty() && self.y.is_empty() && self.z.is_empty()
    }
}

/// Parse a decimal real number. Blank, non-numeric and non-finite text yield `None`.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a hexadecimal integer, with an optional sign and `0x` prefix.
pub fn parse_hex(text: &str) -> Option<f64> {
    let t = text.trim();
    let (negative, rest) = match t.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, t),
    };
    let digits = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))
        .unwrap_or(rest);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let magnitude = i64::from_str_radix(digits, 16).ok()? as f64;
    Some(if negative { -magnitude } else { magnitude })
}

/// Parse the value typed on `axis`. Z is read as hex while the hex flag is on.
pub fn parse_axis_input(axis: Axis, text: &str, z_in_hex: bool) -> Option<f64> {
    if axis == Axis::Z && z_in_hex {
        parse_hex(text)
    } else {
        parse_decimal(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_rejects_blank_and_non_finite() {
        assert_eq!(parse_decimal("  2.5 "), Some(2.5));
        assert_eq!(parse_decimal("-3.2"), Some(-3.2));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("   "), None);
        assert_eq!(parse_decimal("-"), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("inf"), None);
        assert_eq!(parse_decimal("NaN"), None);
    }

    #[test]
    fn hex_accepts_prefix_and_sign() {
        assert_eq!(parse_hex("A"), Some(10.0));
        assert_eq!(parse_hex("0xFF"), Some(255.0));
        assert_eq!(parse_hex("19"), Some(25.0));
        assert_eq!(parse_hex("-7f"), Some(-127.0));
        assert_eq!(parse_hex("GG"), None);
        assert_eq!(parse_hex("0x"), None);
        assert_eq!(parse_hex("+5"), None);
    }

    #[test]
    fn axis_input_uses_hex_only_for_z() {
        assert_eq!(parse_axis_input(Axis::Z, "ff", true), Some(255.0));
        assert_eq!(parse_axis_input(Axis::Z, "ff", false), None);
        assert_eq!(parse_axis_input(Axis::X, "10", true), Some(10.0));
    }

    #[test]
    fn ranges_of_axis() {
        let r = AxisRanges::new(("0", "10"), ("1", "2"), ("", "5"));
        assert_eq!(r.of(Axis::X), ("0", "10"));
        assert_eq!(r.of(Axis::Z), ("", "5"));
        assert_eq!(RangeBound::Y2.axis(), Axis::Y);
        assert!(!RangeBound::Y2.is_min());
    }
}
