//! Compile-time constant values.
//!
//! A [`ConstantValue`] is the statically known value of a constant expression.
//! The type of the constant lives on the expression; the value only records
//! the numeric family, so the same value can be re-typed by constant folding.
//!
//! `char` constants are stored as [`ConstantValue::Integer`] code points.

use std::fmt;

use ordered_float::OrderedFloat;

use crate::PrimitiveKind;

/// Largest decimal scale (digits after the point).
pub const DECIMAL_MAX_SCALE: u32 = 28;

/// Decimal mantissas are limited to 96 bits.
const DECIMAL_MANTISSA_LIMIT: i128 = 1 << 96;

/// A decimal value: `mantissa / 10^scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecimalValue {
    pub mantissa: i128,
    pub scale: u32,
}

impl DecimalValue {
    /// Create a decimal, or `None` if the mantissa or scale is out of range.
    pub fn new(mantissa: i128, scale: u32) -> Option<Self> {
        if scale > DECIMAL_MAX_SCALE || mantissa.unsigned_abs() >= DECIMAL_MANTISSA_LIMIT as u128 {
            return None;
        }
        Some(Self { mantissa, scale })
    }

    /// An integral decimal.
    pub fn from_integer(value: i128) -> Option<Self> {
        Self::new(value, 0)
    }

    /// Convert a float, or `None` if it is not finite or too large.
    ///
    /// Digits beyond the maximum scale are dropped.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        // Display for f64 never uses exponent notation.
        let text = value.to_string();
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.as_str()),
        };
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
        let fraction = &fraction[..fraction.len().min(DECIMAL_MAX_SCALE as usize)];

        let mut mantissa: i128 = 0;
        for ch in whole.chars().chain(fraction.chars()) {
            let digit = ch.to_digit(10)? as i128;
            mantissa = mantissa.checked_mul(10)?.checked_add(digit)?;
            if mantissa >= DECIMAL_MANTISSA_LIMIT {
                return None;
            }
        }
        let mantissa = if negative { -mantissa } else { mantissa };
        Self::new(mantissa, fraction.len() as u32)
    }

    /// Integral part, rounding toward zero.
    pub fn truncate(self) -> i128 {
        self.mantissa / 10i128.pow(self.scale)
    }

    pub fn to_f64(self) -> f64 {
        self.mantissa as f64 / 10f64.powi(self.scale as i32)
    }
}

impl fmt::Display for DecimalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.mantissa);
        }
        let divisor = 10i128.pow(self.scale);
        let sign = if self.mantissa < 0 { "-" } else { "" };
        let abs = self.mantissa.unsigned_abs();
        write!(
            f,
            "{}{}.{:0width$}",
            sign,
            abs / divisor as u128,
            abs % divisor as u128,
            width = self.scale as usize
        )
    }
}

/// A compile-time constant value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstantValue {
    Bool(bool),
    /// Any integral value, including `char` code points.
    Integer(i128),
    /// `float` and `double` values.
    Float(OrderedFloat<f64>),
    Decimal(DecimalValue),
    String(String),
    /// The `null` literal.
    Null,
}

impl ConstantValue {
    pub fn float(value: f64) -> Self {
        ConstantValue::Float(OrderedFloat(value))
    }

    pub fn as_integer(&self) -> Option<i128> {
        match self {
            ConstantValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConstantValue::Integer(v) => Some(*v as f64),
            ConstantValue::Float(v) => Some(v.0),
            ConstantValue::Decimal(d) => Some(d.to_f64()),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ConstantValue::Integer(_) | ConstantValue::Float(_) | ConstantValue::Decimal(_)
        )
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, ConstantValue::Integer(0))
    }

    /// Whether an integral value lies within the range of `kind`.
    ///
    /// Always false for non-integer values or non-integral kinds.
    pub fn fits_integral(&self, kind: PrimitiveKind) -> bool {
        match (self, kind.integral_range()) {
            (ConstantValue::Integer(v), Some((min, max))) => (min..=max).contains(v),
            _ => false,
        }
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Bool(b) => write!(f, "{}", b),
            ConstantValue::Integer(v) => write!(f, "{}", v),
            ConstantValue::Float(v) => write!(f, "{}", v.0),
            ConstantValue::Decimal(d) => write!(f, "{}m", d),
            ConstantValue::String(s) => write!(f, "{:?}", s),
            ConstantValue::Null => write!(f, "null"),
        }
    }
}
