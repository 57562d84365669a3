use std::cmp::Ordering;
use std::fmt::{self, Display};

/// A numeric value. Integers and floats compare with each other numerically.
#[derive(Clone, Copy, Debug)]
pub enum Number {
	Int(i64),
	Float(f64),
}

impl Number {
	pub fn as_float(self) -> f64 {
		match self {
			Number::Int(v) => v as f64,
			Number::Float(v) => v,
		}
	}

	/// Returns the integer value, if this number has no fractional part
	pub fn as_int(self) -> Option<i64> {
		match self {
			Number::Int(v) => Some(v),
			Number::Float(v) if v.fract() == 0.0 && v.is_finite() => Some(v as i64),
			Number::Float(_) => None,
		}
	}
}

impl PartialEq for Number {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Number::Int(a), Number::Int(b)) => a == b,
			(a, b) => a.as_float() == b.as_float(),
		}
	}
}

impl PartialOrd for Number {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		match (self, other) {
			(Number::Int(a), Number::Int(b)) => Some(a.cmp(b)),
			(a, b) => a.as_float().partial_cmp(&b.as_float()),
		}
	}
}

impl Display for Number {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Number::Int(v) => Display::fmt(v, f),
			Number::Float(v) => write!(f, "{v}f"),
		}
	}
}
