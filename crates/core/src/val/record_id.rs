use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// The store-native identifier of a document.
///
/// Uses UUID v7, so identifiers generated by one process sort by creation
/// time. Externally an identifier is always its hyphenated string form.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RecordId(Uuid);

impl RecordId {
	/// Generates a new time-ordered identifier
	pub fn new() -> Self {
		Self(Uuid::now_v7())
	}
}

impl Default for RecordId {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Display for RecordId {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl FromStr for RecordId {
	type Err = uuid::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self(Uuid::parse_str(s)?))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_its_own_rendering() {
		let id = RecordId::new();
		assert_eq!(id.to_string().parse::<RecordId>().unwrap(), id);
		assert!("not-an-id".parse::<RecordId>().is_err());
	}
}
