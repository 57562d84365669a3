/// The name of the identifier field on every stored document
pub const ID_FIELD: &str = "_id";

/// The suffix appended to a type name when no plural override is registered
pub const PLURAL_SUFFIX: &str = "s";

/// Suffix of a single foreign key field, e.g. `company_id`
pub const FK_SUFFIX: &str = "_id";

/// Suffix of a foreign key array field, e.g. `reward_ids`
pub const FK_LIST_SUFFIX: &str = "_ids";

/// Argument suffix which turns into an upper bound filter
pub const LTE_SUFFIX: &str = "_lte";

/// Argument suffix which turns into a lower bound filter
pub const GTE_SUFFIX: &str = "_gte";

/// The characters used when generating random document codes
pub const CODE_CHARS: [char; 36] = [
	'0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
	'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];
