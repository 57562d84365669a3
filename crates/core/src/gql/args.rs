use crate::catalog::CollectionDef;
use crate::cnf::{FK_LIST_SUFFIX, GTE_SUFFIX, LTE_SUFFIX};
use crate::gql::config::UnknownKeys;
use crate::gql::error::{GqlError, validation_error};
use crate::kvs::{Condition, Filter};
use crate::val::{Object, Value};

/// Split a suffixed argument name into the field it targets and the
/// condition it encodes
fn expand(key: String, val: Value) -> (String, Condition) {
	if let Some(field) = key.strip_suffix(LTE_SUFFIX).filter(|f| !f.is_empty()) {
		return (field.to_owned(), Condition::Lte(val));
	}
	if let Some(field) = key.strip_suffix(GTE_SUFFIX).filter(|f| !f.is_empty()) {
		return (field.to_owned(), Condition::Gte(val));
	}
	match val {
		Value::Array(vals) if key.ends_with(FK_LIST_SUFFIX) => (key, Condition::All(vals)),
		val => (key, Condition::Eq(val)),
	}
}

/// Rewrite flat query arguments into a storage filter.
///
/// `<field>_lte` and `<field>_gte` become bounds on `<field>`, an array given
/// for a `<field>_ids` key must be wholly contained in that field, and any
/// other key is an equality filter. Operands are cast by the kind of the
/// field they target.
pub(crate) fn normalize(
	args: Object,
	def: &CollectionDef,
	unknown_keys: UnknownKeys,
) -> Result<Filter, GqlError> {
	let mut filter = Filter::new();
	for (key, val) in args {
		let (field, cond) = expand(key, val);
		if !def.has_field(&field) {
			match unknown_keys {
				UnknownKeys::Pass => {
					trace!("filtering `{}` on undeclared field `{field}`", def.name);
				}
				UnknownKeys::Reject => {
					return Err(validation_error(format!(
						"Unknown argument `{field}` for `{}`",
						def.name
					)));
				}
			}
		}
		filter.push(field, cond);
	}
	Ok(def.cast_filter(filter)?)
}
