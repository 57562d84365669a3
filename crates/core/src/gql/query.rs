use crate::catalog::CollectionDef;
use crate::gql::args::normalize;
use crate::gql::config::{Config, UnknownKeys};
use crate::gql::error::{GqlError, schema_error, validation_error};
use crate::gql::naming::lower_first;
use crate::gql::utils::Found;
use crate::kvs::Datastore;
use crate::val::{Object, Value};

/// A top-level read field.
#[derive(Clone, Debug)]
pub struct Query {
	pub field: String,
	pub many: bool,
	/// The argument which, when given, holds every filter argument
	wrapper: String,
	def: CollectionDef,
	unknown_keys: UnknownKeys,
}

impl Query {
	pub fn build(field: &str, ty: &str, many: bool, config: &Config) -> Result<Self, GqlError> {
		let tb = config.naming.collection_name_for(ty);
		let def = config.catalog.collection(&tb).ok_or_else(|| {
			schema_error(format!("`Query.{field}` reads missing collection `{tb}`"))
		})?;
		Ok(Query {
			field: field.to_owned(),
			many,
			wrapper: lower_first(ty),
			def: def.clone(),
			unknown_keys: config.unknown_keys,
		})
	}

	pub fn collection(&self) -> &str {
		&self.def.name
	}

	/// Read the documents matching the request arguments
	pub async fn resolve(&self, ds: &dyn Datastore, args: Object) -> Result<Found, GqlError> {
		let args = self.unwrap(args)?;
		let filter = normalize(args, &self.def, self.unknown_keys)?;
		debug!("Query.{} on `{}` where {filter}", self.field, self.def.name);
		if self.many {
			Ok(Found::Many(ds.find(&self.def.name, &filter).await?))
		} else {
			Ok(Found::One(ds.find_one(&self.def.name, &filter).await?))
		}
	}

	/// Take the filter arguments out of the wrapping input object, if present
	fn unwrap(&self, mut args: Object) -> Result<Object, GqlError> {
		match args.remove(&self.wrapper) {
			None => Ok(args),
			Some(Value::Object(inner)) => Ok(inner),
			Some(Value::None | Value::Null) => Ok(Object::default()),
			Some(v) => Err(validation_error(format!(
				"Expected `{}` to be an input object, found {}",
				self.wrapper,
				v.kind_of()
			))),
		}
	}
}
