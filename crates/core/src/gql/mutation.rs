use std::fmt::{self, Debug};
use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::CollectionDef;
use crate::cnf::{ID_FIELD, PLURAL_SUFFIX};
use crate::gql::config::Config;
use crate::gql::error::{GqlError, schema_error, validation_error};
use crate::gql::naming::lower_first;
use crate::gql::utils::Found;
use crate::kvs::{Datastore, Filter};
use crate::val::{Object, RecordId, Value};

/// A side effect run after documents were inserted.
///
/// The hook cannot change the outcome of the mutation which triggered it.
#[async_trait]
pub trait PostHook: Send + Sync + 'static {
	async fn after_insert(&self, model: &str, docs: &[Object]);
}

/// Settings of a mutation binding.
#[derive(Clone, Default)]
pub struct MutationConfig {
	/// The GraphQL type the mutation writes
	pub model: String,
	/// Insert a list of documents instead of a single one
	pub multiple: bool,
	pub post_hook: Option<Arc<dyn PostHook>>,
}

impl MutationConfig {
	pub fn new(model: impl Into<String>) -> Self {
		Self {
			model: model.into(),
			..Default::default()
		}
	}

	pub fn multiple(mut self) -> Self {
		self.multiple = true;
		self
	}

	pub fn post_hook(mut self, hook: impl PostHook) -> Self {
		self.post_hook = Some(Arc::new(hook));
		self
	}
}

impl Debug for MutationConfig {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("MutationConfig")
			.field("model", &self.model)
			.field("multiple", &self.multiple)
			.field("post_hook", &self.post_hook.is_some())
			.finish()
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operation {
	Add,
	Edit,
	Remove,
}

/// A top-level write field.
#[derive(Clone, Debug)]
pub struct Mutation {
	pub field: String,
	pub op: Operation,
	/// The argument holding the input document, or documents
	pub arg: String,
	config: MutationConfig,
	def: CollectionDef,
}

impl Mutation {
	pub fn build(
		field: &str,
		op: Operation,
		mc: MutationConfig,
		config: &Config,
	) -> Result<Self, GqlError> {
		let tb = config.naming.collection_name_for(&mc.model);
		let def = config.catalog.collection(&tb).ok_or_else(|| {
			schema_error(format!("`Mutation.{field}` writes missing collection `{tb}`"))
		})?;
		let mut arg = lower_first(&mc.model);
		if mc.multiple && op == Operation::Add {
			arg.push_str(PLURAL_SUFFIX);
		}
		Ok(Mutation {
			field: field.to_owned(),
			op,
			arg,
			config: mc,
			def: def.clone(),
		})
	}

	/// Whether this mutation returns a list
	pub fn many(&self) -> bool {
		self.config.multiple && self.op == Operation::Add
	}

	pub async fn resolve(&self, ds: &dyn Datastore, mut args: Object) -> Result<Found, GqlError> {
		let input = args.remove(&self.arg).unwrap_or_default();
		match self.op {
			Operation::Add if self.many() => self.add_many(ds, input).await.map(Found::Many),
			Operation::Add => self.add(ds, input).await.map(|d| Found::One(Some(d))),
			Operation::Edit => self.edit(ds, input).await.map(|d| Found::One(Some(d))),
			Operation::Remove => self.remove(ds, input).await.map(|d| Found::One(Some(d))),
		}
	}

	fn input(&self, val: Value) -> Result<Object, GqlError> {
		match val {
			Value::Object(o) => Ok(o),
			v => Err(validation_error(format!(
				"Expected `{}` to be an input object, found {}",
				self.arg,
				v.kind_of()
			))),
		}
	}

	/// Extract the identifier an edit or removal applies to
	fn target(&self, doc: &mut Object) -> Result<RecordId, GqlError> {
		match doc.remove(ID_FIELD) {
			Some(Value::RecordId(id)) => Ok(id),
			_ => Err(validation_error(format!("`{}` requires `{ID_FIELD}`", self.field))),
		}
	}

	async fn add(&self, ds: &dyn Datastore, input: Value) -> Result<Object, GqlError> {
		let doc = self.def.prepare_insert(self.input(input)?)?;
		let doc = ds.insert_one(&self.def.name, doc).await?;
		if let Some(hook) = &self.config.post_hook {
			hook.after_insert(&self.config.model, std::slice::from_ref(&doc)).await;
		}
		Ok(doc)
	}

	async fn add_many(&self, ds: &dyn Datastore, input: Value) -> Result<Vec<Object>, GqlError> {
		let docs = match input {
			Value::Array(a) => a,
			v => {
				return Err(validation_error(format!(
					"Expected `{}` to be a list, found {}",
					self.arg,
					v.kind_of()
				)));
			}
		};
		let docs = docs
			.into_iter()
			.map(|v| Ok(self.def.prepare_insert(self.input(v)?)?))
			.collect::<Result<Vec<_>, GqlError>>()?;
		let docs = ds.insert_many(&self.def.name, docs).await?;
		if let Some(hook) = &self.config.post_hook {
			hook.after_insert(&self.config.model, &docs).await;
		}
		Ok(docs)
	}

	/// Set the given fields on an existing document and return it
	async fn edit(&self, ds: &dyn Datastore, input: Value) -> Result<Object, GqlError> {
		let mut patch = self.def.cast(self.input(input)?)?;
		let id = self.target(&mut patch)?;
		let filter = Filter::eq(ID_FIELD, id);
		ds.update_one(&self.def.name, &filter, patch).await?;
		ds.find_one(&self.def.name, &filter).await?.ok_or_else(|| GqlError::NotFound {
			collection: self.def.name.clone(),
			id,
		})
	}

	/// Delete a document. Removing an identifier which matches nothing is not an error.
	async fn remove(&self, ds: &dyn Datastore, input: Value) -> Result<Object, GqlError> {
		let mut doc = self.def.cast(self.input(input)?)?;
		let id = self.target(&mut doc)?;
		ds.delete_one(&self.def.name, &Filter::eq(ID_FIELD, id)).await?;
		Ok([(ID_FIELD.to_owned(), Value::RecordId(id))].into_iter().collect())
	}
}
