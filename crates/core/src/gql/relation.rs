use std::fmt::{self, Display};

use crate::cnf::{FK_LIST_SUFFIX, FK_SUFFIX, ID_FIELD};
use crate::gql::config::Config;
use crate::gql::error::{GqlError, schema_error};
use crate::gql::naming::lower_first;
use crate::gql::utils::Found;
use crate::kvs::{Condition, Datastore, Filter};
use crate::val::{Object, Value};

/// Per-field settings of a relation binding.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RelationConfig {
	/// Resolve through identifier arrays rather than a single foreign key
	pub habtm: bool,
	/// Name the foreign key after this instead of the related type
	pub field_name: Option<String>,
}

impl RelationConfig {
	pub fn habtm() -> Self {
		Self {
			habtm: true,
			field_name: None,
		}
	}

	pub fn field_name(mut self, name: impl Into<String>) -> Self {
		self.field_name = Some(name.into());
		self
	}
}

/// Where the data linking a parent document to its related documents lives.
#[derive(Clone, Debug, PartialEq)]
pub enum Strategy {
	/// The parent holds the related identifier in this field
	ParentOwnsChild(String),
	/// Related documents hold the parent identifier in this field
	ChildOwnsParent(String),
	/// Related documents list the parent identifier in this array field
	MemberOf(String),
	/// The parent lists the related identifiers in this array field
	IdsOnParent(String),
}

impl Display for Strategy {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Strategy::ParentOwnsChild(fk) => write!(f, "parent.{fk} = child.{ID_FIELD}"),
			Strategy::ChildOwnsParent(fk) => write!(f, "child.{fk} = parent.{ID_FIELD}"),
			Strategy::MemberOf(fk) => write!(f, "child.{fk} CONTAINS parent.{ID_FIELD}"),
			Strategy::IdsOnParent(fk) => write!(f, "parent.{fk} CONTAINS child.{ID_FIELD}"),
		}
	}
}

/// A relation field, resolved once when the schema is built.
#[derive(Clone, Debug, PartialEq)]
pub struct Relation {
	/// The type declaring the field
	pub parent: String,
	pub field: String,
	/// The collection the related documents are read from
	pub target: String,
	pub many: bool,
	pub strategy: Strategy,
}

impl Relation {
	/// Work out how a relation field is stored.
	///
	/// Fails when a collection is missing or the naming convention points at
	/// a field no collection declares, so that a misconfigured relation is
	/// caught at startup instead of silently resolving to nothing.
	pub fn build(
		parent_ty: &str,
		field: &str,
		target_ty: &str,
		many: bool,
		rel: &RelationConfig,
		config: &Config,
	) -> Result<Self, GqlError> {
		let parent_tb = config.naming.collection_name_for(parent_ty);
		let target_tb = config.naming.collection_name_for(target_ty);
		let parent_def = config.catalog.collection(&parent_tb).ok_or_else(|| {
			schema_error(format!("`{parent_ty}.{field}` has no `{parent_tb}` collection"))
		})?;
		let target_def = config.catalog.collection(&target_tb).ok_or_else(|| {
			schema_error(format!("`{parent_ty}.{field}` targets missing collection `{target_tb}`"))
		})?;
		let parent_name = lower_first(parent_ty);
		let child_name = rel.field_name.clone().unwrap_or_else(|| lower_first(target_ty));
		let strategy = if rel.habtm {
			if !many {
				return Err(schema_error(format!(
					"`{parent_ty}.{field}` is many-to-many but does not return a list"
				)));
			}
			let member = format!("{parent_name}{FK_LIST_SUFFIX}");
			if target_def.has_field(&member) {
				Strategy::MemberOf(member)
			} else {
				Strategy::IdsOnParent(format!("{child_name}{FK_LIST_SUFFIX}"))
			}
		} else if many {
			Strategy::ChildOwnsParent(format!("{parent_name}{FK_SUFFIX}"))
		} else {
			Strategy::ParentOwnsChild(format!("{child_name}{FK_SUFFIX}"))
		};
		let (owner, fk) = match &strategy {
			Strategy::ParentOwnsChild(fk) | Strategy::IdsOnParent(fk) => (parent_def, fk),
			Strategy::ChildOwnsParent(fk) | Strategy::MemberOf(fk) => (target_def, fk),
		};
		if !owner.has_field(fk) {
			return Err(schema_error(format!(
				"`{parent_ty}.{field}` expects field `{fk}` on `{}`, which declares no such field",
				owner.name
			)));
		}
		let out = Relation {
			parent: parent_ty.to_owned(),
			field: field.to_owned(),
			target: target_tb,
			many,
			strategy,
		};
		trace!("resolved relation {out}");
		Ok(out)
	}

	/// Read the documents related to a parent document
	pub async fn resolve(&self, ds: &dyn Datastore, parent: &Object) -> Result<Found, GqlError> {
		let docs = match &self.strategy {
			Strategy::ParentOwnsChild(fk) => {
				let id = parent.pick(fk);
				if id.is_nullish() {
					return Ok(Found::One(None));
				}
				let doc = ds.find_one(&self.target, &Filter::eq(ID_FIELD, id.clone())).await?;
				return Ok(Found::One(doc));
			}
			Strategy::ChildOwnsParent(fk) | Strategy::MemberOf(fk) => {
				let id = parent.pick(ID_FIELD);
				if id.is_nullish() {
					Vec::new()
				} else {
					ds.find(&self.target, &Filter::eq(fk.as_str(), id.clone())).await?
				}
			}
			Strategy::IdsOnParent(fk) => {
				let ids = distinct(parent.pick(fk));
				if ids.is_empty() {
					Vec::new()
				} else {
					let filter = Filter::new().with(ID_FIELD, Condition::In(ids));
					ds.find(&self.target, &filter).await?
				}
			}
		};
		Ok(Found::Many(docs))
	}
}

/// The distinct non-null identifiers held by a field, in order of appearance
fn distinct(val: &Value) -> Vec<Value> {
	let all = match val {
		Value::Array(a) => a.as_slice(),
		v => std::slice::from_ref(v),
	};
	let mut out: Vec<Value> = Vec::with_capacity(all.len());
	for v in all {
		if !v.is_nullish() && !out.contains(v) {
			out.push(v.clone());
		}
	}
	out
}

impl Display for Relation {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let card = if self.many { "many" } else { "one" };
		let Relation {
			parent,
			field,
			target,
			strategy,
			..
		} = self;
		write!(f, "{parent}.{field} -> {target} ({card}) where {strategy}")
	}
}
