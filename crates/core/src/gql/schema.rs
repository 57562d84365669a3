use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_graphql::dynamic::{
	DynamicRequest, Field, FieldFuture, FieldValue, InputObject, InputValue, Object, Scalar,
	Schema, Type,
};
use async_graphql::Response;

use crate::gql::config::Config;
use crate::gql::decl::{self, Decl, FieldDecl, type_ref};
use crate::gql::error::{GqlError, internal_error, schema_error};
use crate::gql::mutation::{Mutation, MutationConfig, Operation};
use crate::gql::query::Query;
use crate::gql::relation::{Relation, RelationConfig};
use crate::gql::utils::{gql_to_object, value_to_field_value, value_to_gql};
use crate::kvs::Datastore;
use crate::val::Object as Document;

const QUERY: &str = "Query";
const MUTATION: &str = "Mutation";

/// How a declared field is resolved.
#[derive(Clone, Debug)]
pub enum Resolver {
	/// A relation on an entity type
	Link(RelationConfig),
	/// A top-level read
	Query,
	Add(MutationConfig),
	Edit(MutationConfig),
	Remove(MutationConfig),
}

/// The resolvers bound to declared fields, keyed by type and field name.
///
/// Fields of entity types which are not bound read the same-named key of
/// the parent document.
#[derive(Clone, Debug, Default)]
pub struct Bindings(BTreeMap<(String, String), Resolver>);

impl Bindings {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn bind(mut self, ty: impl Into<String>, field: impl Into<String>, r: Resolver) -> Self {
		self.0.insert((ty.into(), field.into()), r);
		self
	}
}

/// An executable schema, with the relation descriptors computed for it.
pub struct Registry {
	schema: Schema,
	relations: Vec<Relation>,
}

impl Registry {
	/// Bind resolvers to type declarations written in GraphQL SDL.
	///
	/// Every binding is checked against the declarations and the storage
	/// catalog, so any relation or mutation which could not resolve fails
	/// here rather than when a request reaches it.
	pub fn build(
		sdl: &str,
		bindings: Bindings,
		config: &Config,
		ds: Arc<dyn Datastore>,
	) -> Result<Self, GqlError> {
		let decls = decl::parse(sdl)?;
		let objects: BTreeSet<String> = decls
			.iter()
			.filter(|(_, d)| matches!(d, Decl::Object(_)))
			.map(|(n, _)| n.clone())
			.collect();
		if !objects.contains(QUERY) {
			return Err(schema_error(format!("no `{QUERY}` type declared")));
		}

		let mut bindings = bindings.0;
		let mut relations = Vec::new();
		let mut types: Vec<Type> = Vec::new();

		for (name, decl) in decls {
			match decl {
				Decl::Object(fields) => {
					let mut obj = Object::new(&name);
					for fd in fields.iter() {
						let bound = bindings.remove(&(name.clone(), fd.name.clone()));
						let field = match (name.as_str(), bound) {
							(QUERY, Some(Resolver::Query)) => {
								let q = Query::build(&fd.name, fd.base(), fd.is_list(), config)?;
								trace!("adding query: {} on {}", fd.name, q.collection());
								query_field(fd, q, ds.clone())
							}
							(MUTATION, Some(Resolver::Add(mc))) => {
								mutation_field(fd, Operation::Add, mc, config, ds.clone())?
							}
							(MUTATION, Some(Resolver::Edit(mc))) => {
								mutation_field(fd, Operation::Edit, mc, config, ds.clone())?
							}
							(MUTATION, Some(Resolver::Remove(mc))) => {
								mutation_field(fd, Operation::Remove, mc, config, ds.clone())?
							}
							(QUERY | MUTATION, None) => {
								return Err(schema_error(format!(
									"`{name}.{}` has no resolver bound",
									fd.name
								)));
							}
							(QUERY | MUTATION, Some(r)) => {
								return Err(schema_error(format!(
									"`{name}.{}` cannot be resolved by {r:?}",
									fd.name
								)));
							}
							(_, Some(Resolver::Link(rc))) => {
								let rel = Relation::build(
									&name,
									&fd.name,
									fd.base(),
									fd.is_list(),
									&rc,
									config,
								)?;
								relations.push(rel.clone());
								relation_field(fd, rel, ds.clone())
							}
							(_, None) => document_field(fd, objects.contains(fd.base())),
							(_, Some(r)) => {
								return Err(schema_error(format!(
									"`{name}.{}` cannot be resolved by {r:?}",
									fd.name
								)));
							}
						};
						obj = obj.field(field);
					}
					types.push(Type::Object(obj));
				}
				Decl::Input(fields) => {
					let input = fields.iter().fold(InputObject::new(&name), |input, (n, ty)| {
						input.field(InputValue::new(n, type_ref(ty)))
					});
					types.push(Type::InputObject(input));
				}
				Decl::Scalar => types.push(Type::Scalar(Scalar::new(&name))),
			}
		}

		if let Some((ty, field)) = bindings.into_keys().next() {
			return Err(schema_error(format!("resolver bound to undeclared field `{ty}.{field}`")));
		}

		let mutation = objects.contains(MUTATION).then_some(MUTATION);
		let mut schema = Schema::build(QUERY, mutation, None);
		for ty in types {
			schema = schema.register(ty);
		}
		let schema = schema.finish().map_err(|e| schema_error(e.to_string()))?;
		Ok(Registry {
			schema,
			relations,
		})
	}

	/// The relation descriptors, in declaration order
	pub fn relations(&self) -> &[Relation] {
		&self.relations
	}

	/// The schema in GraphQL SDL
	pub fn sdl(&self) -> String {
		self.schema.sdl()
	}

	pub async fn execute(&self, request: impl Into<DynamicRequest>) -> Response {
		self.schema.execute(request).await
	}
}

fn with_args(field: Field, fd: &FieldDecl) -> Field {
	fd.args.iter().fold(field, |field, (n, ty)| field.argument(InputValue::new(n, type_ref(ty))))
}

fn query_field(fd: &FieldDecl, q: Query, ds: Arc<dyn Datastore>) -> Field {
	let q = Arc::new(q);
	let field = Field::new(&fd.name, type_ref(&fd.ty), move |ctx| {
		let q = q.clone();
		let ds = ds.clone();
		FieldFuture::new(async move {
			let args = gql_to_object(ctx.args.as_index_map())?;
			trace!("received request with args: {args}");
			let found = q.resolve(ds.as_ref(), args).await?;
			Ok(found.into_field_value())
		})
	});
	with_args(field, fd)
}

fn mutation_field(
	fd: &FieldDecl,
	op: Operation,
	mc: MutationConfig,
	config: &Config,
	ds: Arc<dyn Datastore>,
) -> Result<Field, GqlError> {
	let m = Mutation::build(&fd.name, op, mc, config)?;
	if !fd.has_arg(&m.arg) {
		return Err(schema_error(format!(
			"`{MUTATION}.{}` must take a `{}` argument",
			fd.name, m.arg
		)));
	}
	if fd.is_list() != m.many() {
		return Err(schema_error(format!(
			"`{MUTATION}.{}` must return {}",
			fd.name,
			if m.many() {
				"a list"
			} else {
				"a single document"
			}
		)));
	}
	trace!("adding mutation: {} ({:?})", fd.name, op);
	let m = Arc::new(m);
	let field = Field::new(&fd.name, type_ref(&fd.ty), move |ctx| {
		let m = m.clone();
		let ds = ds.clone();
		FieldFuture::new(async move {
			let args = gql_to_object(ctx.args.as_index_map())?;
			let found = m.resolve(ds.as_ref(), args).await?;
			Ok(found.into_field_value())
		})
	});
	Ok(with_args(field, fd))
}

fn relation_field(fd: &FieldDecl, rel: Relation, ds: Arc<dyn Datastore>) -> Field {
	let rel = Arc::new(rel);
	let field = Field::new(&fd.name, type_ref(&fd.ty), move |ctx| {
		let rel = rel.clone();
		let ds = ds.clone();
		FieldFuture::new(async move {
			let parent = ctx
				.parent_value
				.downcast_ref::<Document>()
				.ok_or_else(|| internal_error("failed to downcast"))?;
			let found = rel.resolve(ds.as_ref(), parent).await?;
			Ok(found.into_field_value())
		})
	});
	with_args(field, fd)
}

/// A field read straight from the parent document. Object-typed fields
/// resolve against the nested document.
fn document_field(fd: &FieldDecl, nested: bool) -> Field {
	let name = fd.name.clone();
	let field = Field::new(&fd.name, type_ref(&fd.ty), move |ctx| {
		let name = name.clone();
		FieldFuture::new(async move {
			let doc = ctx
				.parent_value
				.downcast_ref::<Document>()
				.ok_or_else(|| internal_error("failed to downcast"))?;
			let val = doc.pick(&name);
			if nested {
				Ok(value_to_field_value(val))
			} else if val.is_nullish() {
				Ok(None)
			} else {
				Ok(Some(FieldValue::value(value_to_gql(val))))
			}
		})
	});
	with_args(field, fd)
}
