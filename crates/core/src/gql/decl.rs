use async_graphql::dynamic::TypeRef;
use async_graphql::parser::parse_schema;
use async_graphql::parser::types::{BaseType, Type, TypeKind, TypeSystemDefinition};

use crate::gql::error::{GqlError, schema_error};

/// A field of a declared object type.
#[derive(Clone, Debug)]
pub(crate) struct FieldDecl {
	pub name: String,
	pub ty: Type,
	pub args: Vec<(String, Type)>,
}

impl FieldDecl {
	pub fn base(&self) -> &str {
		base_name(&self.ty)
	}

	pub fn is_list(&self) -> bool {
		matches!(self.ty.base, BaseType::List(_))
	}

	pub fn has_arg(&self, name: &str) -> bool {
		self.args.iter().any(|(n, _)| n == name)
	}
}

#[derive(Clone, Debug)]
pub(crate) enum Decl {
	Object(Vec<FieldDecl>),
	Input(Vec<(String, Type)>),
	Scalar,
}

/// Parse type declarations, keeping their order
pub(crate) fn parse(sdl: &str) -> Result<Vec<(String, Decl)>, GqlError> {
	let doc =
		parse_schema(sdl).map_err(|e| schema_error(format!("invalid type declarations: {e}")))?;
	let mut out = Vec::new();
	for def in doc.definitions {
		let def = match def {
			TypeSystemDefinition::Type(t) => t.node,
			TypeSystemDefinition::Schema(_) | TypeSystemDefinition::Directive(_) => {
				warn!("ignoring schema and directive definitions in type declarations");
				continue;
			}
		};
		let name = def.name.node.to_string();
		if def.extend {
			return Err(schema_error(format!("type extensions are not supported: `{name}`")));
		}
		let decl = match def.kind {
			TypeKind::Object(o) => Decl::Object(
				o.fields
					.into_iter()
					.map(|f| FieldDecl {
						name: f.node.name.node.to_string(),
						ty: f.node.ty.node,
						args: f
							.node
							.arguments
							.into_iter()
							.map(|a| (a.node.name.node.to_string(), a.node.ty.node))
							.collect(),
					})
					.collect(),
			),
			TypeKind::InputObject(i) => Decl::Input(
				i.fields
					.into_iter()
					.map(|f| (f.node.name.node.to_string(), f.node.ty.node))
					.collect(),
			),
			TypeKind::Scalar => Decl::Scalar,
			_ => return Err(schema_error(format!("unsupported kind of type `{name}`"))),
		};
		trace!("declared type {name}");
		out.push((name, decl));
	}
	Ok(out)
}

/// The named type at the core of a possibly wrapped type
pub(crate) fn base_name(ty: &Type) -> &str {
	match &ty.base {
		BaseType::Named(n) => n.as_str(),
		BaseType::List(t) => base_name(t),
	}
}

pub(crate) fn type_ref(ty: &Type) -> TypeRef {
	let inner = match &ty.base {
		BaseType::Named(n) => TypeRef::named(n.to_string()),
		BaseType::List(t) => TypeRef::List(Box::new(type_ref(t))),
	};
	if ty.nullable {
		inner
	} else {
		TypeRef::NonNull(Box::new(inner))
	}
}
