use docql_core::catalog::{Catalog, CollectionDef, FieldDef, FieldDefault, Kind};

use crate::cnf::VOUCHER_CODE_LENGTH;

fn ids() -> Kind {
	Kind::Array(Box::new(Kind::Record))
}

fn created() -> FieldDef {
	FieldDef::new("created", Kind::Datetime).default(FieldDefault::Now)
}

pub fn users() -> CollectionDef {
	CollectionDef::new("Users")
		.field(FieldDef::new("name", Kind::String))
		.field(FieldDef::new("email", Kind::String))
		.field(FieldDef::new("company_id", Kind::Record))
		.field(FieldDef::new("reward_ids", ids()))
		.field(created())
}

pub fn vouchers() -> CollectionDef {
	CollectionDef::new("Vouchers")
		.field(
			FieldDef::new("code", Kind::String)
				.default(FieldDefault::Code(VOUCHER_CODE_LENGTH.get()))
				.unique(),
		)
		.field(FieldDef::new("points", Kind::Number))
		.field(FieldDef::new("validated", Kind::Bool))
		.field(FieldDef::new("reward_id", Kind::Record))
		.field(FieldDef::new("company_id", Kind::Record))
		.field(FieldDef::new("user_id", Kind::Record))
		.field(FieldDef::new("expiration_date", Kind::Datetime))
		.field(created())
}

pub fn rewards() -> CollectionDef {
	CollectionDef::new("Rewards")
		.field(FieldDef::new("name", Kind::String))
		.field(FieldDef::new("description", Kind::String))
		.field(FieldDef::new("points", Kind::Number))
		.field(FieldDef::new("images", Kind::Array(Box::new(Kind::String))))
		.field(FieldDef::new("stock", Kind::Number))
		.field(FieldDef::new("company_id", Kind::Record))
		.field(FieldDef::new("user_id", Kind::Record))
		.field(created())
}

pub fn companies() -> CollectionDef {
	let location =
		vec![FieldDef::new("name", Kind::String), FieldDef::new("address", Kind::String)];
	CollectionDef::new("Companies")
		.field(FieldDef::new("name", Kind::String))
		.field(FieldDef::new("logo", Kind::String))
		.field(FieldDef::new("locations", Kind::Array(Box::new(Kind::Object(location)))))
		.field(FieldDef::new("parent_id", Kind::Record))
		.field(created())
}

/// The storage models of every collection
pub fn catalog() -> Catalog {
	Catalog::new().with(users()).with(vouchers()).with(rewards()).with(companies())
}
