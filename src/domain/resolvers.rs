use docql_core::gql::{Bindings, MutationConfig, RelationConfig, Resolver};

use crate::domain::notify::VoucherNotifier;

/// Bind a top-level read to every field of `Query`
fn queries(bindings: Bindings, fields: &[&str]) -> Bindings {
	fields.iter().fold(bindings, |b, f| b.bind("Query", *f, Resolver::Query))
}

/// Bind the add, edit and remove mutations of a model
fn crud(bindings: Bindings, model: &str) -> Bindings {
	bindings
		.bind("Mutation", format!("add{model}"), Resolver::Add(MutationConfig::new(model)))
		.bind("Mutation", format!("edit{model}"), Resolver::Edit(MutationConfig::new(model)))
		.bind("Mutation", format!("remove{model}"), Resolver::Remove(MutationConfig::new(model)))
}

/// The resolvers of every field which is not read straight from a document
pub fn bindings() -> Bindings {
	let link = || Resolver::Link(RelationConfig::default());
	let bindings = Bindings::new()
		// Users
		.bind("User", "company", link())
		.bind("User", "rewards", Resolver::Link(RelationConfig::habtm()))
		// Vouchers
		.bind("Voucher", "reward", link())
		.bind("Voucher", "company", link())
		.bind("Voucher", "user", link())
		// Rewards
		.bind("Reward", "company", link())
		.bind("Reward", "user", link())
		.bind("Reward", "users", Resolver::Link(RelationConfig::habtm()))
		// Companies
		.bind("Company", "parent", Resolver::Link(RelationConfig::default().field_name("parent")))
		.bind("Company", "users", link())
		.bind("Company", "vouchers", link())
		.bind("Company", "rewards", link());
	let bindings = queries(
		bindings,
		&["users", "user", "vouchers", "voucher", "rewards", "reward", "companies", "company"],
	);
	let bindings = ["Voucher", "Reward", "Company", "User"].into_iter().fold(bindings, crud);
	bindings.bind(
		"Mutation",
		"addVouchers",
		Resolver::Add(MutationConfig::new("Voucher").multiple().post_hook(VoucherNotifier)),
	)
}
