use std::sync::Arc;

use async_graphql::{Request, Variables};
use docql::domain;
use docql_core::gql::Registry;
use docql_core::kvs::MemStore;
use serde_json::{Value, json};

pub const ACME: &str = "0190b5a8-0000-7000-8000-00000000c001";
pub const ACME_LABS: &str = "0190b5a8-0000-7000-8000-00000000c002";
pub const ALICE: &str = "0190b5a8-0000-7000-8000-00000000a001";
pub const BOB: &str = "0190b5a8-0000-7000-8000-00000000a002";
pub const CAROL: &str = "0190b5a8-0000-7000-8000-00000000a003";
pub const MUG: &str = "0190b5a8-0000-7000-8000-00000000b001";
pub const HOODIE: &str = "0190b5a8-0000-7000-8000-00000000b002";
pub const WELCOME: &str = "0190b5a8-0000-7000-8000-00000000d001";

pub fn seed_data() -> Value {
	json!({
		"Companies": [
			{ "_id": ACME, "name": "ACME" },
			{
				"_id": ACME_LABS,
				"name": "ACME Labs",
				"parent_id": ACME,
				"locations": [{ "name": "HQ", "address": "1 Main St" }],
			},
		],
		"Users": [
			{ "_id": ALICE, "name": "alice", "company_id": ACME, "reward_ids": [MUG, HOODIE, MUG] },
			{ "_id": BOB, "name": "bob", "company_id": ACME, "reward_ids": [HOODIE] },
			{ "_id": CAROL, "name": "carol", "company_id": ACME_LABS },
		],
		"Rewards": [
			{
				"_id": MUG,
				"name": "Mug",
				"points": 5,
				"stock": 10,
				"company_id": ACME,
				"images": "mug.png",
			},
			{ "_id": HOODIE, "name": "Hoodie", "points": 20, "stock": 2, "company_id": ACME },
		],
		"Vouchers": [
			{
				"_id": WELCOME,
				"code": "WELCOME",
				"points": 5,
				"reward_id": MUG,
				"company_id": ACME,
				"user_id": ALICE,
				"expiration_date": "2024-02-01",
			},
			{
				"code": "BIGSPENDER",
				"points": 20,
				"reward_id": HOODIE,
				"company_id": ACME,
				"user_id": BOB,
			},
			{ "code": "LABS", "points": 10, "company_id": ACME_LABS },
		],
	})
}

pub struct Gateway {
	pub ds: Arc<MemStore>,
	pub registry: Registry,
}

impl Gateway {
	/// The example domain over a store loaded with the seed data
	pub async fn seeded() -> Gateway {
		let ds = Arc::new(domain::store());
		domain::seed(&ds, &domain::catalog(), seed_data()).await.unwrap();
		let config = domain::load_config(None).await.unwrap();
		let registry = domain::registry(&config, ds.clone()).unwrap();
		Gateway {
			ds,
			registry,
		}
	}

	pub async fn run(&self, query: &str) -> Value {
		self.run_with(query, json!({})).await
	}

	pub async fn run_with(&self, query: &str, variables: Value) -> Value {
		let request = Request::new(query).variables(Variables::from_json(variables));
		let response = self.registry.execute(request).await;
		serde_json::to_value(&response).unwrap()
	}
}

/// The message of the first error of a response
pub fn error_message(res: &Value) -> String {
	res["errors"][0]["message"].as_str().unwrap_or_default().to_owned()
}
