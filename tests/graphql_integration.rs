mod common;

mod graphql_integration {
	use rstest::rstest;
	use serde_json::json;

	use crate::common::{
		ACME, ACME_LABS, ALICE, BOB, Gateway, HOODIE, MUG, WELCOME, error_message,
	};

	#[test_log::test(tokio::test)]
	async fn reads_follow_relations() {
		let gw = Gateway::seeded().await;
		let res = gw
			.run(&format!(
				r#"{{
					voucher(_id: "{WELCOME}") {{
						_id code points expiration_date
						reward {{ name images }}
						company {{ name }}
						user {{ name }}
					}}
				}}"#
			))
			.await;
		let expected = json!({
			"data": {
				"voucher": {
					"_id": WELCOME,
					"code": "WELCOME",
					"points": 5,
					"expiration_date": "2024-02-01T00:00:00Z",
					"reward": { "name": "Mug", "images": ["mug.png"] },
					"company": { "name": "ACME" },
					"user": { "name": "alice" },
				}
			}
		});
		assert_eq!(expected, res);
	}

	#[test_log::test(tokio::test)]
	async fn missing_foreign_keys_resolve_to_null() {
		let gw = Gateway::seeded().await;
		let res = gw
			.run(
				r#"{
					vouchers(voucher: { code: "LABS" }) { code reward { name } user { name } }
				}"#,
			)
			.await;
		let expected = json!({
			"data": { "vouchers": [{ "code": "LABS", "reward": null, "user": null }] }
		});
		assert_eq!(expected, res);
	}

	#[test_log::test(tokio::test)]
	async fn dangling_foreign_keys_resolve_to_null() {
		let gw = Gateway::seeded().await;
		let res = gw
			.run(&format!(r#"mutation {{ removeReward(reward: {{ _id: "{MUG}" }}) {{ _id }} }}"#))
			.await;
		assert!(res["errors"].is_null(), "{res}");
		let res = gw
			.run(&format!(r#"{{ voucher(_id: "{WELCOME}") {{ code reward {{ name }} }} }}"#))
			.await;
		let expected = json!({
			"data": { "voucher": { "code": "WELCOME", "reward": null } }
		});
		assert_eq!(expected, res);
	}

	#[test_log::test(tokio::test)]
	async fn to_many_relations_read_child_foreign_keys() {
		let gw = Gateway::seeded().await;
		let res = gw
			.run(&format!(
				r#"{{
					company(_id: "{ACME}") {{
						name
						parent {{ name }}
						users {{ name }}
						vouchers {{ code }}
						rewards {{ name }}
					}}
				}}"#
			))
			.await;
		let expected = json!({
			"data": {
				"company": {
					"name": "ACME",
					"parent": null,
					"users": [{ "name": "alice" }, { "name": "bob" }],
					"vouchers": [{ "code": "WELCOME" }, { "code": "BIGSPENDER" }],
					"rewards": [{ "name": "Mug" }, { "name": "Hoodie" }],
				}
			}
		});
		assert_eq!(expected, res);
	}

	#[test_log::test(tokio::test)]
	async fn parent_companies_and_embedded_locations() {
		let gw = Gateway::seeded().await;
		let res = gw
			.run(&format!(
				r#"{{
					company(_id: "{ACME_LABS}") {{
						name
						parent {{ _id name }}
						locations {{ name address }}
						users {{ name }}
					}}
				}}"#
			))
			.await;
		let expected = json!({
			"data": {
				"company": {
					"name": "ACME Labs",
					"parent": { "_id": ACME, "name": "ACME" },
					"locations": [{ "name": "HQ", "address": "1 Main St" }],
					"users": [{ "name": "carol" }],
				}
			}
		});
		assert_eq!(expected, res);
	}

	#[test_log::test(tokio::test)]
	async fn many_to_many_through_member_arrays() {
		let gw = Gateway::seeded().await;
		let res = gw
			.run(&format!(
				r#"{{
					hoodie: reward(_id: "{HOODIE}") {{ users {{ name }} }}
					mug: reward(_id: "{MUG}") {{ users {{ name }} }}
				}}"#
			))
			.await;
		let expected = json!({
			"data": {
				"hoodie": { "users": [{ "name": "alice" }, { "name": "bob" }] },
				"mug": { "users": [{ "name": "alice" }] },
			}
		});
		assert_eq!(expected, res);
	}

	#[test_log::test(tokio::test)]
	async fn many_to_many_fallback_collapses_duplicates() {
		let gw = Gateway::seeded().await;
		let res = gw
			.run(&format!(
				r#"{{
					alice: user(_id: "{ALICE}") {{ rewards {{ name }} }}
					bob: user(_id: "{BOB}") {{ rewards {{ name }} }}
				}}"#
			))
			.await;
		let expected = json!({
			"data": {
				"alice": { "rewards": [{ "name": "Mug" }, { "name": "Hoodie" }] },
				"bob": { "rewards": [{ "name": "Hoodie" }] },
			}
		});
		assert_eq!(expected, res);
	}

	#[test_log::test(tokio::test)]
	async fn suffixed_arguments_filter() {
		let gw = Gateway::seeded().await;
		let res = gw
			.run(
				r#"{
					cheap: vouchers(voucher: { points_lte: 10 }) { code }
					range: vouchers(voucher: { points_gte: 6, points_lte: 20 }) { code }
					stocked: rewards(reward: { stock_gte: 5 }) { name }
					flat: vouchers(voucher: null) { code }
				}"#,
			)
			.await;
		let expected = json!({
			"data": {
				"cheap": [{ "code": "WELCOME" }, { "code": "LABS" }],
				"range": [{ "code": "BIGSPENDER" }, { "code": "LABS" }],
				"stocked": [{ "name": "Mug" }],
				"flat": [{ "code": "WELCOME" }, { "code": "BIGSPENDER" }, { "code": "LABS" }],
			}
		});
		assert_eq!(expected, res);
	}

	#[rstest]
	#[case("points_lte: 4", &[])]
	#[case("points_gte: 20", &["BIGSPENDER"])]
	#[case("points_gte: 5, points_lte: 5", &["WELCOME"])]
	#[case("points_lte: 19, points_gte: 11", &[])]
	#[case("points: 10", &["LABS"])]
	#[tokio::test]
	async fn point_bounds_select_vouchers(#[case] args: &str, #[case] codes: &[&str]) {
		let gw = Gateway::seeded().await;
		let res = gw.run(&format!("{{ vouchers(voucher: {{ {args} }}) {{ code }} }}")).await;
		let found: Vec<_> = codes.iter().map(|c| json!({ "code": c })).collect();
		assert_eq!(json!({ "data": { "vouchers": found } }), res);
	}

	#[test_log::test(tokio::test)]
	async fn id_lists_match_documents_holding_every_id() {
		let gw = Gateway::seeded().await;
		let res = gw
			.run_with(
				"query($ids: [ID]) { users(user: { reward_ids: $ids }) { name } }",
				json!({ "ids": [MUG, HOODIE] }),
			)
			.await;
		assert_eq!(json!({ "data": { "users": [{ "name": "alice" }] } }), res);
		let res = gw
			.run_with(
				"query($ids: [ID]) { users(user: { reward_ids: $ids }) { name } }",
				json!({ "ids": [HOODIE] }),
			)
			.await;
		assert_eq!(json!({ "data": { "users": [{ "name": "alice" }, { "name": "bob" }] } }), res);
	}

	#[test_log::test(tokio::test)]
	async fn add_edit_read_round_trip() {
		let gw = Gateway::seeded().await;
		let res = gw
			.run(&format!(
				r#"mutation {{
					addVoucher(voucher: {{ points: 7, company_id: "{ACME}" }}) {{
						_id code points company {{ name }}
					}}
				}}"#
			))
			.await;
		let added = &res["data"]["addVoucher"];
		assert!(res["errors"].is_null(), "{res}");
		let id = added["_id"].as_str().unwrap().to_owned();
		let code = added["code"].as_str().unwrap().to_owned();
		assert_eq!(code.len(), 6);
		assert_eq!(added["company"], json!({ "name": "ACME" }));

		let res = gw
			.run_with(
				"mutation($v: VoucherInput) { editVoucher(voucher: $v) { _id code points } }",
				json!({ "v": { "_id": id, "points": 8 } }),
			)
			.await;
		let expected = json!({
			"data": { "editVoucher": { "_id": id, "code": code, "points": 8 } }
		});
		assert_eq!(expected, res);

		let res = gw
			.run(&format!(r#"{{ voucher(_id: "{id}") {{ _id code points company {{ name }} }} }}"#))
			.await;
		let expected = json!({
			"data": {
				"voucher": { "_id": id, "code": code, "points": 8, "company": { "name": "ACME" } }
			}
		});
		assert_eq!(expected, res);
		assert_eq!(gw.ds.count("Vouchers").await, 4);
	}

	#[test_log::test(tokio::test)]
	async fn remove_is_idempotent() {
		let gw = Gateway::seeded().await;
		let remove = format!(
			r#"mutation {{ removeVoucher(voucher: {{ _id: "{WELCOME}" }}) {{ _id code }} }}"#
		);
		let expected = json!({ "data": { "removeVoucher": { "_id": WELCOME, "code": null } } });
		assert_eq!(expected, gw.run(&remove).await);
		let res =
			gw.run(&format!(r#"{{ vouchers(voucher: {{ _id: "{WELCOME}" }}) {{ code }} }}"#)).await;
		assert_eq!(json!({ "data": { "vouchers": [] } }), res);
		assert_eq!(expected, gw.run(&remove).await);
		assert_eq!(gw.ds.count("Vouchers").await, 2);
	}

	#[test_log::test(tokio::test)]
	async fn editing_a_missing_document_fails() {
		let gw = Gateway::seeded().await;
		let missing = "0190b5a8-0000-7000-8000-0000000000ff";
		let res = gw
			.run(&format!(
				r#"mutation {{
					editVoucher(voucher: {{ _id: "{missing}", points: 1 }}) {{ _id }}
				}}"#
			))
			.await;
		assert!(res["data"].is_null(), "{res}");
		assert_eq!(error_message(&res), format!("No document `{missing}` found in `Vouchers`"));
		assert_eq!(gw.ds.count("Vouchers").await, 3);
	}

	#[test_log::test(tokio::test)]
	async fn editing_without_an_id_fails() {
		let gw = Gateway::seeded().await;
		let res = gw.run(r#"mutation { editVoucher(voucher: { points: 1 }) { _id } }"#).await;
		assert_eq!(error_message(&res), "Invalid input: `editVoucher` requires `_id`");
	}

	#[test_log::test(tokio::test)]
	async fn malformed_ids_are_rejected() {
		let gw = Gateway::seeded().await;
		let res = gw.run(r#"{ user(_id: "nope") { name } }"#).await;
		assert!(res["data"].is_null(), "{res}");
		let expected = r#"Invalid input: Expected `_id` to be record, found "nope""#;
		assert_eq!(error_message(&res), expected);
	}

	#[test_log::test(tokio::test)]
	async fn add_many_vouchers() {
		let gw = Gateway::seeded().await;
		let res = gw
			.run(
				r#"mutation {
					addVouchers(vouchers: [{ code: "A", points: 1 }, { points: 2 }]) { code points }
				}"#,
			)
			.await;
		let added = res["data"]["addVouchers"].as_array().unwrap();
		assert_eq!(added.len(), 2);
		assert_eq!(added[0], json!({ "code": "A", "points": 1 }));
		assert_eq!(added[1]["points"], json!(2));
		assert_eq!(added[1]["code"].as_str().unwrap().len(), 6);
		assert_eq!(gw.ds.count("Vouchers").await, 5);
	}

	#[test_log::test(tokio::test)]
	async fn voucher_codes_are_unique() {
		let gw = Gateway::seeded().await;
		let res = gw.run(r#"mutation { addVoucher(voucher: { code: "WELCOME" }) { _id } }"#).await;
		assert!(res["data"].is_null(), "{res}");
		let message = error_message(&res);
		let taken = r#"Database error: Database index `Vouchers.code` already contains "WELCOME""#;
		assert!(message.starts_with(taken), "{message}");
		assert!(message.ends_with(&format!("with record `{WELCOME}`")), "{message}");
		assert_eq!(gw.ds.count("Vouchers").await, 3);
	}

	#[test_log::test(tokio::test)]
	async fn add_company_with_locations_and_parent() {
		let gw = Gateway::seeded().await;
		let res = gw
			.run(&format!(
				r#"mutation {{
					addCompany(company: {{
						name: "ACME Mobile",
						parent_id: "{ACME}",
						locations: [{{ name: "Depot", address: "2 Side St" }}]
					}}) {{
						name
						parent {{ name }}
						locations {{ name address }}
					}}
				}}"#
			))
			.await;
		let expected = json!({
			"data": {
				"addCompany": {
					"name": "ACME Mobile",
					"parent": { "name": "ACME" },
					"locations": [{ "name": "Depot", "address": "2 Side St" }],
				}
			}
		});
		assert_eq!(expected, res);
	}

	#[test_log::test(tokio::test)]
	async fn relation_descriptors_are_listed() {
		let gw = Gateway::seeded().await;
		let relations: Vec<String> =
			gw.registry.relations().iter().map(ToString::to_string).collect();
		assert_eq!(relations.len(), 12);
		assert!(relations.contains(
			&"Company.parent -> Companies (one) where parent.parent_id = child._id".to_owned()
		));
		assert!(relations.contains(
			&"User.rewards -> Rewards (many) where parent.reward_ids CONTAINS child._id".to_owned()
		));
		assert!(relations.contains(
			&"Reward.users -> Users (many) where child.reward_ids CONTAINS parent._id".to_owned()
		));
	}

	#[test_log::test(tokio::test)]
	async fn generated_schema_keeps_the_declarations() {
		let gw = Gateway::seeded().await;
		let sdl = gw.registry.sdl();
		assert!(sdl.contains("addVouchers(vouchers: [VoucherInput]): [Voucher]"), "{sdl}");
		assert!(sdl.contains("input LocationInput"), "{sdl}");
	}
}
