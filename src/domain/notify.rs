use async_trait::async_trait;
use docql_core::gql::PostHook;
use docql_core::val::Object;

/// Announces newly issued vouchers.
#[derive(Clone, Copy, Debug, Default)]
pub struct VoucherNotifier;

#[async_trait]
impl PostHook for VoucherNotifier {
	async fn after_insert(&self, model: &str, docs: &[Object]) {
		for doc in docs {
			info!(
				target: crate::cnf::LOG,
				"Issued {model} {} with code {} worth {} points",
				doc.pick("_id"),
				doc.pick("code"),
				doc.pick("points"),
			);
		}
	}
}
