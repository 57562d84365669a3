#![cfg(feature = "kv-mem")]

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::catalog::Catalog;
use crate::cnf::ID_FIELD;
use crate::err::{Error, Result};
use crate::kvs::{Datastore, Filter};
use crate::val::{Object, RecordId, Value};

/// An in-memory document store.
///
/// Collections are created on first write and keep their documents in
/// insertion order, which is the natural order returned by reads.
/// Fields declared unique in the catalog a store is created with are
/// enforced on every write.
#[derive(Debug, Default)]
pub struct MemStore {
	collections: RwLock<BTreeMap<String, Vec<Object>>>,
	unique: BTreeMap<String, Vec<String>>,
}

impl MemStore {
	/// Create a new, empty store
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a new, empty store enforcing the unique fields of a catalog
	pub fn with_catalog(catalog: &Catalog) -> Self {
		let unique = catalog
			.iter()
			.filter_map(|def| {
				let fields: Vec<String> = def.unique_fields().map(str::to_owned).collect();
				(!fields.is_empty()).then(|| (def.name.clone(), fields))
			})
			.collect();
		Self {
			collections: RwLock::default(),
			unique,
		}
	}

	/// Check that a document holds no unique value already taken by another
	fn check_unique<'a>(
		&self,
		tb: &str,
		doc: &Object,
		others: impl Iterator<Item = &'a Object> + Clone,
	) -> Result<()> {
		let Some(fields) = self.unique.get(tb) else {
			return Ok(());
		};
		for field in fields {
			let val = doc.pick(field);
			if val.is_nullish() {
				continue;
			}
			let clash = others.clone().find(|d| d.rid() != doc.rid() && d.pick(field) == val);
			if let Some(other) = clash {
				return Err(Error::IndexExists {
					collection: tb.to_owned(),
					field: field.clone(),
					value: val.to_string(),
					id: other.rid().copied().unwrap_or_default(),
				});
			}
		}
		Ok(())
	}

	/// Load a batch of documents into a collection, returning how many were stored
	pub async fn import(&self, tb: &str, docs: Vec<Object>) -> Result<usize> {
		let docs = self.insert_many(tb, docs).await?;
		trace!(collection = tb, count = docs.len(), "imported documents");
		Ok(docs.len())
	}

	/// Count the documents held in a collection
	pub async fn count(&self, tb: &str) -> usize {
		self.collections.read().await.get(tb).map(Vec::len).unwrap_or(0)
	}
}

/// Ensure a document carries a valid identifier, generating one if needed
fn identify(tb: &str, mut doc: Object) -> Result<(RecordId, Object)> {
	let id = match doc.pick(ID_FIELD) {
		Value::None | Value::Null => RecordId::new(),
		Value::RecordId(id) => *id,
		v => {
			return Err(Error::Ds(format!(
				"Expected a record identifier for `{ID_FIELD}` in `{tb}`, found {}",
				v.kind_of()
			)));
		}
	};
	doc.insert(ID_FIELD.to_owned(), Value::RecordId(id));
	Ok((id, doc))
}

#[async_trait]
impl Datastore for MemStore {
	async fn find(&self, tb: &str, filter: &Filter) -> Result<Vec<Object>> {
		let guard = self.collections.read().await;
		let out = match guard.get(tb) {
			Some(docs) => docs.iter().filter(|d| filter.matches(d)).cloned().collect(),
			None => Vec::new(),
		};
		Ok(out)
	}

	async fn find_one(&self, tb: &str, filter: &Filter) -> Result<Option<Object>> {
		let guard = self.collections.read().await;
		Ok(guard.get(tb).and_then(|docs| docs.iter().find(|d| filter.matches(d)).cloned()))
	}

	async fn insert_one(&self, tb: &str, doc: Object) -> Result<Object> {
		let mut out = self.insert_many(tb, vec![doc]).await?;
		out.pop().ok_or_else(|| Error::Unreachable("insert returned no document".to_owned()))
	}

	async fn insert_many(&self, tb: &str, docs: Vec<Object>) -> Result<Vec<Object>> {
		let mut guard = self.collections.write().await;
		let existing = guard.entry(tb.to_owned()).or_default();
		// Validate the whole batch before storing any of it
		let mut batch: Vec<Object> = Vec::with_capacity(docs.len());
		for doc in docs {
			let (id, doc) = identify(tb, doc)?;
			let taken = existing.iter().chain(batch.iter()).any(|d| d.rid() == Some(&id));
			if taken {
				return Err(Error::DuplicateId {
					collection: tb.to_owned(),
					id,
				});
			}
			self.check_unique(tb, &doc, existing.iter().chain(batch.iter()))?;
			batch.push(doc);
		}
		existing.extend(batch.iter().cloned());
		Ok(batch)
	}

	async fn update_one(&self, tb: &str, filter: &Filter, patch: Object) -> Result<()> {
		if patch.contains_key(ID_FIELD) {
			return Err(Error::Ds(format!("The `{ID_FIELD}` field of `{tb}` can not be updated")));
		}
		let mut guard = self.collections.write().await;
		let Some(docs) = guard.get_mut(tb) else {
			return Ok(());
		};
		let Some(pos) = docs.iter().position(|d| filter.matches(d)) else {
			return Ok(());
		};
		let mut doc = docs[pos].clone();
		doc.extend(patch);
		self.check_unique(tb, &doc, docs.iter())?;
		docs[pos] = doc;
		Ok(())
	}

	async fn delete_one(&self, tb: &str, filter: &Filter) -> Result<()> {
		let mut guard = self.collections.write().await;
		if let Some(docs) = guard.get_mut(tb) {
			if let Some(pos) = docs.iter().position(|d| filter.matches(d)) {
				docs.remove(pos);
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn doc(pairs: &[(&str, Value)]) -> Object {
		pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
	}

	#[tokio::test]
	async fn insert_assigns_identifiers() {
		let ds = MemStore::new();
		let out = ds.insert_one("Vouchers", doc(&[("code", "A".into())])).await.unwrap();
		let id = *out.rid().unwrap();
		let found = ds.find_one("Vouchers", &Filter::eq(ID_FIELD, id)).await.unwrap();
		assert_eq!(found, Some(out));
	}

	#[tokio::test]
	async fn insert_many_is_all_or_nothing() {
		let ds = MemStore::new();
		let id = RecordId::new();
		let batch = vec![doc(&[("_id", id.into())]), doc(&[("_id", id.into())])];
		let res = ds.insert_many("Rewards", batch).await;
		assert!(matches!(res, Err(Error::DuplicateId { .. })));
		assert_eq!(ds.count("Rewards").await, 0);
	}

	fn unique_codes() -> MemStore {
		use crate::catalog::{CollectionDef, FieldDef, Kind};
		let code = FieldDef::new("code", Kind::String).unique();
		let def = CollectionDef::new("Vouchers").field(code);
		MemStore::with_catalog(&Catalog::new().with(def))
	}

	#[tokio::test]
	async fn unique_fields_reject_taken_values() {
		let ds = unique_codes();
		ds.insert_one("Vouchers", doc(&[("code", "A".into())])).await.unwrap();
		let res = ds.insert_one("Vouchers", doc(&[("code", "A".into())])).await;
		assert!(matches!(res, Err(Error::IndexExists { ref field, .. }) if field == "code"));
		let batch = vec![doc(&[("code", "B".into())]), doc(&[("code", "B".into())])];
		assert!(ds.insert_many("Vouchers", batch).await.is_err());
		// Absent values never clash
		ds.insert_many("Vouchers", vec![doc(&[]), doc(&[])]).await.unwrap();
		assert_eq!(ds.count("Vouchers").await, 3);
	}

	#[tokio::test]
	async fn updates_keep_unique_fields_unique() {
		let ds = unique_codes();
		ds.insert_one("Vouchers", doc(&[("code", "A".into())])).await.unwrap();
		let b = ds.insert_one("Vouchers", doc(&[("code", "B".into())])).await.unwrap();
		let filter = Filter::eq(ID_FIELD, *b.rid().unwrap());
		let res = ds.update_one("Vouchers", &filter, doc(&[("code", "A".into())])).await;
		assert!(matches!(res, Err(Error::IndexExists { .. })));
		// Rewriting a document's own value is allowed
		ds.update_one("Vouchers", &filter, doc(&[("code", "B".into())])).await.unwrap();
		let found = ds.find_one("Vouchers", &filter).await.unwrap().unwrap();
		assert_eq!(found.pick("code"), &Value::from("B"));
	}

	#[tokio::test]
	async fn update_sets_only_given_fields() {
		let ds = MemStore::new();
		let out = ds
			.insert_one("Rewards", doc(&[("name", "Mug".into()), ("stock", Value::from(3i64))]))
			.await
			.unwrap();
		let id = *out.rid().unwrap();
		ds.update_one("Rewards", &Filter::eq(ID_FIELD, id), doc(&[("stock", Value::from(2i64))]))
			.await
			.unwrap();
		let found = ds.find_one("Rewards", &Filter::eq(ID_FIELD, id)).await.unwrap().unwrap();
		assert_eq!(found.pick("stock"), &Value::from(2i64));
		assert_eq!(found.pick("name"), &Value::from("Mug"));
	}

	#[tokio::test]
	async fn delete_without_match_is_a_no_op() {
		let ds = MemStore::new();
		ds.insert_one("Companies", doc(&[("name", "Acme".into())])).await.unwrap();
		ds.delete_one("Companies", &Filter::eq(ID_FIELD, RecordId::new())).await.unwrap();
		ds.delete_one("Unknown", &Filter::new()).await.unwrap();
		assert_eq!(ds.count("Companies").await, 1);
	}

	#[tokio::test]
	async fn find_keeps_insertion_order() {
		let ds = MemStore::new();
		for code in ["A", "B", "C"] {
			ds.insert_one("Vouchers", doc(&[("code", code.into())])).await.unwrap();
		}
		let codes: Vec<Value> = ds
			.find("Vouchers", &Filter::new())
			.await
			.unwrap()
			.into_iter()
			.map(|d| d.pick("code").clone())
			.collect();
		assert_eq!(codes, vec![Value::from("A"), Value::from("B"), Value::from("C")]);
	}
}
