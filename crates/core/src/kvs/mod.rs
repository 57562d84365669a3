//! The module defining the storage access interface.
//!
//! The GraphQL layer never touches storage transport details. Every read and
//! write it issues goes through the [`Datastore`] trait, which exposes the
//! following operations on named collections of documents:
//! - find
//! - find one
//! - insert one / insert many
//! - update one
//! - delete one
//!
//! These operations can be processed by the following storage engines:
//! - `mem`: in-memory document store, used for tests, seeding and the CLI

mod filter;
#[cfg(feature = "kv-mem")]
mod mem;

use async_trait::async_trait;

use crate::err::Result;
use crate::val::Object;

pub use filter::{Condition, Filter};
#[cfg(feature = "kv-mem")]
pub use mem::MemStore;

/// The narrow data-access interface the generated resolvers call through.
///
/// Implementations own connection management and pooling. Each call is
/// independent: the resolvers issue them sequentially and never batch,
/// coalesce or retry.
#[async_trait]
pub trait Datastore: Send + Sync + 'static {
	/// Fetch every document of a collection matching the filter, in the
	/// natural order of the store
	async fn find(&self, tb: &str, filter: &Filter) -> Result<Vec<Object>>;

	/// Fetch the first document of a collection matching the filter
	async fn find_one(&self, tb: &str, filter: &Filter) -> Result<Option<Object>>;

	/// Insert a document, assigning an identifier when it has none
	async fn insert_one(&self, tb: &str, doc: Object) -> Result<Object>;

	/// Insert an ordered sequence of documents
	async fn insert_many(&self, tb: &str, docs: Vec<Object>) -> Result<Vec<Object>>;

	/// Set the given fields on the first document matching the filter,
	/// leaving every other field untouched
	async fn update_one(&self, tb: &str, filter: &Filter, patch: Object) -> Result<()>;

	/// Remove the first document matching the filter, if there is one
	async fn delete_one(&self, tb: &str, filter: &Filter) -> Result<()>;
}
