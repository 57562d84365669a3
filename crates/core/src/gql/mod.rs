//! Generic GraphQL resolvers over a document store.
//!
//! Entity types are declared in GraphQL SDL and bound to a handful of
//! resolver factories instead of hand-written resolvers:
//!
//! - **Naming** ([`naming`]) maps a type name to the collection storing it.
//! - **Arguments** (`args`) turn flat query arguments into storage filters,
//!   expanding the `_lte`, `_gte` and `_ids` suffixes.
//! - **Relations** ([`relation`]) work out, once at startup, how a relation
//!   field is stored and read the related documents on request.
//! - **Queries and mutations** ([`query`], [`mutation`]) read and write
//!   whole documents for top-level fields.
//! - **Registry** ([`schema`]) checks the bindings against the declarations
//!   and the catalog, and produces the executable schema.
//!
//! Configuration is read once ([`config`]) and never changes afterwards.

mod args;
pub mod config;
mod decl;
pub mod error;
pub mod mutation;
pub mod naming;
pub mod query;
pub mod relation;
pub mod schema;
mod utils;

pub use config::{Config, GraphQLConfig, UnknownKeys};
pub use error::GqlError;
pub use mutation::{MutationConfig, PostHook};
pub use naming::{Naming, lower_first};
pub use relation::{Relation, RelationConfig, Strategy};
pub use schema::{Bindings, Registry, Resolver};
pub use utils::Found;
