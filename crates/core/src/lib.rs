//! # docql core
//!
//! This crate is the core library of docql, a GraphQL gateway over a document
//! store. It turns a declared GraphQL type system plus a small table of
//! resolver bindings into an executable schema, without per-entity resolver
//! code: the collection to read, the foreign key to follow and the filter to
//! apply are all derived from type names and argument names.
//!
//! The main entry points are:
//! - [`gql::Registry`] which binds generated resolvers to a schema declaration
//! - [`kvs::Datastore`] the narrow storage interface the resolvers call through
//! - [`catalog::Catalog`] the storage model definitions used for casting and
//!   for resolving naming conventions against declared fields
//!

#[macro_use]
extern crate tracing;

pub mod catalog;
pub mod cnf;
pub mod err;
pub mod gql;
pub mod kvs;
pub mod val;
