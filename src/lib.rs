//! The docql command-line tool and the example gateway domain.
//!
//! The generic resolver machinery lives in `docql-core`. This crate wires it
//! to a concrete set of entities (users, vouchers, rewards and companies),
//! loads configuration and seed data, and exposes everything on the command
//! line.

#[macro_use]
extern crate tracing;

#[macro_use]
mod mac;

pub mod cli;
pub mod cnf;
pub mod domain;
pub mod err;
pub mod telemetry;
