//! GraphQL API over a crewload workspace.
//!
//! ## Usage
//!
//! ```bash
//! # Start the GraphQL server
//! crewload serve --port 4000
//!
//! # Execute a query from the CLI
//! crewload query '{ scores { memberId score } }'
//!
//! # Execute a mutation from the CLI
//! crewload mutate 'rebalanceGoals(dryRun: true) { assigned rebalanced }'
//! ```
//!
//! ## Schema
//!
//! - **Queries**: `members`, `tasks`, `projects`, `goals`, `scores`, `breakdown`, `daily`
//! - **Mutations**: `assignReviewer`, `rebalanceGoals`

mod schema;
mod server;
mod types;

pub use schema::{AppState, CrewSchema, MutationRoot, QueryRoot, build_schema};
pub use server::run_server;
pub use types::*;
