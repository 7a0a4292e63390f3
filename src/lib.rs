//! # crewload - fair workload assignment for small teams
//!
//! crewload keeps members, tasks, projects and goals as markdown files with
//! TOML frontmatter, scores every team member's current workload, and uses
//! those scores to pick reviewers and to spread goals evenly.
//!
//! ## Quick Start
//!
//! ```bash
//! crewload init
//! crewload member add "Ada"
//! crewload member add "Grace"
//! crewload task create "Fix login" -p high -a m-xxxxx
//! crewload review t-xxxxx
//! crewload rebalance --dry-run
//! crewload daily --days 7
//! ```
//!
//! ## Modules
//!
//! - [`assignment`]: scoring, reviewer selection, goal rebalancing, reports
//! - [`cli`]: command-line interface definitions and handlers
//! - [`config`]: configuration loading and management
//! - [`error`]: error types and result aliases
//! - [`graphql`]: GraphQL schema, resolvers and server
//! - [`model`]: members, tasks, projects and goals
//! - [`storage`]: file-based storage, transactions and the workspace lock
//! - [`validation`]: input validation utilities

/// Workload scoring, fair assignment and goal rebalancing.
pub mod assignment;

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `.crewload.toml` configuration files and workspace discovery.
pub mod config;

/// Error types and result aliases.
///
/// Defines the `CrewError` enum and `Result<T>` type alias.
pub mod error;

/// GraphQL schema, resolvers and HTTP server.
pub mod graphql;

pub mod logging;

/// Data models: `Member`, `Task`, `Project`, `Goal`.
pub mod model;

/// File-based storage layer.
///
/// Reads and writes records as markdown files with TOML frontmatter.
pub mod storage;

/// Input validation utilities.
pub mod validation;
