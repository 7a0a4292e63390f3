//! File-based storage for a crewload workspace.
//!
//! Every record lives in its own markdown file under `.crewload/<kind>/`,
//! named `<id>--<slug>.md`, with TOML (`+++`) or YAML (`---`) frontmatter:
//!
//! ```markdown
//! +++
//! id = "t-4k2x9a"
//! title = "Review login flow"
//! priority = "high"
//! status = "open"
//! assignees = ["m-8dj2kq"]
//! created = "2025-03-10T09:00:00Z"
//! +++
//!
//! Notes for the reviewer.
//! ```
//!
//! ## Components
//!
//! - [`Repository`]: CRUD for one record kind
//! - [`Workspace`]: all repositories together, implementing [`AssignmentStore`](crate::assignment::AssignmentStore)
//! - [`Transaction`]: all-or-nothing batch of file writes
//! - [`WorkspaceLock`]: exclusive scope for mutating assignment operations

mod lock;
mod markdown;
mod repository;
mod transaction;
mod workspace;

pub use lock::{LOCK_FILE_NAME, WorkspaceLock};
pub use markdown::{
    FrontmatterFormat, detect_format, parse_markdown, parse_markdown_with_format, render_markdown,
    render_markdown_with_format,
};
pub use repository::Repository;
pub use transaction::Transaction;
pub use workspace::Workspace;
