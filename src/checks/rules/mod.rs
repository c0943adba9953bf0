//! Built-in checks.

pub mod branch_name;
pub mod commit_message;
pub mod pr_body;
pub mod pr_title;

pub use branch_name::BranchNameCheck;
pub use commit_message::CommitMessageCheck;
pub use pr_body::{PrBodyChecklistCheck, PrBodyExcludesCheck, PrBodyIncludesCheck};
pub use pr_title::PrTitleCheck;
