pub mod branch_inspector;

pub use branch_inspector::{BranchInspector, GitBranchInspector};
