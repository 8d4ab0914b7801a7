pub mod batch;
pub mod configuration;
pub mod repo;

pub use batch::{BatchResult, RepoFailure};
pub use configuration::{Configuration, ConfigurationSet};
pub use repo::{BranchSnapshot, RepoRef};
