mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::{Project, Token};

/// Store defines the database interface.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // Project operations
    fn create_project(&self, project: &Project) -> Result<()>;
    fn get_project_by_name(&self, name: &str) -> Result<Option<Project>>;
    fn list_projects(&self) -> Result<Vec<Project>>;

    // Token operations
    fn create_token(&self, token: &Token) -> Result<()>;
    fn count_tokens(&self, project_id: &str, hashed_token: &str) -> Result<i64>;
    fn count_project_tokens(&self, project_id: &str) -> Result<i64>;
}
