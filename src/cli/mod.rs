mod initdb;
mod project;
mod token;
mod validation;

pub use initdb::run_initdb;
pub use project::{run_project_create, run_project_list};
pub use token::run_token_create;

use std::path::Path;

use crate::error::Error;
use crate::store::SqliteStore;

/// Open an existing database, pointing the operator at `initdb` if it is missing
pub fn open_store(database: &Path) -> anyhow::Result<SqliteStore> {
    SqliteStore::open(database).map_err(|e| match e {
        Error::Config(msg) => {
            anyhow::anyhow!("{msg}. Run 'remote-command-server initdb' to create a database.")
        }
        other => other.into(),
    })
}
