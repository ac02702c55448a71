use std::path::PathBuf;

use crate::auth::issue_token;
use crate::error::Error;

use super::open_store;

pub fn run_token_create(database: PathBuf, project: String) -> anyhow::Result<()> {
    let store = open_store(&database)?;

    let raw_token = match issue_token(&store, &project) {
        Ok(token) => token,
        Err(Error::NotFound) => anyhow::bail!("Project not found: {project}"),
        Err(e) => return Err(e.into()),
    };

    println!("Generated token: {raw_token}");
    println!("Please save the token as you will not be able to view it again later.");

    Ok(())
}
