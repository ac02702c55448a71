use std::path::PathBuf;

use crate::store::SqliteStore;

pub fn run_initdb(filename: PathBuf) -> anyhow::Result<()> {
    let path = std::path::absolute(&filename)?;
    SqliteStore::create(&path)?;

    println!("Created database at {}", path.display());
    Ok(())
}
