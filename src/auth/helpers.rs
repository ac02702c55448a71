use chrono::Utc;
use uuid::Uuid;

use super::{TokenGenerator, hash_token};
use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::{Project, Token};

/// Creates a token for the named project and returns the raw value.
///
/// Only the hash is persisted, so the returned string is the one and only chance to
/// see it. Fails with `NotFound` if the project does not exist.
pub fn issue_token(store: &dyn Store, project_name: &str) -> Result<String> {
    let project = store
        .get_project_by_name(project_name)?
        .ok_or(Error::NotFound)?;

    let (raw_token, hash) = TokenGenerator::new().generate();
    let token = Token {
        id: Uuid::new_v4().to_string(),
        hashed_token: hash,
        project_id: project.id,
        created_at: Utc::now(),
    };
    store.create_token(&token)?;

    tracing::info!("Issued token {} for project '{}'", token.id, project_name);

    Ok(raw_token)
}

/// Resolves the project if the raw token belongs to it.
///
/// Returns `None` for an unknown project, a wrong token, or a store failure; callers
/// cannot tell these apart.
pub fn authorize(store: &dyn Store, raw_token: &str, project_name: &str) -> Option<Project> {
    let project = match store.get_project_by_name(project_name) {
        Ok(Some(project)) => project,
        Ok(None) => return None,
        Err(e) => {
            tracing::error!("Failed to look up project '{project_name}': {e}");
            return None;
        }
    };

    match store.count_tokens(&project.id, &hash_token(raw_token)) {
        Ok(count) if count > 0 => Some(project),
        Ok(_) => None,
        Err(e) => {
            tracing::error!("Failed to look up token for project '{project_name}': {e}");
            None
        }
    }
}

/// Checks whether a raw token grants access to the named project. Never fails.
pub fn verify_token(store: &dyn Store, raw_token: &str, project_name: &str) -> bool {
    authorize(store, raw_token, project_name).is_some()
}

/// Extracts the token from a `Bearer <token>` Authorization header value.
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() { None } else { Some(token) }
}
