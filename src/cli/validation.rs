const MAX_PROJECT_NAME_LEN: usize = 100;

/// Project names end up as a URL path segment, so they cannot contain `/`.
pub fn validate_project_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Project name cannot be empty".to_string());
    }
    if name.len() > MAX_PROJECT_NAME_LEN {
        return Err(format!(
            "Project name cannot exceed {MAX_PROJECT_NAME_LEN} characters"
        ));
    }
    if name.contains('/') {
        return Err("Project name cannot contain '/'".to_string());
    }
    if name.chars().any(char::is_control) {
        return Err("Project name contains invalid characters".to_string());
    }
    Ok(())
}
