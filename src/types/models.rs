use chrono::{DateTime, Utc};

/// A registered command that can be triggered remotely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub directory: String,
    pub command: String,
    pub created_at: DateTime<Utc>,
}

/// A credential scoped to a single project. Only the hash of the secret is kept.
#[derive(Debug, Clone)]
pub struct Token {
    pub id: String,
    pub hashed_token: String,
    pub project_id: String,
    pub created_at: DateTime<Utc>,
}

/// Captured result of a finished shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_status: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_status == 0
    }
}
