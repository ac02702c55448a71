pub const SCHEMA: &str = r#"
-- Commands that may be triggered over HTTP
CREATE TABLE IF NOT EXISTS projects (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    directory TEXT NOT NULL,
    command TEXT NOT NULL,
    created_at TEXT DEFAULT (datetime('now'))
);

-- Bearer credentials; only the SHA-256 of the secret is stored.
-- No ON DELETE clause: a project cannot be removed while tokens reference it.
CREATE TABLE IF NOT EXISTS tokens (
    id TEXT PRIMARY KEY,
    hashed_token TEXT NOT NULL UNIQUE,
    project_id TEXT NOT NULL REFERENCES projects(id),
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_tokens_project ON tokens(project_id);
"#;
