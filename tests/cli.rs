//! CLI integration tests for the provisioning commands.
//!
//! Each test uses an isolated temp directory for the database, ensuring tests
//! can run in parallel safely.

#![allow(deprecated)] // Command::cargo_bin deprecation only affects custom build dirs

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;
use serde_json::Value;

use remote_command_server::auth::{hash_token, verify_token};
use remote_command_server::store::{SqliteStore, Store};

struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    fn db_path(&self) -> PathBuf {
        self.path().join("test.sqlite")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("remote-command-server").expect("failed to find binary");
        cmd.env_remove("REMOTE_COMMAND_DATABASE");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    fn initdb(&self) -> assert_cmd::assert::Assert {
        self.cmd().arg("initdb").arg(self.db_path()).assert()
    }

    fn add_project(&self, name: &str, directory: &Path) -> assert_cmd::assert::Assert {
        self.cmd()
            .args(["project", "--command", "some command", "--database"])
            .arg(self.db_path())
            .arg("--directory")
            .arg(directory)
            .args(["--name", name])
            .assert()
    }

    fn create_token(&self, project: &str) -> assert_cmd::assert::Assert {
        self.cmd()
            .args(["token", "--database"])
            .arg(self.db_path())
            .args(["--project", project])
            .assert()
    }

    fn store(&self) -> SqliteStore {
        SqliteStore::open(self.db_path()).expect("open database")
    }
}

fn generated_token(output: &[u8]) -> String {
    String::from_utf8_lossy(output)
        .lines()
        .find_map(|line| line.strip_prefix("Generated token: "))
        .expect("token line")
        .trim()
        .to_string()
}

// initdb

#[test]
fn test_initdb_creates_database_file() {
    let ctx = TestContext::new();
    ctx.initdb().success();

    let store = ctx.store();
    assert!(store.list_projects().unwrap().is_empty());
}

#[test]
fn test_initdb_argument_must_not_exist() {
    let ctx = TestContext::new();
    std::fs::write(ctx.db_path(), "").unwrap();

    ctx.initdb()
        .failure()
        .stderr(predicate::str::contains("exists"));
}

#[test]
fn test_initdb_argument_must_be_present() {
    let ctx = TestContext::new();
    ctx.cmd()
        .arg("initdb")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

// project

#[test]
fn test_project_creates_project() {
    let ctx = TestContext::new();
    ctx.initdb().success();

    ctx.add_project("Test Project", ctx.path()).success();

    let project = ctx
        .store()
        .get_project_by_name("Test Project")
        .unwrap()
        .expect("project exists");
    assert_eq!(project.command, "some command");
    assert_eq!(
        PathBuf::from(&project.directory),
        ctx.path().canonicalize().unwrap()
    );
}

#[test]
fn test_project_directory_is_made_absolute() {
    let ctx = TestContext::new();
    ctx.initdb().success();
    std::fs::create_dir(ctx.path().join("work")).unwrap();

    ctx.cmd()
        .current_dir(ctx.path())
        .args(["project", "-c", "pwd", "--db"])
        .arg(ctx.db_path())
        .args(["-d", "work", "-n", "relative"])
        .assert()
        .success();

    let project = ctx.store().get_project_by_name("relative").unwrap().unwrap();
    assert!(Path::new(&project.directory).is_absolute());
    assert_eq!(
        PathBuf::from(&project.directory),
        ctx.path().join("work").canonicalize().unwrap()
    );
}

#[test]
fn test_project_name_must_be_unique() {
    let ctx = TestContext::new();
    ctx.initdb().success();
    ctx.add_project("Test Project", ctx.path()).success();

    ctx.add_project("Test Project", ctx.path())
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(ctx.store().list_projects().unwrap().len(), 1);
}

#[test]
fn test_project_name_cannot_contain_slash() {
    let ctx = TestContext::new();
    ctx.initdb().success();

    ctx.add_project("a/b", ctx.path())
        .failure()
        .stderr(predicate::str::contains("'/'"));
}

#[test]
fn test_project_directory_must_exist() {
    let ctx = TestContext::new();
    ctx.initdb().success();

    ctx.add_project("Test Project", &ctx.path().join("i_do_not_exist"))
        .failure()
        .stderr(predicate::str::contains("exist"));
}

#[test]
fn test_project_directory_must_be_a_directory() {
    let ctx = TestContext::new();
    ctx.initdb().success();

    ctx.add_project("Test Project", &ctx.db_path())
        .failure()
        .stderr(predicate::str::contains("directory"));
}

#[test]
fn test_project_database_file_must_exist() {
    let ctx = TestContext::new();

    ctx.add_project("Test Project", ctx.path())
        .failure()
        .stderr(predicate::str::contains("Database file does not exist"))
        .stderr(predicate::str::contains("initdb"));
}

#[test]
fn test_project_database_file_must_be_a_file() {
    let ctx = TestContext::new();

    ctx.cmd()
        .args(["project", "--command", "some command", "--database"])
        .arg(ctx.path())
        .arg("--directory")
        .arg(ctx.path())
        .args(["--name", "Test Project"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a file"));
}

#[test]
fn test_all_project_options_must_be_present() {
    let ctx = TestContext::new();
    let options: [&[&str]; 4] = [
        &["--database", "some-file.sqlite", "--directory", "/tmp", "--name", "Some Project"],
        &["--command", "some command", "--directory", "/tmp", "--name", "Some Project"],
        &["--command", "some command", "--database", "some-file.sqlite", "--name", "Some Project"],
        &["--command", "some command", "--database", "some-file.sqlite", "--directory", "/tmp"],
    ];

    for args in options {
        ctx.cmd()
            .arg("project")
            .args(args)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Usage"));
    }
}

#[test]
fn test_projects_lists_json() {
    let ctx = TestContext::new();
    ctx.initdb().success();
    ctx.add_project("alpha", ctx.path()).success();
    ctx.create_token("alpha").success();

    let output = ctx
        .cmd()
        .args(["projects", "--json", "--database"])
        .arg(ctx.db_path())
        .output()
        .expect("failed to run command");
    assert!(output.status.success());

    let projects: Value = serde_json::from_slice(&output.stdout).expect("parse JSON");
    let projects = projects.as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["name"], "alpha");
    assert_eq!(projects[0]["command"], "some command");
    assert_eq!(projects[0]["tokens"], 1);
}

// token

#[test]
fn test_token_creates_token() {
    let ctx = TestContext::new();
    ctx.initdb().success();
    ctx.add_project("Test Project", ctx.path()).success();

    let output = ctx
        .create_token("Test Project")
        .success()
        .stdout(predicate::str::contains("not be able to view it again"))
        .get_output()
        .stdout
        .clone();
    let token = generated_token(&output);

    let store = ctx.store();
    let project = store.get_project_by_name("Test Project").unwrap().unwrap();
    assert_eq!(store.count_tokens(&project.id, &hash_token(&token)).unwrap(), 1);
    assert!(verify_token(&store, &token, "Test Project"));
}

#[test]
fn test_token_project_must_exist() {
    let ctx = TestContext::new();
    ctx.initdb().success();

    ctx.create_token("Missing Project")
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_token_database_file_must_exist() {
    let ctx = TestContext::new();

    ctx.create_token("Test Project")
        .failure()
        .stderr(predicate::str::contains("exist"));
}

#[test]
fn test_token_database_file_must_be_a_file() {
    let ctx = TestContext::new();

    ctx.cmd()
        .args(["token", "--database"])
        .arg(ctx.path())
        .args(["--project", "Test Project"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file"));
}

#[test]
fn test_all_token_options_must_be_present() {
    let ctx = TestContext::new();
    let options: [&[&str]; 2] = [&["--database", "some-file.sqlite"], &["--project", "Some Project"]];

    for args in options {
        ctx.cmd()
            .arg("token")
            .args(args)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Usage"));
    }
}
