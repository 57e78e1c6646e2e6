//! Library-level end-to-end tests for credential resolution.
//!
//! These exercise `config::load_with` directly so the interactive token
//! read and the API user resolution can be stubbed. They mutate process
//! environment variables and therefore run under `#[serial]`.

use std::env;
use std::fs;
use std::io::{self, BufRead, Cursor};
use std::path::Path;

use glcli::config::{DEFAULT_GITLAB_HOST, load_with};
use serial_test::serial;
use tempfile::TempDir;

const CREDENTIAL_VARS: &[&str] = &[
    "GL_CORE_HOST",
    "GL_CORE_USER",
    "GL_CORE_TOKEN",
    "GL_TLS_SKIP_VERIFY",
    "GL_TLS_CA_FILE",
    "CI_JOB_TOKEN",
    "CI_PROJECT_URL",
    "CI_PROJECT_PATH",
    "GITLAB_USER_LOGIN",
];

/// Point the config root at `root` and scrub credential variables.
fn isolate_env(root: &Path) {
    // SAFETY: all tests in this binary are #[serial].
    unsafe {
        env::set_var("XDG_CONFIG_HOME", root);
        for var in CREDENTIAL_VARS {
            env::remove_var(var);
        }
    }
}

fn read_token_line<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn resolve_alice(_host: &str, _token: &str, _skip_verify: bool) -> glcli::Result<String> {
    Ok("alice".to_string())
}

#[test]
#[serial]
fn test_first_run_setup_end_to_end() {
    let root = TempDir::new().unwrap();
    isolate_env(root.path());

    // Empty host line accepts the default; next line is the token.
    let mut input = Cursor::new("\nT1\n");
    let creds = load_with(&mut input, read_token_line, resolve_alice).unwrap();

    assert_eq!(creds.host, DEFAULT_GITLAB_HOST);
    assert_eq!(creds.token, "T1");
    assert_eq!(creds.user, "alice");
    assert_eq!(creds.ca_file, None);
    assert!(!creds.skip_verify);

    let content = fs::read_to_string(root.path().join("gl").join("gl.toml")).unwrap();
    assert!(content.contains(&format!("host = \"{DEFAULT_GITLAB_HOST}\"")));
    assert!(content.contains("token = \"T1\""));
    // The resolved username was persisted (no env overrides were active).
    assert!(content.contains("user = \"alice\""));
}

#[test]
#[serial]
fn test_legacy_config_migrated_end_to_end() {
    let root = TempDir::new().unwrap();
    isolate_env(root.path());
    fs::write(
        root.path().join("gl.yml"),
        "core:\n  - host: \"https://git.example.com\"\n    token: \"legacy-token\"\n",
    )
    .unwrap();

    let mut input = Cursor::new("");
    let creds = load_with(&mut input, read_token_line, resolve_alice).unwrap();

    assert_eq!(creds.host, "https://git.example.com");
    assert_eq!(creds.token, "legacy-token");
    assert_eq!(creds.user, "alice");

    // Legacy file replaced by the current format in the tool dir.
    assert!(!root.path().join("gl.yml").exists());
    let content = fs::read_to_string(root.path().join("gl").join("gl.toml")).unwrap();
    assert!(content.contains("host = \"https://git.example.com\""));
    assert!(!content.contains("[["));
}

#[test]
#[serial]
fn test_ci_credentials_short_circuit() {
    let root = TempDir::new().unwrap();
    isolate_env(root.path());
    unsafe {
        env::set_var("CI_JOB_TOKEN", "job-token");
        env::set_var("CI_PROJECT_URL", "https://ci.example.com/group/proj");
        env::set_var("CI_PROJECT_PATH", "group/proj");
        env::set_var("GITLAB_USER_LOGIN", "ci-bot");
    }

    let mut input = Cursor::new("");
    let creds = load_with(
        &mut input,
        |_: &mut Cursor<&str>| panic!("setup must not run with CI credentials"),
        |_, _, _| panic!("resolver must not run with CI credentials"),
    )
    .unwrap();

    assert_eq!(creds.host, "https://ci.example.com/");
    assert_eq!(creds.user, "ci-bot");
    assert_eq!(creds.token, "job-token");
    assert!(!creds.skip_verify);
    assert_eq!(creds.ca_file, None);

    // Nothing was migrated, written, or set up.
    assert!(!root.path().join("gl").exists());
    isolate_env(root.path());
}

#[test]
#[serial]
fn test_user_persistence_suppressed_by_env_override() {
    let root = TempDir::new().unwrap();
    isolate_env(root.path());
    let tool_dir = root.path().join("gl");
    fs::create_dir_all(&tool_dir).unwrap();
    let confpath = tool_dir.join("gl.toml");
    fs::write(
        &confpath,
        "[core]\nhost = \"https://file.example.com\"\ntoken = \"file-token\"\n",
    )
    .unwrap();

    unsafe { env::set_var("GL_CORE_HOST", "https://env.example.com") };
    let mut input = Cursor::new("");
    let creds = load_with(&mut input, read_token_line, resolve_alice).unwrap();

    // The bundle carries the resolved user and the env host, but the file
    // is left untouched.
    assert_eq!(creds.host, "https://env.example.com");
    assert_eq!(creds.user, "alice");
    let content = fs::read_to_string(&confpath).unwrap();
    assert!(!content.contains("user"));

    // Without the override the resolved user is persisted.
    unsafe { env::remove_var("GL_CORE_HOST") };
    let mut input = Cursor::new("");
    let creds = load_with(&mut input, read_token_line, resolve_alice).unwrap();
    assert_eq!(creds.host, "https://file.example.com");
    assert_eq!(creds.user, "alice");
    let content = fs::read_to_string(&confpath).unwrap();
    assert!(content.contains("user = \"alice\""));
}

#[test]
#[serial]
fn test_resolver_failure_is_fatal() {
    let root = TempDir::new().unwrap();
    isolate_env(root.path());
    let tool_dir = root.path().join("gl");
    fs::create_dir_all(&tool_dir).unwrap();
    fs::write(
        tool_dir.join("gl.toml"),
        "[core]\nhost = \"https://file.example.com\"\ntoken = \"file-token\"\n",
    )
    .unwrap();

    let mut input = Cursor::new("");
    let result = load_with(&mut input, read_token_line, |_, _, _| {
        Err(glcli::Error::UserResolve(
            glcli::gitlab::UserResolveError::Unauthorized,
        ))
    });

    assert!(result.is_err());
}

#[test]
#[serial]
fn test_tls_settings_resolved_from_file() {
    let root = TempDir::new().unwrap();
    isolate_env(root.path());
    let tool_dir = root.path().join("gl");
    fs::create_dir_all(&tool_dir).unwrap();
    fs::write(
        tool_dir.join("gl.toml"),
        concat!(
            "[core]\n",
            "host = \"https://self-signed.example.com\"\n",
            "user = \"carol\"\n",
            "token = \"tok\"\n",
            "\n",
            "[tls]\n",
            "skip_verify = true\n",
            "ca_file = \"/etc/gitlab/ca.pem\"\n",
        ),
    )
    .unwrap();

    let mut input = Cursor::new("");
    let creds = load_with(&mut input, read_token_line, resolve_alice).unwrap();

    assert!(creds.skip_verify);
    assert_eq!(
        creds.ca_file.as_deref(),
        Some(Path::new("/etc/gitlab/ca.pem"))
    );
    assert_eq!(creds.user, "carol");
}

#[test]
#[serial]
fn test_setup_failure_propagates() {
    let root = TempDir::new().unwrap();
    isolate_env(root.path());

    // Host line is not a parseable URL: setup fails, no config produced.
    let mut input = Cursor::new("definitely not a url\ntok\n");
    let result = load_with(&mut input, read_token_line, resolve_alice);

    assert!(matches!(result, Err(glcli::Error::InvalidHost { .. })));
    assert!(!root.path().join("gl").join("gl.toml").exists());
}
