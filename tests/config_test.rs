// tests/config_test.rs
use bump_version::config::{load_config, Config, PushTarget};
use bump_version::domain::BumpKind;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
tag_prefix = "app-"
default_bump = "minor"
package_dir = "packages/web"

[keywords]
major = ["BREAKING"]
patch = ["fix"]

[platform]
ios_plist = "ios/Runner/Info.plist"

[git]
user_name = "Release Bot"
remote = "upstream"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.tag_prefix, "app-");
    assert_eq!(config.default_bump_kind().unwrap(), Some(BumpKind::Minor));
    assert_eq!(config.package_dir, Some(PathBuf::from("packages/web")));
    assert_eq!(config.keywords.major, vec!["BREAKING"]);
    assert_eq!(config.keywords.patch, vec!["fix"]);
    // Tables left out of the file keep their defaults
    assert!(config.keywords.minor.contains(&"feat".to_string()));
    assert_eq!(
        config.platform.ios_plist,
        PathBuf::from("ios/Runner/Info.plist")
    );
    assert_eq!(
        config.platform.android_gradle,
        PathBuf::from("android/app/build.gradle")
    );
    assert_eq!(config.git.user_name, "Release Bot");
    assert_eq!(config.git.remote, "upstream");
    assert_eq!(config.commit_marker, "version bump to");
}

#[test]
fn test_invalid_file_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"skip_tag = \"maybe\"").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(err.to_string().contains("Invalid config file"));
}

#[test]
fn test_missing_custom_file_is_error() {
    assert!(load_config(Some("/nonexistent/bump-version.toml")).is_err());
}

#[test]
fn test_unknown_default_bump_is_rejected() {
    let mut config = Config::default();
    config.default_bump = Some("huge".to_string());
    assert!(config.default_bump_kind().is_err());
}

const CI_VARS: &[&str] = &[
    "INPUT_MESSAGE",
    "INPUT_MINOR-WORDING",
    "INPUT_DEFAULT",
    "INPUT_TAG-PREFIX",
    "INPUT_SKIP-TAG",
    "GITHUB_WORKSPACE",
    "GITHUB_REF",
    "GITHUB_ACTOR",
    "GITHUB_TOKEN",
    "GITHUB_REPOSITORY",
];

fn clear_ci_vars() {
    for name in CI_VARS {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_process_environment_overlay() {
    clear_ci_vars();
    env::set_var("INPUT_MESSAGE", "feat: search");
    env::set_var("INPUT_MINOR-WORDING", " feat , add ,");
    env::set_var("INPUT_DEFAULT", "none");
    env::set_var("INPUT_TAG-PREFIX", "web-");
    env::set_var("INPUT_SKIP-TAG", "true");
    env::set_var("GITHUB_WORKSPACE", "/tmp/checkout");
    env::set_var("GITHUB_REF", "refs/heads/release");
    env::set_var("GITHUB_ACTOR", "octocat");
    env::set_var("GITHUB_TOKEN", "secret");
    env::set_var("GITHUB_REPOSITORY", "acme/web");

    let mut config = Config::default();
    config.apply_env(|key| env::var(key).ok());
    clear_ci_vars();

    assert_eq!(config.message.as_deref(), Some("feat: search"));
    assert_eq!(config.keywords.minor, vec!["feat", "add"]);
    assert_eq!(config.default_bump_kind().unwrap(), None);
    assert_eq!(config.tag_prefix, "web-");
    assert!(config.skip_tag);
    assert_eq!(config.workspace, PathBuf::from("/tmp/checkout"));
    assert_eq!(config.run.git_ref.as_deref(), Some("refs/heads/release"));

    let target = config.git.push_target();
    assert_eq!(
        target,
        PushTarget::Url {
            url: "https://github.com/acme/web.git".to_string(),
            username: "octocat".to_string(),
            password: "secret".to_string(),
        }
    );
    assert!(!format!("{:?}", target).contains("secret"));
}

#[test]
#[serial]
fn test_unset_environment_keeps_file_values() {
    clear_ci_vars();

    let mut config = Config::default();
    config.tag_prefix = "app-".to_string();
    config.apply_env(|key| env::var(key).ok());

    assert_eq!(config.tag_prefix, "app-");
    assert_eq!(config.default_bump_kind().unwrap(), Some(BumpKind::Patch));
    assert_eq!(
        config.git.push_target(),
        PushTarget::Remote("origin".to_string())
    );
}
