use crate::domain::BumpKind;
use crate::error::{BumpError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file searched in the working and user config directories
pub const CONFIG_FILE_NAME: &str = "bump-version.toml";

/// Represents the complete configuration for a bump run.
///
/// Built once at start-up from defaults, an optional TOML file and the CI
/// environment, then passed by reference to every component.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Free-text message to classify; falls back to the event commits when unset
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default = "default_commit_marker")]
    pub commit_marker: String,

    #[serde(default)]
    pub keywords: KeywordSet,

    /// Bump applied when no tier matches; `None` means skip
    #[serde(default = "default_bump")]
    pub default_bump: Option<String>,

    #[serde(default)]
    pub tag_prefix: String,

    #[serde(default)]
    pub skip_tag: bool,

    #[serde(default = "default_workspace")]
    pub workspace: PathBuf,

    /// Package directory relative to the workspace
    #[serde(default)]
    pub package_dir: Option<PathBuf>,

    #[serde(default)]
    pub platform: PlatformFilesConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(skip)]
    pub run: RunContext,
}

/// Returns the default bump-commit marker phrase.
fn default_commit_marker() -> String {
    "version bump to".to_string()
}

fn default_bump() -> Option<String> {
    Some("patch".to_string())
}

fn default_workspace() -> PathBuf {
    PathBuf::from(".")
}

/// Returns the default list of keywords that trigger major version bumps.
fn default_major_keywords() -> Vec<String> {
    vec!["MAJOR".to_string(), "cut-major".to_string()]
}

/// Returns the default list of keywords that trigger minor version bumps.
fn default_minor_keywords() -> Vec<String> {
    vec!["feat".to_string(), "minor".to_string()]
}

/// Returns the default list of keywords that trigger prerelease bumps.
fn default_prerelease_keywords() -> Vec<String> {
    vec![
        "pre-alpha".to_string(),
        "pre-beta".to_string(),
        "pre-rc".to_string(),
    ]
}

/// Keyword lists compared against raw message text, one per bump tier.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct KeywordSet {
    #[serde(default = "default_major_keywords")]
    pub major: Vec<String>,

    #[serde(default = "default_minor_keywords")]
    pub minor: Vec<String>,

    /// An empty list disables the patch tier
    #[serde(default)]
    pub patch: Vec<String>,

    #[serde(default = "default_prerelease_keywords")]
    pub prerelease: Vec<String>,
}

impl Default for KeywordSet {
    fn default() -> Self {
        KeywordSet {
            major: default_major_keywords(),
            minor: default_minor_keywords(),
            patch: Vec::new(),
            prerelease: default_prerelease_keywords(),
        }
    }
}

impl KeywordSet {
    /// Keyword set with every list empty
    pub fn empty() -> Self {
        KeywordSet {
            major: Vec::new(),
            minor: Vec::new(),
            patch: Vec::new(),
            prerelease: Vec::new(),
        }
    }
}

fn default_ios_plist() -> PathBuf {
    PathBuf::from("ios/App/App/Info.plist")
}

fn default_android_gradle() -> PathBuf {
    PathBuf::from("android/app/build.gradle")
}

/// Locations of the platform build-metadata files, relative to the workspace.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PlatformFilesConfig {
    #[serde(default = "default_ios_plist")]
    pub ios_plist: PathBuf,

    #[serde(default = "default_android_gradle")]
    pub android_gradle: PathBuf,
}

impl Default for PlatformFilesConfig {
    fn default() -> Self {
        PlatformFilesConfig {
            ios_plist: default_ios_plist(),
            android_gradle: default_android_gradle(),
        }
    }
}

fn default_user_name() -> String {
    "Automated Version Bump".to_string()
}

fn default_user_email() -> String {
    "gh-action-bump-version@users.noreply.github.com".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Commit identity and push credentials.
#[derive(Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_user_name")]
    pub user_name: String,

    #[serde(default = "default_user_email")]
    pub user_email: String,

    /// Remote used for fetch, and for push when no token URL can be built
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default)]
    pub actor: Option<String>,

    #[serde(default, skip_serializing)]
    pub token: Option<String>,

    /// `owner/name` slug of the hosted repository
    #[serde(default)]
    pub repository: Option<String>,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            user_name: default_user_name(),
            user_email: default_user_email(),
            remote: default_remote(),
            actor: None,
            token: None,
            repository: None,
        }
    }
}

impl std::fmt::Debug for GitConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitConfig")
            .field("user_name", &self.user_name)
            .field("user_email", &self.user_email)
            .field("remote", &self.remote)
            .field("actor", &self.actor)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("repository", &self.repository)
            .finish()
    }
}

impl GitConfig {
    /// Destination for the final push.
    ///
    /// Returns `https://github.com/<repo>.git` with the actor and token as
    /// credentials when all three are known, otherwise the remote name.
    pub fn push_target(&self) -> PushTarget {
        match (&self.actor, &self.token, &self.repository) {
            (Some(actor), Some(token), Some(repository)) => PushTarget::Url {
                url: format!("https://github.com/{}.git", repository),
                username: actor.clone(),
                password: token.clone(),
            },
            _ => PushTarget::Remote(self.remote.clone()),
        }
    }
}

/// Where the bump commit and tag are pushed.
#[derive(Clone, PartialEq, Eq)]
pub enum PushTarget {
    /// A configured remote, authenticated by the local git setup
    Remote(String),
    /// An explicit URL with token credentials
    Url {
        url: String,
        username: String,
        password: String,
    },
}

impl std::fmt::Debug for PushTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PushTarget::Remote(name) => f.debug_tuple("Remote").field(name).finish(),
            PushTarget::Url { url, username, .. } => f
                .debug_struct("Url")
                .field("url", url)
                .field("username", username)
                .field("password", &"***")
                .finish(),
        }
    }
}

/// Facts about the triggering run, never read from a file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunContext {
    /// Triggering ref, e.g. `refs/heads/main`
    pub git_ref: Option<String>,
    /// Pull-request head branch, present only for pull-request runs
    pub head_ref: Option<String>,
    /// Path of the JSON event payload
    pub event_path: Option<PathBuf>,
    /// File receiving exported output values
    pub output_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            message: None,
            commit_marker: default_commit_marker(),
            keywords: KeywordSet::default(),
            default_bump: default_bump(),
            tag_prefix: String::new(),
            skip_tag: false,
            workspace: default_workspace(),
            package_dir: None,
            platform: PlatformFilesConfig::default(),
            git: GitConfig::default(),
            run: RunContext::default(),
        }
    }
}

/// Split a comma separated keyword input, trimming entries and dropping empty ones
pub fn parse_keyword_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    /// Overlay CI inputs on top of this configuration.
    ///
    /// `lookup` resolves an environment variable name; passing a closure instead of
    /// reading `std::env` keeps the overlay testable. Unset variables leave the
    /// current value untouched.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(message) = lookup("INPUT_MESSAGE") {
            self.message = Some(message);
        }
        if let Some(words) = lookup("INPUT_MAJOR-WORDING") {
            self.keywords.major = parse_keyword_list(&words);
        }
        if let Some(words) = lookup("INPUT_MINOR-WORDING") {
            self.keywords.minor = parse_keyword_list(&words);
        }
        if let Some(words) = lookup("INPUT_PATCH-WORDING") {
            self.keywords.patch = parse_keyword_list(&words);
        }
        if let Some(words) = lookup("INPUT_RC-WORDING") {
            self.keywords.prerelease = parse_keyword_list(&words);
        }
        if let Some(default) = lookup("INPUT_DEFAULT") {
            let default = default.trim();
            self.default_bump = if default.is_empty() || default.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(default.to_string())
            };
        }
        if let Some(prefix) = lookup("INPUT_TAG-PREFIX") {
            self.tag_prefix = prefix;
        }
        if let Some(skip) = lookup("INPUT_SKIP-TAG") {
            self.skip_tag = skip.trim() == "true";
        }
        if let Some(workspace) = lookup("GITHUB_WORKSPACE").filter(|w| !w.is_empty()) {
            self.workspace = PathBuf::from(workspace);
        }
        if let Some(dir) = lookup("PACKAGEJSON_DIR").filter(|d| !d.is_empty()) {
            self.package_dir = Some(PathBuf::from(dir));
        }
        if let Some(name) = lookup("GITHUB_USER").filter(|n| !n.is_empty()) {
            self.git.user_name = name;
        }
        if let Some(email) = lookup("GITHUB_EMAIL").filter(|e| !e.is_empty()) {
            self.git.user_email = email;
        }
        if let Some(actor) = lookup("GITHUB_ACTOR") {
            self.git.actor = Some(actor);
        }
        if let Some(token) = lookup("GITHUB_TOKEN") {
            self.git.token = Some(token);
        }
        if let Some(repository) = lookup("GITHUB_REPOSITORY") {
            self.git.repository = Some(repository);
        }

        self.run.git_ref = lookup("GITHUB_REF").or(self.run.git_ref.take());
        self.run.head_ref = lookup("GITHUB_HEAD_REF").or(self.run.head_ref.take());
        self.run.event_path = lookup("GITHUB_EVENT_PATH")
            .map(PathBuf::from)
            .or(self.run.event_path.take());
        self.run.output_path = lookup("GITHUB_OUTPUT")
            .map(PathBuf::from)
            .or(self.run.output_path.take());
    }

    /// Resolve the configured default bump kind.
    ///
    /// # Returns
    /// * `Ok(Some(kind))` - A default is configured
    /// * `Ok(None)` - The default is explicitly unset
    /// * `Err` - The configured value is not a bump kind
    pub fn default_bump_kind(&self) -> Result<Option<BumpKind>> {
        match self.default_bump.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) if value.eq_ignore_ascii_case("none") => Ok(None),
            Some(value) => value.parse().map(Some),
        }
    }

    /// Directory holding the package manifest
    pub fn package_path(&self) -> PathBuf {
        match &self.package_dir {
            Some(dir) => self.workspace.join(dir),
            None => self.workspace.clone(),
        }
    }

    /// Absolute location of the iOS property list
    pub fn ios_plist_path(&self) -> PathBuf {
        self.workspace.join(&self.platform.ios_plist)
    }

    /// Absolute location of the Android build script
    pub fn android_gradle_path(&self) -> PathBuf {
        self.workspace.join(&self.platform.android_gradle)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `bump-version.toml` in current directory
/// 3. `bump-version.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if local.exists() {
        fs::read_to_string(local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str).map_err(|e| BumpError::config(format!("Invalid config file: {}", e)))
}
