// tests/git_repository_test.rs
use bump_version::config::PushTarget;
use bump_version::git::{Git2Repository, Repository};
use git2::{Repository as Git2Repo, Signature};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Initialize a repository whose `main` branch holds one commit with `package.json`
fn init_with_commit(path: &Path) -> Git2Repo {
    let repo = Git2Repo::init(path).unwrap();
    repo.set_head("refs/heads/main").unwrap();
    fs::write(path.join("package.json"), r#"{ "version": "1.0.0" }"#).unwrap();

    {
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("package.json")).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = Signature::now("Test", "test@example.com").unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap();
    }

    repo
}

fn head_message(path: &Path) -> String {
    let repo = Git2Repo::open(path).unwrap();
    let commit = repo.head().unwrap().peel_to_commit().unwrap();
    commit.message().unwrap().to_string()
}

fn bump_manifest(path: &Path, version: &str) {
    fs::write(
        path.join("package.json"),
        format!(r#"{{ "version": "{}" }}"#, version),
    )
    .unwrap();
}

#[test]
fn test_commit_all_records_tracked_changes() {
    let dir = TempDir::new().unwrap();
    let repo = Git2Repository::from_git2(init_with_commit(dir.path()));
    repo.configure_identity("Automated Version Bump", "bot@example.com")
        .unwrap();

    bump_manifest(dir.path(), "1.1.0");
    repo.commit_all("ci: version bump to v1.1.0").unwrap();

    assert_eq!(head_message(dir.path()), "ci: version bump to v1.1.0");
    let raw = Git2Repo::open(dir.path()).unwrap();
    let commit = raw.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(commit.author().name(), Some("Automated Version Bump"));
}

#[test]
fn test_commit_all_with_clean_tree_fails() {
    let dir = TempDir::new().unwrap();
    let repo = Git2Repository::from_git2(init_with_commit(dir.path()));
    repo.configure_identity("Bot", "bot@example.com").unwrap();

    let err = repo.commit_all("ci: nothing").unwrap_err();
    assert!(err.to_string().contains("nothing to commit"));
}

#[test]
fn test_commit_on_detached_head() {
    let dir = TempDir::new().unwrap();
    let raw = init_with_commit(dir.path());
    let head = raw.head().unwrap().target().unwrap();
    raw.set_head_detached(head).unwrap();
    let repo = Git2Repository::from_git2(raw);
    repo.configure_identity("Bot", "bot@example.com").unwrap();

    assert_eq!(repo.current_branch().unwrap(), None);
    bump_manifest(dir.path(), "1.0.1");
    repo.commit_all("ci: version bump to v1.0.1").unwrap();

    assert_eq!(head_message(dir.path()), "ci: version bump to v1.0.1");
    assert_eq!(repo.current_branch().unwrap(), None);
}

#[test]
fn test_push_branch_and_tag_to_remote() {
    let root = TempDir::new().unwrap();
    let bare_path = root.path().join("remote.git");
    let work_path = root.path().join("work");
    fs::create_dir_all(&work_path).unwrap();

    let bare = Git2Repo::init_bare(&bare_path).unwrap();
    let raw = init_with_commit(&work_path);
    raw.remote("origin", bare_path.to_str().unwrap()).unwrap();
    let repo = Git2Repository::from_git2(raw);

    repo.create_tag("v1.0.0").unwrap();
    repo.push(
        &PushTarget::Remote("origin".to_string()),
        "main",
        Some("v1.0.0"),
    )
    .unwrap();

    assert!(bare.find_reference("refs/heads/main").is_ok());
    assert!(bare.find_reference("refs/tags/v1.0.0").is_ok());
}

#[test]
fn test_push_to_unknown_remote_fails() {
    let dir = TempDir::new().unwrap();
    let repo = Git2Repository::from_git2(init_with_commit(dir.path()));

    let err = repo
        .push(&PushTarget::Remote("nowhere".to_string()), "main", None)
        .unwrap_err();
    assert!(err.to_string().contains("nowhere"));
}

#[test]
fn test_duplicate_tag_fails() {
    let dir = TempDir::new().unwrap();
    let repo = Git2Repository::from_git2(init_with_commit(dir.path()));

    repo.create_tag("v1.0.0").unwrap();
    assert!(repo.create_tag("v1.0.0").is_err());
}

#[test]
fn test_checkout_creates_branch_from_remote() {
    let root = TempDir::new().unwrap();
    let bare_path = root.path().join("remote.git");
    let origin_path = root.path().join("origin");
    let ci_path = root.path().join("ci");
    fs::create_dir_all(&origin_path).unwrap();
    fs::create_dir_all(&ci_path).unwrap();

    Git2Repo::init_bare(&bare_path).unwrap();
    let origin = init_with_commit(&origin_path);
    origin.remote("origin", bare_path.to_str().unwrap()).unwrap();
    Git2Repository::from_git2(origin)
        .push(&PushTarget::Remote("origin".to_string()), "main", None)
        .unwrap();

    let ci = Git2Repo::init(&ci_path).unwrap();
    ci.remote("origin", bare_path.to_str().unwrap()).unwrap();
    let repo = Git2Repository::from_git2(ci);

    repo.fetch("origin").unwrap();
    repo.checkout_branch("main", "origin").unwrap();

    assert_eq!(repo.current_branch().unwrap(), Some("main".to_string()));
    assert!(ci_path.join("package.json").exists());

    let raw = Git2Repo::open(&ci_path).unwrap();
    let branch = raw.find_branch("main", git2::BranchType::Local).unwrap();
    assert_eq!(
        branch.upstream().unwrap().name().unwrap(),
        Some("origin/main")
    );
}

#[test]
fn test_checkout_unknown_branch_fails() {
    let dir = TempDir::new().unwrap();
    let repo = Git2Repository::from_git2(init_with_commit(dir.path()));

    let err = repo.checkout_branch("release", "origin").unwrap_err();
    assert!(err.to_string().contains("release"));
}

#[test]
fn test_fetch_unknown_remote_fails() {
    let dir = TempDir::new().unwrap();
    let repo = Git2Repository::from_git2(init_with_commit(dir.path()));
    assert!(repo.fetch("origin").is_err());
}
