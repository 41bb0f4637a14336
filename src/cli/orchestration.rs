//! Main workflow orchestration logic
//!
//! Runs the bump as one linear sequence: classify, compute the new version on the
//! current checkout, patch platform files, commit, move to the target branch,
//! apply the same version there, tag and push. There are no retries; the first
//! fatal error ends the run.

use crate::actions;
use crate::analyzer::{Classification, Classifier, SkipReason};
use crate::config::Config;
use crate::domain::commit::bump_commit_message;
use crate::domain::{BranchContext, BumpKind, BumpedVersion};
use crate::error::Result;
use crate::git::Repository;
use crate::manifest::PackageManifest;
use crate::patch::{PatchOutcome, PlatformFile};
use crate::tool::VersionTool;
use crate::ui;
use crate::warnings::RunWarning;
use std::path::PathBuf;

/// Summary of a completed bump
#[derive(Debug, Clone, PartialEq)]
pub struct BumpReport {
    pub kind: BumpKind,
    /// Version found in the manifest before the run
    pub previous: String,
    pub version: BumpedVersion,
    /// Exported tag string: prefix followed by the version label
    pub tag: String,
    pub branch: String,
    /// Whether a tag was created and pushed
    pub tagged: bool,
    /// Files rewritten by the platform patchers
    pub modified_files: Vec<PathBuf>,
    pub warnings: Vec<RunWarning>,
}

/// How a run ended, short of a fatal error
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    /// Nothing to do; still a successful run
    Skipped(SkipReason),
    /// Dry run: the bump that would be applied
    Planned {
        kind: BumpKind,
        previous: String,
        version: BumpedVersion,
        tag: String,
        branch: String,
    },
    Bumped(BumpReport),
}

impl WorkflowOutcome {
    /// Final log line for this outcome
    pub fn final_message(&self) -> &'static str {
        match self {
            WorkflowOutcome::Skipped(SkipReason::BumpCommit) => ui::MSG_BUMP_COMMIT,
            WorkflowOutcome::Skipped(SkipReason::NoKeywords) => ui::MSG_NO_KEYWORDS,
            WorkflowOutcome::Planned { .. } => "Dry run complete, no changes made.",
            WorkflowOutcome::Bumped(_) => ui::MSG_BUMPED,
        }
    }
}

/// The bump workflow over a repository and a version tool
pub struct BumpWorkflow<'a, R: Repository, T: VersionTool> {
    config: &'a Config,
    repo: &'a R,
    tool: &'a T,
    dry_run: bool,
}

impl<'a, R: Repository, T: VersionTool> BumpWorkflow<'a, R, T> {
    pub fn new(config: &'a Config, repo: &'a R, tool: &'a T) -> Self {
        BumpWorkflow {
            config,
            repo,
            tool,
            dry_run: false,
        }
    }

    /// Preview mode - classify and compute, but change no files and run no git commands
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Messages to classify.
    ///
    /// The message input wins when it is non-empty, and the event payload is not
    /// read at all. Otherwise the commits of the event payload are used. A payload
    /// without commits is reported as [RunWarning::NoEventCommits]; one that cannot
    /// be read or parsed as [RunWarning::EventPayloadUnreadable]. Neither is fatal.
    pub fn collect_messages(&self, warnings: &mut Vec<RunWarning>) -> Vec<String> {
        if let Some(message) = self
            .config
            .message
            .as_ref()
            .filter(|message| !message.trim().is_empty())
        {
            return vec![message.clone()];
        }

        let event_commits = match &self.config.run.event_path {
            Some(path) => match actions::read_event_commits(path) {
                Ok(commits) => commits,
                Err(e) => {
                    warnings.push(RunWarning::EventPayloadUnreadable {
                        path: path.clone(),
                        reason: e.to_string(),
                    });
                    None
                }
            },
            None => None,
        };

        match event_commits.filter(|commits| !commits.is_empty()) {
            Some(commits) => commits,
            None => {
                warnings.push(RunWarning::NoEventCommits);
                Vec::new()
            }
        }
    }

    /// Classify `messages` with the configured keywords and default
    pub fn classify(&self, messages: &[String]) -> Result<Classification> {
        let default_bump = self.config.default_bump_kind()?;
        let classifier = Classifier::new(
            &self.config.keywords,
            &self.config.commit_marker,
            default_bump,
        );
        Ok(classifier.classify(messages))
    }

    /// Run the whole workflow.
    ///
    /// # Returns
    /// * `Ok(WorkflowOutcome)` - The run succeeded, possibly without bumping
    /// * `Err` - A fatal step failed; earlier commits or pushes are not rolled back
    pub fn run(&self) -> Result<WorkflowOutcome> {
        let mut warnings = Vec::new();

        let messages = self.collect_messages(&mut warnings);
        for warning in &warnings {
            match warning {
                RunWarning::NoEventCommits => ui::display_notice(&warning.to_string()),
                other => ui::display_warning(other),
            }
        }
        ui::display_messages(&messages);

        let kind = match self.classify(&messages)? {
            Classification::Skip(reason) => return Ok(WorkflowOutcome::Skipped(reason)),
            Classification::Bump(kind) => kind,
        };

        let package_dir = self.config.package_path();
        let manifest = PackageManifest::load(&package_dir)?;
        let previous = manifest.version().to_string();

        let branch = BranchContext::resolve(
            self.config.run.git_ref.as_deref(),
            self.config.run.head_ref.as_deref(),
        )?;
        ui::display_status(&format!(
            "Target branch: {}{}",
            branch.name,
            if branch.is_pull_request {
                " (pull request)"
            } else {
                ""
            }
        ));

        if self.dry_run {
            let current = BumpedVersion::parse(&previous)?;
            let version = BumpedVersion::new(kind.apply(current.semver())?);
            let tag = version.tag(&self.config.tag_prefix);
            ui::display_version_change(&previous, &version.label(), &kind.to_string());
            return Ok(WorkflowOutcome::Planned {
                kind,
                previous,
                version,
                tag,
                branch: branch.name,
            });
        }

        let git = &self.config.git;
        self.repo
            .configure_identity(&git.user_name, &git.user_email)?;

        // Compute on the current checkout, which may be a detached HEAD
        self.tool.set_version(&package_dir, &previous)?;
        let version = self.tool.bump(&package_dir, &kind)?;
        ui::display_version_change(&previous, &version.label(), &kind.to_string());

        let modified_files = self.patch_platform_files(&version, &mut warnings)?;

        self.repo.commit_all(&bump_commit_message(
            &self.config.commit_marker,
            &version.label(),
        ))?;
        ui::display_success(&format!("Committed {} on the current checkout", version));

        if branch.is_pull_request {
            ui::display_status(&format!("Fetching {}", git.remote));
            self.repo.fetch(&git.remote)?;
        }
        ui::display_status(&format!("Checking out {}", branch.name));
        self.repo.checkout_branch(&branch.name, &git.remote)?;

        // Carry the computed version instead of bumping a second time
        self.tool.set_version(&package_dir, &version.plain())?;

        let tag = version.tag(&self.config.tag_prefix);
        actions::set_output(
            self.config.run.output_path.as_deref(),
            actions::NEW_VERSION_OUTPUT,
            &tag,
        )?;
        ui::display_status(&format!("New version: {}", tag));

        if let Err(e) = self
            .repo
            .commit_all(&bump_commit_message(&self.config.commit_marker, &tag))
        {
            let warning = RunWarning::TargetCommitSkipped {
                branch: branch.name.clone(),
                reason: e.to_string(),
            };
            ui::display_warning(&warning);
            warnings.push(warning);
        }

        let target = git.push_target();
        let tagged = !self.config.skip_tag;
        if tagged {
            self.repo.create_tag(&tag)?;
            ui::display_success(&format!("Created tag: {}", tag));
            self.repo.push(&target, &branch.name, Some(&tag))?;
        } else {
            self.repo.push(&target, &branch.name, None)?;
        }
        ui::display_success(&format!("Pushed {}", branch.name));

        Ok(WorkflowOutcome::Bumped(BumpReport {
            kind,
            previous,
            version,
            tag,
            branch: branch.name,
            tagged,
            modified_files,
            warnings,
        }))
    }

    /// Patch the iOS and Android files, best effort.
    ///
    /// Every field is attempted independently. A missing file or field becomes a
    /// [RunWarning::PlatformPatchSkipped] and the run continues.
    fn patch_platform_files(
        &self,
        version: &BumpedVersion,
        warnings: &mut Vec<RunWarning>,
    ) -> Result<Vec<PathBuf>> {
        let files = [
            PlatformFile::ios(self.config.ios_plist_path())?,
            PlatformFile::android(self.config.android_gradle_path())?,
        ];

        let mut modified = Vec::new();
        for file in &files {
            let results = [
                (file.version_field(), file.patch_version(version)),
                (file.build_field(), file.increment_build()),
            ];

            for (field, result) in results {
                let reason = match result {
                    Ok(PatchOutcome::Updated { from, to }) => {
                        ui::display_success(&format!(
                            "{} {}: {} -> {}",
                            file.platform, field, from, to
                        ));
                        if !modified.contains(&file.path) {
                            modified.push(file.path.clone());
                        }
                        continue;
                    }
                    Ok(PatchOutcome::FieldNotFound) => "field not found".to_string(),
                    Err(e) => e.to_string(),
                };

                let warning = RunWarning::PlatformPatchSkipped {
                    file: file.path.clone(),
                    field: field.to_string(),
                    reason,
                };
                ui::display_warning(&warning);
                warnings.push(warning);
            }
        }

        if !modified.is_empty() {
            let names: Vec<String> = modified.iter().map(|p| p.display().to_string()).collect();
            ui::display_status(&format!("Modified files: {}", names.join(", ")));
        }

        Ok(modified)
    }
}
