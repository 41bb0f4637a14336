use crate::config::KeywordSet;
use crate::domain::commit::{has_breaking_marker, is_bump_commit};
use crate::domain::BumpKind;

/// Why a run ends without bumping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A message is itself a bump commit
    BumpCommit,
    /// No tier matched and no default applies
    NoKeywords,
}

/// Outcome of classifying the run's messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Skip(SkipReason),
    Bump(BumpKind),
}

/// Decides the bump kind for a set of messages
pub struct Classifier<'a> {
    keywords: &'a KeywordSet,
    commit_marker: &'a str,
    default_bump: Option<BumpKind>,
}

impl<'a> Classifier<'a> {
    /// Create a new classifier
    ///
    /// # Arguments
    /// * `keywords` - Keyword lists per tier
    /// * `commit_marker` - Phrase identifying bump commits
    /// * `default_bump` - Kind applied when nothing matches; `None` skips the run
    pub fn new(
        keywords: &'a KeywordSet,
        commit_marker: &'a str,
        default_bump: Option<BumpKind>,
    ) -> Self {
        Classifier {
            keywords,
            commit_marker,
            default_bump,
        }
    }

    /// Classify messages. The first matching tier wins:
    /// bump commit, major, minor, prerelease, patch gate, default.
    pub fn classify(&self, messages: &[String]) -> Classification {
        if messages
            .iter()
            .any(|message| is_bump_commit(message, self.commit_marker))
        {
            return Classification::Skip(SkipReason::BumpCommit);
        }

        if messages.iter().any(|message| {
            has_breaking_marker(message) || contains_any(message, &self.keywords.major)
        }) {
            return Classification::Bump(BumpKind::Major);
        }

        if messages
            .iter()
            .any(|message| contains_any(message, &self.keywords.minor))
        {
            return Classification::Bump(BumpKind::Minor);
        }

        if let Some(keyword) = messages
            .iter()
            .find_map(|message| first_match(message, &self.keywords.prerelease))
        {
            return Classification::Bump(BumpKind::prerelease_from_keyword(keyword));
        }

        // A configured patch list gates the run: no patch keyword means no bump.
        // A match keeps the default kind, falling back to patch when it is unset.
        if !self.keywords.patch.is_empty() {
            return if messages
                .iter()
                .any(|message| contains_any(message, &self.keywords.patch))
            {
                Classification::Bump(self.default_bump.clone().unwrap_or(BumpKind::Patch))
            } else {
                Classification::Skip(SkipReason::NoKeywords)
            };
        }

        match &self.default_bump {
            Some(kind) => Classification::Bump(kind.clone()),
            None => Classification::Skip(SkipReason::NoKeywords),
        }
    }
}

fn contains_any(message: &str, words: &[String]) -> bool {
    first_match(message, words).is_some()
}

fn first_match<'w>(message: &str, words: &'w [String]) -> Option<&'w str> {
    words
        .iter()
        .filter(|word| !word.is_empty())
        .find(|word| message.contains(word.as_str()))
        .map(String::as_str)
}
