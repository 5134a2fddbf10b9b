//! Coding-platform profiles referenced from a resume

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileKind {
    LeetCode,
    CodeChef,
    GitHub,
}

impl ProfileKind {
    pub const ALL: [ProfileKind; 3] = [ProfileKind::LeetCode, ProfileKind::CodeChef, ProfileKind::GitHub];

    /// Key under which the parsed resume carries the profile link.
    pub fn resume_key(&self) -> &'static str {
        match self {
            ProfileKind::LeetCode => "leetcode",
            ProfileKind::CodeChef => "codechef",
            ProfileKind::GitHub => "github",
        }
    }

    /// Backend path prefix; the handle is appended.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ProfileKind::LeetCode => "/leetcode/analyze_leetcode",
            ProfileKind::CodeChef => "/codechef/analyze_codechef",
            ProfileKind::GitHub => "/github/analyze_github",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfileKind::LeetCode => "LeetCode",
            ProfileKind::CodeChef => "CodeChef",
            ProfileKind::GitHub => "GitHub",
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const PROFILE_HOSTS: [&str; 3] = ["leetcode.com", "codechef.com", "github.com"];

/// Turn a profile URL or bare handle into the handle.
/// Returns `None` when nothing usable remains.
pub fn extract_handle(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let handle = if PROFILE_HOSTS.iter().any(|host| trimmed.contains(host)) {
        trimmed
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    } else {
        trimmed
    };

    if handle.is_empty() {
        None
    } else {
        Some(handle.to_string())
    }
}
