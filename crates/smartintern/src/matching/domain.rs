use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for catalog postings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostingId(pub String);

impl PostingId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PostingId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Comparison key for a free-text label: trimmed, whitespace-collapsed, lower-cased.
pub fn normalize_label(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Skill labels kept in insertion order with case-insensitive uniqueness.
///
/// The first spelling seen for a label is retained for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SkillSet {
    labels: Vec<String>,
    keys: HashSet<String>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a label, returning `false` for blanks and duplicates.
    pub fn insert(&mut self, label: &str) -> bool {
        let key = normalize_label(label);
        if key.is_empty() || !self.keys.insert(key) {
            return false;
        }
        self.labels.push(label.split_whitespace().collect::<Vec<_>>().join(" "));
        true
    }

    pub fn contains(&self, label: &str) -> bool {
        self.keys.contains(&normalize_label(label))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for label in iter {
            set.insert(label.as_ref());
        }
        set
    }
}

impl From<Vec<String>> for SkillSet {
    fn from(value: Vec<String>) -> Self {
        value.into_iter().collect()
    }
}

impl From<SkillSet> for Vec<String> {
    fn from(value: SkillSet) -> Self {
        value.labels
    }
}

/// Candidate snapshot supplied by the external profile store.
///
/// Optional fields reflect incomplete records; criteria that need them report an
/// evidence gap instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Academic standing (CGPA on a 0-10 scale).
    #[serde(default, alias = "cgpa")]
    pub standing: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub skills: SkillSet,
}

/// Lifecycle of a posting in the company catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostingStatus {
    #[default]
    #[serde(alias = "Active", alias = "ACTIVE")]
    Active,
    #[serde(alias = "Closed", alias = "CLOSED")]
    Closed,
}

impl PostingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            PostingStatus::Active => "active",
            PostingStatus::Closed => "closed",
        }
    }

    pub const fn is_active(self) -> bool {
        matches!(self, PostingStatus::Active)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "active" | "open" => Some(Self::Active),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// Internship posting as read from the external catalog store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Posting {
    pub id: PostingId,
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub required_skills: SkillSet,
    /// Minimum academic standing; `None` falls back to the engine default.
    #[serde(default, alias = "minCgpa")]
    pub min_standing: Option<f64>,
    #[serde(default)]
    pub status: PostingStatus,
    #[serde(default)]
    pub posted_on: Option<NaiveDate>,
    /// Applications received so far, when the dashboard reports it.
    #[serde(default)]
    pub applicants: Option<u32>,
}

impl Posting {
    /// Active posting with no requirements set.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: PostingId(id.into()),
            title: title.into(),
            company: None,
            description: String::new(),
            location: None,
            department: None,
            required_skills: SkillSet::new(),
            min_standing: None,
            status: PostingStatus::Active,
            posted_on: None,
            applicants: None,
        }
    }
}
