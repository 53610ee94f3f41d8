#![forbid(unsafe_code)]

//! Project catalog and category filter.
//!
//! The projects grid shows a filter bar (`all`, `map`, `3d`, `web`) above a
//! list of project cards. Filtering keeps catalog order; an empty result is a
//! normal outcome the grid renders as an empty-state message.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Placeholder the content uses for a missing link.
const NO_LINK: &str = "#";

/// Project category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectCategory {
    #[serde(rename = "map")]
    Map,
    #[serde(rename = "3d")]
    ThreeD,
    #[serde(rename = "web")]
    Web,
}

impl ProjectCategory {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Map => "map",
            Self::ThreeD => "3d",
            Self::Web => "web",
        }
    }
}

/// Selected filter tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProjectFilter {
    #[default]
    All,
    Only(ProjectCategory),
}

impl ProjectFilter {
    /// Filter tabs in display order.
    pub const TABS: [ProjectFilter; 4] = [
        ProjectFilter::All,
        ProjectFilter::Only(ProjectCategory::Map),
        ProjectFilter::Only(ProjectCategory::ThreeD),
        ProjectFilter::Only(ProjectCategory::Web),
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.key(),
        }
    }

    #[must_use]
    pub fn matches(self, project: &Project) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => project.category == category,
        }
    }
}

/// Unknown filter key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilter(pub String);

impl fmt::Display for UnknownFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown project filter: {}", self.0)
    }
}

impl std::error::Error for UnknownFilter {}

impl FromStr for ProjectFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::TABS
            .into_iter()
            .find(|f| f.key() == s)
            .ok_or_else(|| UnknownFilter(s.to_string()))
    }
}

/// One project card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(rename = "desc")]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub live: String,
    #[serde(default)]
    pub image: String,
    pub category: ProjectCategory,
}

impl Project {
    /// Source link, if the project has one.
    #[must_use]
    pub fn github_url(&self) -> Option<&str> {
        link(&self.github)
    }

    /// Live demo link; the card hides its demo button when absent.
    #[must_use]
    pub fn live_url(&self) -> Option<&str> {
        link(&self.live)
    }
}

fn link(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty() && value != NO_LINK).then_some(value)
}

/// Ordered project list with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    projects: Vec<Project>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(projects: Vec<Project>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(projects.len());
        for project in &projects {
            if !seen.insert(project.id.as_str()) {
                return Err(CatalogError::DuplicateId(project.id.clone()));
            }
        }
        Ok(Self { projects })
    }

    /// Parse a JSON array of projects.
    pub fn from_json(input: &str) -> Result<Self, CatalogError> {
        let projects: Vec<Project> = serde_json::from_str(input)?;
        Self::new(projects)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Projects matching `filter`, in catalog order.
    pub fn filter(&self, filter: ProjectFilter) -> impl Iterator<Item = &Project> + '_ {
        self.projects.iter().filter(move |p| filter.matches(p))
    }

    /// Number of projects behind each filter tab.
    #[must_use]
    pub fn tab_counts(&self) -> [(ProjectFilter, usize); 4] {
        ProjectFilter::TABS.map(|tab| (tab, self.filter(tab).count()))
    }
}
