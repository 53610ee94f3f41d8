#![forbid(unsafe_code)]

//! Section registry: the ordered list of page sections a scrollspy evaluates.
//!
//! A [`SectionRegistry`] is assembled once when the page mounts and never
//! changes afterwards. Registration order is significant: when two sections
//! both cross the reference line (a shared border), the one registered first
//! wins.
//!
//! # Invariants
//!
//! 1. A registry holds at least one section, so "the active section" is
//!    always defined (it defaults to the first one).
//! 2. Section ids are unique.
//! 3. Order is registration order; there is no insertion after `build()`.
//!
//! # Failure Modes
//!
//! Construction returns [`RegistryError`] on an empty list or a duplicate id.

use std::collections::HashSet;
use std::fmt;

/// Name of a page section (`"about"`, `"projects"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SectionId(String);

impl SectionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Host element whose bounding rectangle locates a section.
///
/// The value is the DOM element id the host resolves, e.g. `about-section`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Anchor(String);

impl Anchor {
    #[must_use]
    pub fn new(element_id: impl Into<String>) -> Self {
        Self(element_id.into())
    }

    /// Anchor following the page's `<id>-section` element naming.
    #[must_use]
    pub fn for_section(id: &SectionId) -> Self {
        Self(format!("{}-section", id.as_str()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Anchor {
    fn from(element_id: &str) -> Self {
        Self::new(element_id)
    }
}

/// One registered section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    id: SectionId,
    anchor: Anchor,
}

impl Section {
    #[must_use]
    pub fn new(id: impl Into<SectionId>, anchor: impl Into<Anchor>) -> Self {
        Self {
            id: id.into(),
            anchor: anchor.into(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> &SectionId {
        &self.id
    }

    #[must_use]
    pub const fn anchor(&self) -> &Anchor {
        &self.anchor
    }
}

/// Registry construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No sections were declared.
    Empty,
    /// The same id was registered twice.
    DuplicateId(SectionId),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "section registry needs at least one section"),
            Self::DuplicateId(id) => write!(f, "duplicate section id: {id}"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Immutable, ordered, non-empty list of sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRegistry {
    sections: Vec<Section>,
}

impl SectionRegistry {
    /// Build a registry from sections in registration order.
    pub fn new(sections: impl IntoIterator<Item = Section>) -> Result<Self, RegistryError> {
        let sections: Vec<Section> = sections.into_iter().collect();
        if sections.is_empty() {
            return Err(RegistryError::Empty);
        }
        let mut seen = HashSet::with_capacity(sections.len());
        for section in &sections {
            if !seen.insert(section.id.as_str()) {
                return Err(RegistryError::DuplicateId(section.id.clone()));
            }
        }
        Ok(Self { sections })
    }

    /// Build a registry from bare ids, anchoring each on `<id>-section`.
    pub fn from_ids<I, S>(ids: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SectionId>,
    {
        Self::new(ids.into_iter().map(|id| {
            let id = id.into();
            let anchor = Anchor::for_section(&id);
            Section { id, anchor }
        }))
    }

    /// Start a builder.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// The first registered section (the default active one).
    #[must_use]
    pub fn first(&self) -> &Section {
        &self.sections[0]
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Position of `id` in registration order.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id.as_str() == id)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Section> + '_ {
        self.sections.iter()
    }
}

impl<'a> IntoIterator for &'a SectionRegistry {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

/// Incremental registry construction.
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    sections: Vec<Section>,
}

impl RegistryBuilder {
    /// Append a section with an explicit anchor.
    #[must_use]
    pub fn section(mut self, id: impl Into<SectionId>, anchor: impl Into<Anchor>) -> Self {
        self.sections.push(Section::new(id, anchor));
        self
    }

    /// Finish, validating emptiness and id uniqueness.
    pub fn build(self) -> Result<SectionRegistry, RegistryError> {
        SectionRegistry::new(self.sections)
    }
}
