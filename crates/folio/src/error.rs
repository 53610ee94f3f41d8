#![forbid(unsafe_code)]

//! folio error model and graceful degradation.
//!
//! Scroll ticks never fail; errors only arise while assembling a page
//! (registry), loading content (catalog), or verifying a recorded session
//! (replay). Each subsystem keeps its own typed error, and [`Error`] unifies
//! them for callers that just want `?`.
//!
//! Every variant maps to a [`DegradationAction`] so a host can keep the page
//! usable instead of failing to mount.

use std::fmt;

pub use folio_layout::RegistryError;
pub use folio_web::session_record::ReplayError;

/// Project catalog errors.
#[derive(Debug)]
pub enum CatalogError {
    /// The catalog JSON did not decode.
    Decode(serde_json::Error),
    /// Two projects share an id.
    DuplicateId(String),
}

/// Top-level error type.
#[derive(Debug)]
pub enum Error {
    /// Page sections could not be registered.
    Registry(RegistryError),
    /// Project content failed to load.
    Catalog(CatalogError),
    /// A recorded session could not be replayed.
    Replay(ReplayError),
}

/// Standard result type for folio APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// What the host should do when an error occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradationAction {
    /// Render the navigation without scroll highlighting.
    StaticNavigation,
    /// Render the projects grid with its empty-state message.
    EmptyCatalog,
    /// Discard the trace; live behaviour is unaffected.
    DiscardTrace,
}

impl Error {
    /// Degradation action for this error.
    #[must_use]
    pub fn degradation(&self) -> DegradationAction {
        match self {
            Self::Registry(_) => DegradationAction::StaticNavigation,
            Self::Catalog(_) => DegradationAction::EmptyCatalog,
            Self::Replay(_) => DegradationAction::DiscardTrace,
        }
    }

    /// Error type label for logs.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Registry(_) => "registry",
            Self::Catalog(_) => "catalog",
            Self::Replay(_) => "replay",
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(err) => write!(f, "catalog decode failed: {err}"),
            Self::DuplicateId(id) => write!(f, "duplicate project id: {id}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry(err) => write!(f, "registry: {err}"),
            Self::Catalog(err) => write!(f, "catalog: {err}"),
            Self::Replay(err) => write!(f, "replay: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Registry(err) => Some(err),
            Self::Catalog(err) => Some(err),
            Self::Replay(err) => Some(err),
        }
    }
}

impl From<RegistryError> for Error {
    fn from(err: RegistryError) -> Self {
        Self::Registry(err)
    }
}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

impl From<ReplayError> for Error {
    fn from(err: ReplayError) -> Self {
        Self::Replay(err)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err)
    }
}
