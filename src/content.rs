//! The content collection that pages are assembled from. Pages only see the
//! [`ContentSource`] trait, so tests can hand them fixtures instead of a
//! project directory.

use crate::author::{self, load_authors, AuthorProfile};
use crate::config::Config;
use crate::project::{self, load_projects, ProjectRecord};
use std::fmt;

/// A read-only provider of author profiles and projects.
pub trait ContentSource {
    /// All author profiles.
    fn authors(&self) -> &[AuthorProfile];

    /// All projects, in source order.
    fn projects(&self) -> &[ProjectRecord];

    /// Looks up an author by exact slug.
    fn author(&self, slug: &str) -> Option<&AuthorProfile> {
        self.authors().iter().find(|a| a.slug == slug)
    }
}

/// Content held in memory, typically loaded from a project directory.
#[derive(Clone, Debug, Default)]
pub struct Content {
    authors: Vec<AuthorProfile>,
    projects: Vec<ProjectRecord>,
}

impl Content {
    pub fn new(authors: Vec<AuthorProfile>, projects: Vec<ProjectRecord>) -> Content {
        Content { authors, projects }
    }

    /// Loads the authors and projects named by `config`.
    pub fn load(config: &Config) -> Result<Content> {
        let content = Content {
            authors: load_authors(&config.authors_directory)?,
            projects: load_projects(&config.projects_file)?,
        };
        tracing::info!(
            authors = content.authors.len(),
            projects = content.projects.len(),
            "loaded content"
        );
        Ok(content)
    }
}

impl ContentSource for Content {
    fn authors(&self) -> &[AuthorProfile] {
        &self.authors
    }

    fn projects(&self) -> &[ProjectRecord] {
        &self.projects
    }
}

/// The result of loading [`Content`].
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading [`Content`].
#[derive(Debug)]
pub enum Error {
    Author(author::Error),
    Project(project::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Author(err) => err.fmt(f),
            Error::Project(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Author(err) => Some(err),
            Error::Project(err) => Some(err),
        }
    }
}

impl From<author::Error> for Error {
    fn from(err: author::Error) -> Error {
        Error::Author(err)
    }
}

impl From<project::Error> for Error {
    fn from(err: project::Error) -> Error {
        Error::Project(err)
    }
}
