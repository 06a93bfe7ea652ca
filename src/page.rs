//! Assembles sections into pages. Each page gets a [`PageMetadata`] that the
//! layout template turns into the document head.

use crate::card::render_card;
use crate::config::{HeroConfig, Site};
use crate::content::ContentSource;
use crate::hero::render_hero;
use crate::skills::render_skills;
use crate::template::{self, render, Templates};
use crate::value::{html, object, optional_text, text};
use gtmpl::Value;
use std::fmt;
use url::Url;

/// Head metadata for a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageMetadata {
    /// The bare page title, e.g. `About`.
    pub title: String,

    /// The title used for `<title>` and social previews, e.g.
    /// `About | Chris Chan`.
    pub full_title: String,

    pub description: String,

    /// The canonical URL of the page.
    pub url: Url,

    pub site_name: String,
    pub locale: String,
    pub language: String,
    pub image: Option<String>,
}

impl PageMetadata {
    /// Builds the metadata for a page titled `title`. The URL defaults to the
    /// site root; see [`PageMetadata::at`].
    pub fn new(title: &str, site: &Site) -> PageMetadata {
        PageMetadata {
            title: title.to_owned(),
            full_title: format!("{} | {}", title, site.title),
            description: site.description.clone(),
            url: site.site_root.clone(),
            site_name: site.title.clone(),
            locale: site.locale(),
            language: site.language.clone(),
            image: site.social_banner.clone(),
        }
    }

    /// Sets the canonical URL.
    pub fn at(mut self, url: Url) -> PageMetadata {
        self.url = url;
        self
    }
}

impl From<&PageMetadata> for Value {
    fn from(m: &PageMetadata) -> Value {
        object(vec![
            ("title", text(&m.title)),
            ("full_title", text(&m.full_title)),
            ("description", text(&m.description)),
            ("url", text(m.url.as_str())),
            ("site_name", text(&m.site_name)),
            ("locale", text(&m.locale)),
            ("language", text(&m.language)),
            ("image", optional_text(m.image.as_deref())),
        ])
    }
}

/// A fully assembled page, ready to be wrapped in the layout and written.
#[derive(Clone, Debug)]
pub struct Page {
    /// Short identifier; also the output directory (`{id}/index.html`).
    pub id: &'static str,

    pub metadata: PageMetadata,

    /// The rendered page body.
    pub body: String,
}

pub const ABOUT: &str = "about";
pub const PROJECTS: &str = "projects";

/// Composes sections into pages.
pub struct Assembler<'a> {
    pub templates: &'a Templates,
    pub site: &'a Site,
    pub hero: &'a HeroConfig,

    /// The author shown on the About page. A slug with no matching author
    /// leaves the author section out.
    pub author_slug: &'a str,
}

impl Assembler<'_> {
    /// The URL of the page with the given id, `{site_root}/{id}/`.
    pub fn page_url(&self, id: &str) -> Result<Url> {
        Ok(self.site.site_root.join(&format!("{}/", id))?)
    }

    /// The About page: hero, skills, and, when the configured author exists,
    /// the author's bio.
    pub fn about_page(&self, content: &dyn ContentSource) -> Result<Page> {
        let author = match content.author(self.author_slug) {
            Some(a) => object(vec![
                ("name", text(&a.name)),
                ("occupation", optional_text(a.occupation.as_deref())),
                ("company", optional_text(a.company.as_deref())),
                ("avatar", optional_text(a.avatar.as_deref())),
                ("bio", html(a.bio.clone())),
            ]),
            None => {
                tracing::warn!(slug = %self.author_slug, "author not found; omitting author section");
                Value::Nil
            }
        };

        let body = render(
            &self.templates.about,
            object(vec![
                ("hero", html(render_hero(self.templates, self.hero)?)),
                ("skills", html(render_skills(self.templates)?)),
                ("author", author),
            ]),
        )?;

        Ok(Page {
            id: ABOUT,
            metadata: PageMetadata::new("About", self.site).at(self.page_url(ABOUT)?),
            body,
        })
    }

    /// The Projects page: one card per project, in source order.
    pub fn projects_page(&self, content: &dyn ContentSource) -> Result<Page> {
        let cards = content
            .projects()
            .iter()
            .map(|p| render_card(self.templates, p).map(html))
            .collect::<template::Result<Vec<Value>>>()?;

        let body = render(
            &self.templates.projects,
            object(vec![
                ("heading", text("Projects")),
                ("cards", Value::Array(cards)),
            ]),
        )?;

        Ok(Page {
            id: PROJECTS,
            metadata: PageMetadata::new("Projects", self.site).at(self.page_url(PROJECTS)?),
            body,
        })
    }

    /// Every page of the site.
    pub fn pages(&self, content: &dyn ContentSource) -> Result<Vec<Page>> {
        Ok(vec![self.about_page(content)?, self.projects_page(content)?])
    }
}

/// The result of a fallible page-assembly operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error assembling a page.
#[derive(Debug)]
pub enum Error {
    /// An error rendering a section.
    Template(template::Error),

    /// Returned when a page URL can't be derived from the site root.
    UrlParse(url::ParseError),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Template(err) => err.fmt(f),
            Error::UrlParse(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Template(err) => Some(err),
            Error::UrlParse(err) => Some(err),
        }
    }
}

impl From<template::Error> for Error {
    fn from(err: template::Error) -> Error {
        Error::Template(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Error {
        Error::UrlParse(err)
    }
}
