//! Writes assembled pages to disk. Each page is wrapped in the layout
//! template, which gets the page's metadata plus site-wide navigation URLs.

use crate::page::{Page, ABOUT, PROJECTS};
use crate::template::{self, render, Templates};
use crate::value::{html, text, url as url_value};
use gtmpl::Value;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use url::Url;

/// Responsible for wrapping assembled [`Page`]s in the layout template and
/// writing them to disk.
pub struct Writer<'a> {
    /// The parsed templates; only the layout is used here.
    pub templates: &'a Templates,

    /// The directory the site is written into. A page with id `about` is
    /// written to `{root_output_directory}/about/index.html`.
    pub root_output_directory: &'a Path,

    /// The URL for the site's home page. This is made available to the layout,
    /// typically as the destination for the site-header link.
    pub home_page: &'a Url,

    /// The URL for the static assets. This is made available to the layout,
    /// typically for the theme's stylesheet.
    pub static_url: &'a Url,
}

impl Writer<'_> {
    /// The output file for a page.
    pub fn file_path(&self, page: &Page) -> PathBuf {
        self.root_output_directory.join(page.id).join("index.html")
    }

    /// Wraps `page` in the layout and returns the complete document.
    pub fn render_page(&self, page: &Page) -> Result<String> {
        let mut value = Value::from(&page.metadata);
        if let Value::Object(obj) = &mut value {
            obj.insert("id".to_owned(), text(page.id));
            obj.insert("content".to_owned(), html(page.body.clone()));
            obj.insert("home_page".to_owned(), url_value(self.home_page));
            obj.insert("static_url".to_owned(), url_value(self.static_url));
            obj.insert(
                "about_url".to_owned(),
                url_value(&self.home_page.join(&format!("{}/", ABOUT))?),
            );
            obj.insert(
                "projects_url".to_owned(),
                url_value(&self.home_page.join(&format!("{}/", PROJECTS))?),
            );
        }
        Ok(render(&self.templates.layout, value)?)
    }

    /// Takes a single [`Page`], templates it, and writes it to disk.
    fn write_page(&self, page: &Page) -> Result<PathBuf> {
        let file_path = self.file_path(page);
        if let Some(dir) = file_path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&file_path, self.render_page(page)?)?;
        tracing::debug!(page = page.id, path = %file_path.display(), "wrote page");
        Ok(file_path)
    }

    /// Writes every page to disk and returns the paths written, in order.
    pub fn write_pages(&self, pages: &[Page]) -> Result<Vec<PathBuf>> {
        pages.iter().map(|page| self.write_page(page)).collect()
    }
}

/// The result of a fallible page-writing operation.
type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug)]
pub enum Error {
    /// An error during templating.
    Template(template::Error),

    /// Returned when a navigation URL can't be derived from the home page.
    UrlParse(url::ParseError),

    /// An error writing the output files.
    Io(io::Error),
}

impl From<io::Error> for Error {
    /// Converts an [`io::Error`] into an [`Error`]. This allows us to use the
    /// `?` operator for fallible I/O operations.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<template::Error> for Error {
    /// Converts a [`template::Error`] into an [`Error`]. This allows us to use
    /// the `?` operator for fallible template operations.
    fn from(err: template::Error) -> Error {
        Error::Template(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Error {
        Error::UrlParse(err)
    }
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Template(err) => err.fmt(f),
            Error::UrlParse(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Template(err) => Some(err),
            Error::UrlParse(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Site;
    use crate::page::PageMetadata;

    fn page() -> Page {
        let site = Site {
            title: String::from("Chris Chan"),
            description: String::from("Robots & more"),
            site_root: Url::parse("https://example.org/").unwrap(),
            language: String::from("en-us"),
            social_banner: Some(String::from("/static/images/banner.png")),
        };
        Page {
            id: PROJECTS,
            metadata: PageMetadata::new("Projects", &site)
                .at(Url::parse("https://example.org/projects/").unwrap()),
            body: String::from("<p>body</p>"),
        }
    }

    #[test]
    fn test_render_page_head_and_nav() -> Result<()> {
        let templates = Templates::builtin()?;
        let home_page = Url::parse("https://example.org/").unwrap();
        let static_url = Url::parse("https://example.org/static/").unwrap();
        let writer = Writer {
            templates: &templates,
            root_output_directory: Path::new("/unused"),
            home_page: &home_page,
            static_url: &static_url,
        };

        let out = writer.render_page(&page())?;
        assert!(out.contains("<title>Projects | Chris Chan</title>"));
        assert!(out.contains(r#"<html lang="en-us">"#));
        assert!(out.contains(r#"<meta name="description" content="Robots &amp; more">"#));
        assert!(out.contains(r#"<link rel="canonical" href="https://example.org/projects/">"#));
        assert!(out.contains(r#"<meta property="og:locale" content="en_US">"#));
        assert!(out.contains(r#"<meta property="og:image" content="/static/images/banner.png">"#));
        assert!(out.contains(r#"href="https://example.org/static/css/site.css""#));
        assert!(out.contains(r#"<a href="https://example.org/about/">About</a>"#));
        assert!(out.contains(r#"<main class="page page-projects">"#));
        assert!(out.contains("<p>body</p>"));
        Ok(())
    }

    #[test]
    fn test_write_pages() -> Result<()> {
        let templates = Templates::builtin()?;
        let out_dir = tempfile::tempdir()?;
        let home_page = Url::parse("https://example.org/").unwrap();
        let static_url = Url::parse("https://example.org/static/").unwrap();
        let writer = Writer {
            templates: &templates,
            root_output_directory: out_dir.path(),
            home_page: &home_page,
            static_url: &static_url,
        };

        let written = writer.write_pages(&[page()])?;
        let wanted = out_dir.path().join("projects").join("index.html");
        assert_eq!(vec![wanted.clone()], written);
        assert!(std::fs::read_to_string(&wanted)?.contains("<p>body</p>"));
        Ok(())
    }
}
