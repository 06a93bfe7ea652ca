//! Exports the [`build_site`] function which stitches together the high-level
//! steps of building the output static site: loading content
//! ([`crate::content`]), assembling pages ([`crate::page`]), writing them
//! ([`crate::write`]), and copying the static source directory into the
//! static output directory.

use crate::config::Config;
use crate::content::{Content, ContentSource, Error as ContentError};
use crate::page::{Assembler, Error as PageError, ABOUT};
use crate::template::{Error as TemplateError, Templates};
use crate::write::{Error as WriteError, Writer};
use std::fmt;
use std::path::{Path, PathBuf};

/// Builds the site from a [`Config`] object, loading content from the
/// project directory.
pub fn build_site(config: &Config) -> Result<()> {
    let content = Content::load(config)?;
    build_site_from(config, &content)
}

/// Builds the site from a [`Config`] and an already-loaded
/// [`ContentSource`].
pub fn build_site_from(config: &Config, content: &dyn ContentSource) -> Result<()> {
    let templates = Templates::load(Some(config.theme_directory.as_path()))?;

    let assembler = Assembler {
        templates: &templates,
        site: &config.site,
        hero: &config.hero,
        author_slug: &config.author_slug,
    };
    let pages = assembler.pages(content)?;

    // Only remove what a build writes, in case the output directory is
    // shared with something else. `Config` guarantees none of these overlap a
    // source path.
    for dir in config.output_directories() {
        rmdir(&dir)?;
    }

    let writer = Writer {
        templates: &templates,
        root_output_directory: &config.root_output_directory,
        home_page: &config.site.site_root,
        static_url: &config.static_url,
    };
    writer.write_pages(&pages)?;

    // the About page doubles as the home page
    std::fs::copy(
        config.root_output_directory.join(ABOUT).join("index.html"),
        config.root_output_directory.join("index.html"),
    )?;

    if config.static_source_directory.is_dir() {
        copy_dir(
            &config.static_source_directory,
            &config.static_output_directory,
        )?;
    }

    tracing::info!(
        pages = pages.len(),
        output = %config.root_output_directory.display(),
        "built site"
    );
    Ok(())
}

fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    use walkdir::WalkDir;

    for result in WalkDir::new(src) {
        let entry = result?;
        // strip_prefix can't fail; every entry is beneath `src`
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }

    Ok(())
}

fn rmdir(dir: &Path) -> Result<()> {
    match std::fs::remove_dir_all(dir) {
        Ok(x) => Ok(x),
        Err(e) => match e.kind() {
            std::io::ErrorKind::NotFound => Ok(()),
            _ => Err(Error::Clean {
                path: dir.to_owned(),
                err: e,
            }),
        },
    }
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during content loading,
/// templating, page assembly, writing, cleaning output directories, and other
/// I/O.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors loading content.
    Content(ContentError),

    /// Returned for errors loading templates.
    Template(TemplateError),

    /// Returned for errors assembling pages.
    Page(PageError),

    /// Returned for errors writing pages to disk as HTML files.
    Write(WriteError),

    /// Returned for I/O problems while cleaning output directories.
    Clean { path: PathBuf, err: std::io::Error },

    /// Returned for errors walking the static directory.
    WalkDir(walkdir::Error),

    /// Returned for other I/O errors.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Content(err) => err.fmt(f),
            Error::Template(err) => err.fmt(f),
            Error::Page(err) => err.fmt(f),
            Error::Write(err) => err.fmt(f),
            Error::Clean { path, err } => {
                write!(f, "Cleaning directory '{}': {}", path.display(), err)
            }
            Error::WalkDir(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Content(err) => Some(err),
            Error::Template(err) => Some(err),
            Error::Page(err) => Some(err),
            Error::Write(err) => Some(err),
            Error::Clean { path: _, err } => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<ContentError> for Error {
    /// Converts [`ContentError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: ContentError) -> Error {
        Error::Content(err)
    }
}

impl From<TemplateError> for Error {
    /// Converts [`TemplateError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: TemplateError) -> Error {
        Error::Template(err)
    }
}

impl From<PageError> for Error {
    /// Converts [`PageError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: PageError) -> Error {
        Error::Page(err)
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn fixture_config(output: &Path) -> Config {
        Config::from_directory(Path::new("./testdata/site"), Some(output)).unwrap()
    }

    #[test]
    fn test_build_fixture_site() -> Result<()> {
        let out = tempfile::tempdir()?;
        let config = fixture_config(out.path());
        build_site(&config)?;

        let index = std::fs::read_to_string(out.path().join("index.html"))?;
        let about = std::fs::read_to_string(out.path().join("about").join("index.html"))?;
        assert_eq!(about, index);
        assert!(about.contains("<title>About | Chris Chan</title>"));
        assert!(about.contains(r#"<section class="author">"#));

        let projects = std::fs::read_to_string(out.path().join("projects").join("index.html"))?;
        assert_eq!(5, projects.matches(r#"<div class="card""#).count());
        assert!(projects.contains(r#"href="https://github.com/CtfChan/explore_ros2""#));

        assert!(out.path().join("static").join("css").join("site.css").is_file());
        Ok(())
    }

    #[test]
    fn test_rebuild_replaces_stale_output() -> Result<()> {
        let out = tempfile::tempdir()?;
        let config = fixture_config(out.path());
        let stale = out.path().join("projects").join("stale.html");
        std::fs::create_dir_all(stale.parent().unwrap())?;
        std::fs::write(&stale, "old")?;
        let unrelated = out.path().join("CNAME");
        std::fs::write(&unrelated, "example.org")?;

        build_site(&config)?;
        assert!(!stale.exists());
        assert!(unrelated.exists());
        Ok(())
    }

    fn scratch_project(dir: &Path) -> std::io::Result<PathBuf> {
        std::fs::write(
            dir.join(crate::config::PROJECT_FILE),
            "site_root: https://example.org/\ntitle: Chris\n",
        )?;
        let css = dir.join("static").join("css").join("site.css");
        std::fs::create_dir_all(css.parent().unwrap())?;
        std::fs::write(&css, "body {}")?;
        Ok(css)
    }

    #[test]
    fn test_output_at_project_root_keeps_static_source() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let css = scratch_project(dir.path())?;

        match Config::from_directory(dir.path(), Some(dir.path())) {
            Err(crate::config::Error::OutputOverlapsSource { .. }) => {}
            Err(e) => panic!("wanted OutputOverlapsSource; found {}", e),
            Ok(_) => panic!("wanted OutputOverlapsSource; found a config"),
        }
        assert!(css.is_file());
        Ok(())
    }

    #[test]
    fn test_output_inside_project_keeps_static_source() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let css = scratch_project(dir.path())?;
        let out = dir.path().join("public");

        let config = Config::from_directory(dir.path(), Some(out.as_path())).unwrap();
        build_site(&config)?;
        build_site(&config)?;

        assert!(css.is_file());
        assert!(out.join("static").join("css").join("site.css").is_file());
        assert!(out.join("index.html").is_file());
        Ok(())
    }

    #[test]
    fn test_missing_author_still_builds_about_page() -> Result<()> {
        let out = tempfile::tempdir()?;
        let config = fixture_config(out.path());
        build_site_from(&config, &Content::default())?;

        let about = std::fs::read_to_string(out.path().join("about").join("index.html"))?;
        assert!(about.contains(r#"<section class="hero">"#));
        assert!(about.contains(r#"<section class="skills">"#));
        assert!(!about.contains(r#"<section class="author">"#));
        Ok(())
    }
}
