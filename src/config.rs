//! Loads the [`Config`] for a portfolio project from its `folio.yaml` file.

use crate::ticker::Frame;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::path::{Component, Path, PathBuf};
use url::Url;

/// The name of the project file. [`Config::from_directory`] looks for it in
/// the given directory and then in each of its ancestors.
pub const PROJECT_FILE: &str = "folio.yaml";

/// The raw contents of `folio.yaml`.
#[derive(Deserialize)]
struct Project {
    site_root: Url,
    title: String,

    #[serde(default)]
    description: String,

    #[serde(default = "default_language")]
    language: String,

    #[serde(default)]
    social_banner: Option<String>,

    #[serde(default = "default_author")]
    author: String,

    #[serde(default)]
    hero: HeroConfig,
}

fn default_language() -> String {
    String::from("en-us")
}

fn default_author() -> String {
    String::from("default")
}

/// Site-wide metadata made available to every page.
#[derive(Clone, Debug)]
pub struct Site {
    /// The site title; page titles are rendered as `{page} | {title}`.
    pub title: String,

    /// The default page description.
    pub description: String,

    /// The URL of the site root. Always ends in a trailing slash so that
    /// [`Url::join`] treats it as a directory.
    pub site_root: Url,

    /// The document language, e.g. `en-us`.
    pub language: String,

    /// An optional image used for social previews.
    pub social_banner: Option<String>,
}

impl Site {
    /// The OpenGraph locale for [`Site::language`], e.g. `en-us` becomes
    /// `en_US`.
    pub fn locale(&self) -> String {
        let mut parts = self.language.splitn(2, |c| c == '-' || c == '_');
        match (parts.next(), parts.next()) {
            (Some(lang), Some(region)) => {
                format!("{}_{}", lang.to_lowercase(), region.to_uppercase())
            }
            _ => self.language.to_lowercase(),
        }
    }
}

/// A link rendered as an icon in the hero banner.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SocialLink {
    /// The network, e.g. `github`. Used to pick the icon.
    pub kind: String,
    pub href: String,
}

/// The contents of the hero banner.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub greeting: String,

    /// The cycling text after the greeting.
    pub frames: Vec<Frame>,

    /// Typing speed hint for the client, in characters per second.
    pub speed: u32,

    pub tagline: String,
    pub avatar: String,
    pub socials: Vec<SocialLink>,
}

impl Default for HeroConfig {
    fn default() -> Self {
        HeroConfig {
            greeting: String::from("Hello, I'm "),
            frames: vec![Frame::new("Chris", 1000), Frame::new("an Engineer", 1000)],
            speed: 50,
            tagline: String::from("Avid learner. Passionate C++ and robotics programmer."),
            avatar: String::from("/static/images/avatar.png"),
            socials: vec![
                SocialLink {
                    kind: String::from("github"),
                    href: String::from("https://github.com/"),
                },
                SocialLink {
                    kind: String::from("linkedin"),
                    href: String::from("https://www.linkedin.com/"),
                },
            ],
        }
    }
}

/// Everything needed to build a site.
pub struct Config {
    pub site: Site,
    pub hero: HeroConfig,

    /// The slug of the author shown on the About page.
    pub author_slug: String,

    /// The static list of projects (`data/projects.yaml`).
    pub projects_file: PathBuf,

    /// The author profile collection (`authors/*.md`).
    pub authors_directory: PathBuf,

    /// Static assets copied verbatim into the output (`static/`).
    pub static_source_directory: PathBuf,

    /// Template overrides (`theme/`).
    pub theme_directory: PathBuf,

    /// The directory the site is written into.
    pub root_output_directory: PathBuf,

    /// `{root_output_directory}/static`.
    pub static_output_directory: PathBuf,

    /// The URL the static assets are served from (`{site_root}/static/`).
    pub static_url: Url,
}

impl Config {
    /// Searches `dir` and its ancestors for a [`PROJECT_FILE`] and loads it.
    /// When `output_directory` is `None`, the site is written to `_output`
    /// next to the project file.
    pub fn from_directory(dir: &Path, output_directory: Option<&Path>) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.exists() {
            Config::from_project_file(&path, output_directory)
        } else {
            match dir.parent() {
                Some(parent) => Config::from_directory(parent, output_directory),
                None => Err(Error::ProjectFileNotFound),
            }
        }
    }

    /// Loads the project file at `path`. Source directories are resolved
    /// relative to the file's parent directory.
    pub fn from_project_file(path: &Path, output_directory: Option<&Path>) -> Result<Config> {
        let file = File::open(path).map_err(|err| Error::OpenProjectFile {
            path: path.to_owned(),
            err,
        })?;
        let project: Project = serde_yaml::from_reader(file)?;
        let project_root = path
            .parent()
            .ok_or_else(|| Error::NoParentDirectory(path.to_owned()))?;
        let root_output_directory = match output_directory {
            Some(dir) => dir.to_owned(),
            None => project_root.join("_output"),
        };

        let site_root = with_trailing_slash(project.site_root);
        let config = Config {
            static_url: site_root.join("static/")?,
            site: Site {
                title: project.title,
                description: project.description,
                site_root,
                language: project.language,
                social_banner: project.social_banner,
            },
            hero: project.hero,
            author_slug: project.author,
            projects_file: project_root.join("data").join("projects.yaml"),
            authors_directory: project_root.join("authors"),
            static_source_directory: project_root.join("static"),
            theme_directory: project_root.join("theme"),
            static_output_directory: root_output_directory.join("static"),
            root_output_directory,
        };
        config.check_output_is_separate(path)?;
        Ok(config)
    }

    /// The directories a build deletes and rewrites.
    pub fn output_directories(&self) -> Vec<PathBuf> {
        vec![
            self.root_output_directory.join(crate::page::ABOUT),
            self.root_output_directory.join(crate::page::PROJECTS),
            self.static_output_directory.clone(),
        ]
    }

    // A build removes its output directories before writing, so none of them
    // may contain or sit inside a source path.
    fn check_output_is_separate(&self, project_file: &Path) -> Result<()> {
        let sources: [&Path; 5] = [
            project_file,
            self.projects_file.as_path(),
            self.authors_directory.as_path(),
            self.static_source_directory.as_path(),
            self.theme_directory.as_path(),
        ];
        for output in self.output_directories() {
            let output_abs = absolute(&output)?;
            for &source in sources.iter() {
                let source_abs = absolute(source)?;
                if source_abs.starts_with(&output_abs) || output_abs.starts_with(&source_abs) {
                    return Err(Error::OutputOverlapsSource {
                        output,
                        source: source.to_path_buf(),
                    });
                }
            }
        }
        Ok(())
    }
}

// Resolves `path` against the working directory and removes `.` and `..`
// without touching the filesystem; output directories may not exist yet.
fn absolute(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_owned()
    } else {
        std::env::current_dir()
            .map_err(Error::CurrentDirectory)?
            .join(path)
    };
    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            c => normalized.push(c),
        }
    }
    Ok(normalized)
}

// `Url::join` drops the last path segment of a base URL that doesn't end in a
// slash, so the site root always gets one.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// The result of loading a [`Config`].
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading a [`Config`].
#[derive(Debug)]
pub enum Error {
    /// Returned when no `folio.yaml` exists in the directory or any ancestor.
    ProjectFileNotFound,

    /// Returned when the project file can't be opened.
    OpenProjectFile { path: PathBuf, err: std::io::Error },

    /// Returned when the project file has no parent directory.
    NoParentDirectory(PathBuf),

    /// Returned when the project file isn't valid YAML or is missing fields.
    DeserializeYaml(serde_yaml::Error),

    /// Returned when a URL can't be derived from the site root.
    UrlParse(url::ParseError),

    /// Returned when an output directory a build would clean overlaps a
    /// source path.
    OutputOverlapsSource { output: PathBuf, source: PathBuf },

    /// Returned when the working directory can't be read to resolve paths.
    CurrentDirectory(std::io::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ProjectFileNotFound => write!(
                f,
                "Could not find `{}` in any parent directory",
                PROJECT_FILE
            ),
            Error::OpenProjectFile { path, err } => {
                write!(f, "Opening project file '{}': {}", path.display(), err)
            }
            Error::NoParentDirectory(path) => write!(
                f,
                "Can't get parent directory for project file '{}'",
                path.display()
            ),
            Error::DeserializeYaml(err) => write!(f, "Loading configuration: {}", err),
            Error::UrlParse(err) => err.fmt(f),
            Error::OutputOverlapsSource { output, source } => write!(
                f,
                "Output directory '{}' overlaps source '{}'; choose a separate output directory",
                output.display(),
                source.display()
            ),
            Error::CurrentDirectory(err) => {
                write!(f, "Reading the working directory: {}", err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ProjectFileNotFound => None,
            Error::OpenProjectFile { path: _, err } => Some(err),
            Error::NoParentDirectory(_) => None,
            Error::DeserializeYaml(err) => Some(err),
            Error::UrlParse(err) => Some(err),
            Error::OutputOverlapsSource { .. } => None,
            Error::CurrentDirectory(err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Error {
        Error::UrlParse(err)
    }
}
