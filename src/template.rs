//! Loads and executes the [`gtmpl`] templates used to render sections and
//! pages. Every template has a built-in default compiled into the binary; a
//! project's `theme/` directory may override any of them by providing a file
//! with the same name.

use gtmpl::{Context, Template, Value};
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// The name and built-in contents of each template.
const BUILTINS: [(&str, &str); 6] = [
    ("layout.html", include_str!("theme/layout.html")),
    ("card.html", include_str!("theme/card.html")),
    ("hero.html", include_str!("theme/hero.html")),
    ("skills.html", include_str!("theme/skills.html")),
    ("projects.html", include_str!("theme/projects.html")),
    ("about.html", include_str!("theme/about.html")),
];

/// The full set of parsed templates.
pub struct Templates {
    /// Wraps a rendered page body in the document head and site navigation.
    pub layout: Template,

    /// Renders a single project card.
    pub card: Template,

    /// Renders the hero banner.
    pub hero: Template,

    /// Renders the skills grid.
    pub skills: Template,

    /// Renders the projects list from already-rendered cards.
    pub projects: Template,

    /// Renders the About page body from already-rendered sections.
    pub about: Template,
}

impl Templates {
    /// Parses the built-in templates.
    pub fn builtin() -> Result<Templates> {
        Templates::load(None)
    }

    /// Parses the templates, preferring files in `theme_directory` (when it
    /// is given and exists) over the built-in ones.
    pub fn load(theme_directory: Option<&Path>) -> Result<Templates> {
        let mut parsed = BUILTINS
            .iter()
            .map(|(name, builtin)| load_one(theme_directory, name, builtin))
            .collect::<Result<Vec<Template>>>()?
            .into_iter();

        // `parsed` has exactly one entry per `BUILTINS` entry, in order.
        let mut next = || parsed.next().ok_or(Error::Missing);
        Ok(Templates {
            layout: next()?,
            card: next()?,
            hero: next()?,
            skills: next()?,
            projects: next()?,
            about: next()?,
        })
    }
}

fn load_one(theme_directory: Option<&Path>, name: &str, builtin: &str) -> Result<Template> {
    let override_path = theme_directory
        .map(|dir| dir.join(name))
        .filter(|path| path.is_file());

    let contents = match &override_path {
        Some(path) => {
            use std::io::Read;
            tracing::debug!(path = %path.display(), "using theme template");
            let mut contents = String::new();
            File::open(path)
                .map_err(|e| Error::OpenTemplateFile {
                    path: path.to_owned(),
                    err: e,
                })?
                .read_to_string(&mut contents)?;
            contents
        }
        None => builtin.to_owned(),
    };

    let mut template = Template::default();
    template.parse(&contents).map_err(|err| Error::Parse {
        name: name.to_owned(),
        err,
    })?;
    Ok(template)
}

/// Executes `template` against `value` and returns the output as a string.
pub fn render(template: &Template, value: Value) -> Result<String> {
    let context = Context::from(value).map_err(Error::Execute)?;
    let mut out: Vec<u8> = Vec::new();
    template.execute(&mut out, &context).map_err(Error::Execute)?;
    Ok(String::from_utf8(out)?)
}

/// The result of a fallible template operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading, parsing, or executing a template.
#[derive(Debug)]
pub enum Error {
    /// Returned for I/O problems while opening theme template files.
    OpenTemplateFile { path: PathBuf, err: std::io::Error },

    /// Returned for errors parsing a template.
    Parse { name: String, err: String },

    /// Returned for errors executing a template.
    Execute(String),

    /// Returned when a template produces output that isn't valid UTF-8.
    Utf8(std::string::FromUtf8Error),

    /// Returned when fewer templates were parsed than expected.
    Missing,

    /// Returned for other I/O errors.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::OpenTemplateFile { path, err } => {
                write!(f, "Opening template file '{}': {}", path.display(), err)
            }
            Error::Parse { name, err } => {
                write!(f, "Parsing template '{}': {}", name, err)
            }
            Error::Execute(err) => write!(f, "Executing template: {}", err),
            Error::Utf8(err) => err.fmt(f),
            Error::Missing => write!(f, "Missing template"),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::OpenTemplateFile { path: _, err } => Some(err),
            Error::Parse { .. } => None,
            Error::Execute(_) => None,
            Error::Utf8(err) => Some(err),
            Error::Missing => None,
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

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Error {
        Error::Utf8(err)
    }
}
