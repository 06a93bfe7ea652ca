//! Defines [`AuthorProfile`] and the logic for loading the author collection
//! from markdown files with YAML frontmatter.

use pulldown_cmark::{html, Options, Parser};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

const MARKDOWN_EXTENSION: &str = "md";

/// An author, as shown in the About page's author section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorProfile {
    /// Uniquely identifies the author within the collection.
    pub slug: String,

    pub name: String,
    pub occupation: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,

    /// The author's bio, rendered to HTML.
    pub bio: String,
}

#[derive(Deserialize)]
struct Frontmatter {
    name: String,

    #[serde(default)]
    slug: Option<String>,

    #[serde(default)]
    occupation: Option<String>,

    #[serde(default)]
    company: Option<String>,

    #[serde(default)]
    email: Option<String>,

    #[serde(default)]
    avatar: Option<String>,

    #[serde(default)]
    github: Option<String>,

    #[serde(default)]
    linkedin: Option<String>,
}

impl AuthorProfile {
    /// Parses an author from the contents of a source file. `stem` is the
    /// file name less its extension; its slugified form is the author's slug
    /// unless the frontmatter sets one. The input must be structured as:
    ///
    /// ```md
    /// ---
    /// name: Chris Chan
    /// occupation: Software Engineer
    /// ---
    /// Markdown bio.
    /// ```
    pub fn parse(stem: &str, input: &str) -> Result<AuthorProfile> {
        fn frontmatter_indices(input: &str) -> Result<(usize, usize, usize)> {
            const FENCE: &str = "---";
            if !input.starts_with(FENCE) {
                return Err(Error::FrontmatterMissingStartFence);
            }
            match input[FENCE.len()..].find(FENCE) {
                None => Err(Error::FrontmatterMissingEndFence),
                Some(offset) => Ok((
                    FENCE.len(),                        // yaml_start
                    FENCE.len() + offset,               // yaml_stop
                    FENCE.len() + offset + FENCE.len(), // body_start
                )),
            }
        }

        let (yaml_start, yaml_stop, body_start) = frontmatter_indices(input)?;
        let frontmatter: Frontmatter = serde_yaml::from_str(&input[yaml_start..yaml_stop])?;

        let mut options = Options::empty();
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_SMART_PUNCTUATION);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TABLES);
        let mut bio = String::new();
        html::push_html(&mut bio, Parser::new_ext(&input[body_start..], options));

        Ok(AuthorProfile {
            slug: match frontmatter.slug {
                Some(slug) => slug,
                None => slug::slugify(stem),
            },
            name: frontmatter.name,
            occupation: frontmatter.occupation,
            company: frontmatter.company,
            email: frontmatter.email,
            avatar: frontmatter.avatar,
            github: frontmatter.github,
            linkedin: frontmatter.linkedin,
            bio,
        })
    }
}

/// Loads every `*.md` file directly inside `dir` as an [`AuthorProfile`],
/// ordered by file name. A missing directory is an empty collection.
pub fn load_authors(dir: &Path) -> Result<Vec<AuthorProfile>> {
    use std::io::Read;
    use walkdir::WalkDir;

    if !dir.is_dir() {
        tracing::debug!(path = %dir.display(), "no authors directory");
        return Ok(Vec::new());
    }

    let mut authors = Vec::new();
    let mut slugs: HashSet<String> = HashSet::new();
    for result in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()))
    {
        let entry = result?;
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|e| e.to_str()) != Some(MARKDOWN_EXTENSION)
        {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::InvalidFileName(path.to_owned()))?;
        let mut contents = String::new();
        File::open(path)?.read_to_string(&mut contents)?;
        let author = AuthorProfile::parse(stem, &contents)
            .map_err(|e| Error::Annotated(format!("parsing author `{}`", path.display()), Box::new(e)))?;

        if !slugs.insert(author.slug.clone()) {
            return Err(Error::DuplicateSlug(author.slug));
        }
        authors.push(author);
    }

    tracing::debug!(count = authors.len(), "loaded authors");
    Ok(authors)
}

/// The result of a fallible author-loading operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading an [`AuthorProfile`].
#[derive(Debug)]
pub enum Error {
    /// Returned when an author source file is missing its starting
    /// frontmatter fence (`---`).
    FrontmatterMissingStartFence,

    /// Returned when an author source file is missing its terminal
    /// frontmatter fence.
    FrontmatterMissingEndFence,

    /// Returned when there was an error parsing the frontmatter as YAML.
    DeserializeYaml(serde_yaml::Error),

    /// Returned when a source file name isn't valid UTF-8.
    InvalidFileName(PathBuf),

    /// Returned when two authors resolve to the same slug.
    DuplicateSlug(String),

    /// Returned for other I/O errors.
    Io(std::io::Error),

    /// Returned for WalkDir I/O errors.
    WalkDir(walkdir::Error),

    /// An error with an annotation.
    Annotated(String, Box<Error>),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::FrontmatterMissingStartFence => {
                write!(f, "Author file must begin with `---`")
            }
            Error::FrontmatterMissingEndFence => write!(f, "Missing closing `---`"),
            Error::DeserializeYaml(err) => err.fmt(f),
            Error::InvalidFileName(path) => write!(f, "invalid file name: {:?}", path),
            Error::DuplicateSlug(slug) => {
                write!(f, "More than one author has the slug `{}`", slug)
            }
            Error::Io(err) => err.fmt(f),
            Error::WalkDir(err) => err.fmt(f),
            Error::Annotated(annotation, err) => write!(f, "{}: {}", annotation, err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FrontmatterMissingStartFence => None,
            Error::FrontmatterMissingEndFence => None,
            Error::DeserializeYaml(err) => Some(err),
            Error::InvalidFileName(_) => None,
            Error::DuplicateSlug(_) => None,
            Error::Io(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::Annotated(_, err) => Some(err),
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

impl From<walkdir::Error> for Error {
    /// Converts a [`walkdir::Error`] into an [`Error`].
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts a [`std::io::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for fallible I/O functions.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}
