//! Defines [`ProjectRecord`] and the logic for loading the static project list
//! from YAML.

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// One portfolio project. Records are loaded once and never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectRecord {
    /// The project title. Unique within a collection; it also keys the card
    /// (see [`ProjectRecord::id`]).
    pub name: String,

    pub date: Option<NaiveDate>,

    /// Tags in display order. Duplicates are kept.
    pub tags: Vec<String>,

    /// The card image, either a URL or a path relative to the site root.
    pub src: String,

    pub description: String,
    pub demo_link: Option<String>,
    pub code_link: Option<String>,
}

impl ProjectRecord {
    /// The slugified name, used as the card's element id.
    pub fn id(&self) -> String {
        slug::slugify(&self.name)
    }
}

/// A project as written in `projects.yaml`. Besides the canonical field names
/// this accepts `title`, `imgSrc`, and `href`, and derives a GitHub code link
/// from `githubUser`/`githubRepo`. When both `demoLink` and `href` are given,
/// `demoLink` wins.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Entry {
    #[serde(alias = "title")]
    name: String,

    #[serde(default)]
    date: Option<String>,

    #[serde(default)]
    tags: Vec<String>,

    #[serde(alias = "imgSrc", alias = "img_src")]
    src: String,

    #[serde(default)]
    description: String,

    #[serde(default, alias = "demo_link")]
    demo_link: Option<String>,

    #[serde(default)]
    href: Option<String>,

    #[serde(default, alias = "code_link")]
    code_link: Option<String>,

    #[serde(default)]
    github_user: Option<String>,

    #[serde(default)]
    github_repo: Option<String>,
}

impl Entry {
    fn into_record(self) -> Result<ProjectRecord> {
        let Entry {
            name,
            date,
            tags,
            src,
            description,
            demo_link,
            href,
            code_link,
            github_user,
            github_repo,
        } = self;

        let date = match non_empty(date) {
            Some(date) => Some(parse_date(&date).map_err(|err| Error::Date {
                project: name.clone(),
                value: date.clone(),
                err,
            })?),
            None => None,
        };

        let code_link = match (
            non_empty(code_link),
            non_empty(github_user),
            non_empty(github_repo),
        ) {
            (Some(link), _, _) => Some(link),
            (None, Some(user), Some(repo)) => Some(format!("https://github.com/{}/{}", user, repo)),
            _ => None,
        };

        Ok(ProjectRecord {
            name,
            date,
            tags,
            src,
            description: collapse_whitespace(&description),
            demo_link: non_empty(demo_link).or_else(|| non_empty(href)),
            code_link,
        })
    }
}

// Empty strings are treated like absent fields.
fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

// Descriptions are often written as indented block scalars; render them as a
// single line.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Parses a project date written either as `YYYY-MM-DD` or as an RFC 3339
/// timestamp. Timestamps keep the calendar date in their own offset.
pub fn parse_date(s: &str) -> std::result::Result<NaiveDate, chrono::ParseError> {
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(date_err) => match DateTime::parse_from_rfc3339(s) {
            Ok(timestamp) => Ok(timestamp.naive_local().date()),
            Err(_) => Err(date_err),
        },
    }
}

/// Parses a YAML list of projects, keeping source order. Fails if two
/// projects share a name.
pub fn parse_projects(input: &str) -> Result<Vec<ProjectRecord>> {
    let entries: Vec<Entry> = serde_yaml::from_str(input)?;
    let mut seen: HashSet<String> = HashSet::new();
    let mut projects = Vec::with_capacity(entries.len());
    for entry in entries {
        let project = entry.into_record()?;
        if !seen.insert(project.name.clone()) {
            return Err(Error::DuplicateName(project.name));
        }
        projects.push(project);
    }
    Ok(projects)
}

/// Loads the project list from `path`. A missing file is an empty list.
pub fn load_projects(path: &Path) -> Result<Vec<ProjectRecord>> {
    use std::io::Read;

    if !path.exists() {
        tracing::warn!(path = %path.display(), "no project list found");
        return Ok(Vec::new());
    }

    let mut contents = String::new();
    File::open(path)
        .and_then(|mut file| file.read_to_string(&mut contents))
        .map_err(|err| Error::Io {
            path: path.to_owned(),
            err,
        })?;
    let projects = parse_projects(&contents)?;
    tracing::debug!(count = projects.len(), path = %path.display(), "loaded projects");
    Ok(projects)
}

/// The result of a fallible project-loading operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading the project list.
#[derive(Debug)]
pub enum Error {
    /// Returned when the project list can't be read.
    Io { path: PathBuf, err: std::io::Error },

    /// Returned when the project list isn't valid YAML or an entry is missing
    /// a required field.
    DeserializeYaml(serde_yaml::Error),

    /// Returned when a project's date can't be parsed.
    Date {
        project: String,
        value: String,
        err: chrono::ParseError,
    },

    /// Returned when two projects have the same name.
    DuplicateName(String),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io { path, err } => {
                write!(f, "Reading project list '{}': {}", path.display(), err)
            }
            Error::DeserializeYaml(err) => write!(f, "Parsing project list: {}", err),
            Error::Date {
                project,
                value,
                err,
            } => write!(
                f,
                "Parsing date `{}` of project `{}`: {}",
                value, project, err
            ),
            Error::DuplicateName(name) => {
                write!(f, "More than one project is named `{}`", name)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { path: _, err } => Some(err),
            Error::DeserializeYaml(err) => Some(err),
            Error::Date { err, .. } => Some(err),
            Error::DuplicateName(_) => None,
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

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_canonical_fields() -> Result<()> {
        let projects = parse_projects(
            r#"
- name: X
  date: "2021-01-01"
  tags: [A, B, A]
  src: /x.png
  description: d
  demoLink: http://demo
"#,
        )?;

        assert_eq!(
            vec![ProjectRecord {
                name: String::from("X"),
                date: NaiveDate::from_ymd_opt(2021, 1, 1),
                tags: vec![String::from("A"), String::from("B"), String::from("A")],
                src: String::from("/x.png"),
                description: String::from("d"),
                demo_link: Some(String::from("http://demo")),
                code_link: None,
            }],
            projects
        );
        Ok(())
    }

    #[test]
    fn test_parse_legacy_fields() -> Result<()> {
        let projects = parse_projects(
            r#"
- title: LearnRoboticsCpp
  description: >
    Implemented classical robotics
        algorithms in C++17.
  imgSrc: /static/images/learn-robotics-cpp.png
  href: https://github.com/CtfChan/LearnRoboticsCpp
  githubUser: CtfChan
  githubRepo: LearnRoboticsCpp
- title: Autonomous Pick and Go Rover
  imgSrc: /static/images/pick-and-go.png
  href: ""
"#,
        )?;

        assert_eq!(2, projects.len());
        let first = &projects[0];
        assert_eq!("LearnRoboticsCpp", first.name);
        assert_eq!("/static/images/learn-robotics-cpp.png", first.src);
        assert_eq!(
            "Implemented classical robotics algorithms in C++17.",
            first.description
        );
        assert_eq!(
            Some("https://github.com/CtfChan/LearnRoboticsCpp"),
            first.demo_link.as_deref()
        );
        assert_eq!(
            Some("https://github.com/CtfChan/LearnRoboticsCpp"),
            first.code_link.as_deref()
        );
        assert_eq!(None, first.date);

        let second = &projects[1];
        assert_eq!(None, second.demo_link);
        assert_eq!(None, second.code_link);
        assert!(second.tags.is_empty());
        Ok(())
    }

    #[test]
    fn test_explicit_code_link_wins_over_github_fields() -> Result<()> {
        let projects = parse_projects(
            r#"- {name: a, src: a.png, codeLink: "https://example.org/a", githubUser: u, githubRepo: r}"#,
        )?;
        assert_eq!(Some("https://example.org/a"), projects[0].code_link.as_deref());
        Ok(())
    }

    #[test]
    fn test_demo_link_wins_over_href() -> Result<()> {
        let projects = parse_projects(
            "- {name: a, src: a.png, href: http://x, demoLink: http://y}\n- {name: b, src: b.png, href: http://x, demoLink: ''}",
        )?;
        assert_eq!(Some("http://y"), projects[0].demo_link.as_deref());
        assert_eq!(Some("http://x"), projects[1].demo_link.as_deref());
        Ok(())
    }

    #[test]
    fn test_duplicate_names_rejected() {
        match parse_projects("- {name: a, src: a.png}\n- {name: a, src: b.png}") {
            Err(Error::DuplicateName(name)) => assert_eq!("a", name),
            Err(e) => panic!("wanted DuplicateName; found {}", e),
            Ok(_) => panic!("wanted DuplicateName; found projects"),
        }
    }

    #[test]
    fn test_bad_date_rejected() {
        match parse_projects("- {name: a, src: a.png, date: yesterday}") {
            Err(Error::Date { project, value, .. }) => {
                assert_eq!("a", project);
                assert_eq!("yesterday", value);
            }
            Err(e) => panic!("wanted Date; found {}", e),
            Ok(_) => panic!("wanted Date; found projects"),
        }
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(NaiveDate::from_ymd_opt(2021, 1, 1), parse_date("2021-01-01").ok());
        assert_eq!(
            NaiveDate::from_ymd_opt(2020, 6, 30),
            parse_date("2020-06-30T23:30:00-04:00").ok()
        );
        assert!(parse_date("June 2020").is_err());
    }

    #[test]
    fn test_missing_file_is_empty() -> Result<()> {
        assert!(load_projects(Path::new("./testdata/no-such-file.yaml"))?.is_empty());
        Ok(())
    }

    #[test]
    fn test_load_fixture_keeps_source_order() -> Result<()> {
        let projects = load_projects(Path::new("./testdata/site/data/projects.yaml"))?;
        let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            vec![
                "LearnRoboticsCpp",
                "Robot Exploration",
                "Virtual Bumper",
                "Autonomous Pick and Go Rover",
                "Autonomous Wheelchair Project",
            ],
            names
        );
        Ok(())
    }

    #[test]
    fn test_id_is_slug() {
        let record = ProjectRecord {
            name: String::from("Robot Exploration"),
            date: None,
            tags: Vec::new(),
            src: String::new(),
            description: String::new(),
            demo_link: None,
            code_link: None,
        };
        assert_eq!("robot-exploration", record.id());
    }
}
