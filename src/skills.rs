//! The skills section: a fixed grid of technology icons.

use crate::template::{render, Result, Templates};
use crate::value::{object, text};
use gtmpl::Value;

/// One icon in the skills grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Skill {
    pub source: &'static str,
    pub alt: &'static str,
    pub title: &'static str,
}

macro_rules! devicon {
    ($path:literal) => {
        concat!("https://cdn.jsdelivr.net/gh/devicons/devicon/icons/", $path)
    };
}

pub const HEADING: &str = "Technologies I use";

pub const SKILLS: [Skill; 9] = [
    Skill {
        source: devicon!("cplusplus/cplusplus-plain.svg"),
        alt: "The logo for cpp",
        title: "cpp",
    },
    Skill {
        source: devicon!("python/python-original-wordmark.svg"),
        alt: "The logo icon for python",
        title: "Python",
    },
    Skill {
        source: devicon!("linux/linux-original.svg"),
        alt: "The logo icon for Linux",
        title: "Linux",
    },
    Skill {
        source: devicon!("typescript/typescript-original.svg"),
        alt: "The logo icon for typescript",
        title: "Typescript",
    },
    Skill {
        source: devicon!("react/react-original-wordmark.svg"),
        alt: "The logo icon for react",
        title: "React",
    },
    Skill {
        source: devicon!("html5/html5-original-wordmark.svg"),
        alt: "The logo icon for HTML 5",
        title: "HTML 5",
    },
    Skill {
        source: devicon!("css3/css3-original-wordmark.svg"),
        alt: "The logo icon for CSS3",
        title: "CSS 3",
    },
    Skill {
        source: devicon!("git/git-original.svg"),
        alt: "The logo icon for Git",
        title: "Git",
    },
    Skill {
        source: devicon!("arduino/arduino-original.svg"),
        alt: "The logo icon for Arduino",
        title: "Arduino",
    },
];

impl From<&Skill> for Value {
    fn from(skill: &Skill) -> Value {
        object(vec![
            ("source", text(skill.source)),
            ("alt", text(skill.alt)),
            ("title", text(skill.title)),
        ])
    }
}

/// Renders the skills grid.
pub fn render_skills(templates: &Templates) -> Result<String> {
    render(
        &templates.skills,
        object(vec![
            ("heading", text(HEADING)),
            ("skills", Value::Array(SKILLS.iter().map(Value::from).collect())),
        ]),
    )
}
