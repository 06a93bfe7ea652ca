//! Renders a [`ProjectRecord`] as a project card: image, tag badges, title,
//! date, description, and the optional demo and code links. Optional fields
//! that are absent simply leave their element out.

use crate::project::ProjectRecord;
use crate::template::{render, Result, Templates};
use crate::value::{object, optional_text, text};
use chrono::NaiveDate;
use gtmpl::Value;

/// The icon shown inside the "View Code" link.
pub const GITHUB_ICON: &str = "/static/images/github-icon.svg";

/// Formats a date as e.g. `Fri Jan 01 2021`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

impl From<&ProjectRecord> for Value {
    /// Converts a [`ProjectRecord`] into the [`Value`] consumed by the card
    /// template. Every key is always present; absent optional fields are
    /// [`Value::Nil`].
    fn from(p: &ProjectRecord) -> Value {
        object(vec![
            ("id", text(&p.id())),
            ("name", text(&p.name)),
            (
                "date",
                optional_text(p.date.map(format_date).as_deref()),
            ),
            ("tags", Value::Array(p.tags.iter().map(|t| text(t)).collect())),
            ("src", text(&p.src)),
            ("description", text(&p.description)),
            ("demo_link", optional_text(p.demo_link.as_deref())),
            ("code_link", optional_text(p.code_link.as_deref())),
            ("github_icon", text(GITHUB_ICON)),
        ])
    }
}

/// Renders one card.
pub fn render_card(templates: &Templates, project: &ProjectRecord) -> Result<String> {
    render(&templates.card, Value::from(project))
}
