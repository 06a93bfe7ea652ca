//! The hero banner: greeting, cycling text, tagline, avatar, and social
//! links. The cycling text is emitted as its first frame plus the full frame
//! list; a client-side script plays the sequence the way
//! [`crate::ticker::Ticker`] models it.

use crate::config::{HeroConfig, SocialLink};
use crate::template::{render, Result, Templates};
use crate::ticker::Frame;
use crate::value::{object, text};
use gtmpl::Value;

impl From<&Frame> for Value {
    fn from(frame: &Frame) -> Value {
        object(vec![
            ("text", text(&frame.text)),
            ("duration_ms", Value::String(frame.duration_ms.to_string())),
        ])
    }
}

impl From<&SocialLink> for Value {
    fn from(link: &SocialLink) -> Value {
        object(vec![
            ("kind", text(&link.kind)),
            ("href", text(&link.href)),
        ])
    }
}

impl From<&HeroConfig> for Value {
    fn from(hero: &HeroConfig) -> Value {
        let initial = text(hero.frames.first().map(|f| f.text.as_str()).unwrap_or_default());

        object(vec![
            ("greeting", text(&hero.greeting)),
            ("initial", initial),
            (
                "frames",
                Value::Array(hero.frames.iter().map(Value::from).collect()),
            ),
            ("speed", Value::String(hero.speed.to_string())),
            ("tagline", text(&hero.tagline)),
            ("avatar", text(&hero.avatar)),
            (
                "socials",
                Value::Array(hero.socials.iter().map(Value::from).collect()),
            ),
        ])
    }
}

/// Renders the hero banner.
pub fn render_hero(templates: &Templates, hero: &HeroConfig) -> Result<String> {
    render(&templates.hero, Value::from(hero))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_render_default_hero() -> Result<()> {
        let html = render_hero(&Templates::builtin()?, &HeroConfig::default())?;
        assert!(html.contains(r#"<span class="hero-greeting">Hello, I"#));
        assert!(html.contains(r#"data-repeat="infinite">Chris</span>"#));
        assert!(html.contains(r#"<li data-duration-ms="1000">an Engineer</li>"#));
        assert!(html.contains(r#"src="/static/images/avatar.png""#));
        assert_eq!(2, html.matches(r#"class="social-icon"#).count());
        assert!(html.contains("social-github"));
        assert!(html.contains("social-linkedin"));
        Ok(())
    }

    #[test]
    fn test_no_frames_renders_empty_text() -> Result<()> {
        let hero = HeroConfig {
            frames: Vec::new(),
            ..HeroConfig::default()
        };
        let html = render_hero(&Templates::builtin()?, &hero)?;
        assert!(!html.contains("data-duration-ms"));
        assert!(html.contains(r#"data-repeat="infinite"></span>"#));
        Ok(())
    }
}
