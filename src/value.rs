//! Helpers for building [`Value`]s to hand to templates. Templates print
//! values verbatim, so any text that originates from content files must pass
//! through [`text`] (or [`escape`]) on its way in.

use gtmpl::Value;
use pulldown_cmark::escape::escape_html;
use std::collections::HashMap;
use url::Url;

/// Escapes `s` for use in HTML text or in a double-quoted attribute.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    // writing into a `String` can't fail
    let _ = escape_html(&mut out, s);
    out
}

/// Converts plain text into an escaped [`Value::String`].
pub fn text(s: &str) -> Value {
    Value::String(escape(s))
}

/// Like [`text`], but `None` becomes [`Value::Nil`] so that `{{ if .field }}`
/// suppresses the element.
pub fn optional_text(s: Option<&str>) -> Value {
    match s {
        Some(s) => text(s),
        None => Value::Nil,
    }
}

/// Wraps an already-rendered HTML fragment. No escaping is applied.
pub fn html(fragment: String) -> Value {
    Value::String(fragment)
}

pub fn url(url: &Url) -> Value {
    text(url.as_str())
}

/// Builds a [`Value::Object`] from `(key, value)` pairs.
pub fn object<I>(fields: I) -> Value
where
    I: IntoIterator<Item = (&'static str, Value)>,
{
    let m: HashMap<String, Value> = fields
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v))
        .collect();
    Value::Object(m)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;",
            escape(r#"<b>Tom & "Jerry"</b>"#)
        );
    }

    #[test]
    fn test_optional_text_none_is_nil() {
        assert!(matches!(optional_text(None), Value::Nil));
    }
}
