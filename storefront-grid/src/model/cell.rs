//! Display value of a grid cell

use std::fmt;

/// What a cell shows once its raw value has been formatted.
///
/// Plain text and markup are kept apart so adapters know what needs escaping:
/// [`Cell::Text`] is untrusted content, [`Cell::Markup`] is trusted output of a
/// caller-supplied formatter and is inserted as is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cell {
    /// Nothing to show.
    #[default]
    Empty,
    /// Plain text, must be escaped by markup-producing adapters.
    Text(String),
    /// Trusted markup.
    Markup(String),
}

impl Cell {
    /// Creates a plain text cell.
    pub fn text(content: impl Into<String>) -> Self {
        Cell::Text(content.into())
    }

    /// Creates a trusted markup cell.
    pub fn markup(content: impl Into<String>) -> Self {
        Cell::Markup(content.into())
    }

    /// Returns `true` if the cell shows nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) | Cell::Markup(s) => s.is_empty(),
        }
    }

    /// Returns the raw content.
    pub fn as_str(&self) -> &str {
        match self {
            Cell::Empty => "",
            Cell::Text(s) | Cell::Markup(s) => s,
        }
    }

    /// Renders the cell as HTML: text is escaped, markup is passed through.
    pub fn to_html(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => html_escape::encode_text(s).into_owned(),
            Cell::Markup(s) => s.clone(),
        }
    }

    /// Renders the cell for text-only surfaces: markup tags are dropped and
    /// entities decoded.
    pub fn to_plain(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Markup(s) => {
                let mut out = String::with_capacity(s.len());
                let mut in_tag = false;
                for c in s.chars() {
                    match c {
                        '<' => in_tag = true,
                        '>' if in_tag => in_tag = false,
                        _ if !in_tag => out.push(c),
                        _ => {}
                    }
                }
                html_escape::decode_html_entities(&out).into_owned()
            }
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Cell {
    fn from(v: String) -> Self {
        Cell::Text(v)
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Text(v.to_string())
    }
}
