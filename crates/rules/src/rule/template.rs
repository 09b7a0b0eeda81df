//! Message templates with a single positional slot.
//!
//! `{}` and `{0}` are replaced by the alert message, `{{` and `}}` are
//! literal braces. Templates are parsed once at compile time.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Reasons a template string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("unsupported placeholder '{{{0}}}', only '{{}}' or '{{0}}' are allowed")]
    UnsupportedPlaceholder(String),

    #[error("unclosed '{{' at byte {0}")]
    Unclosed(usize),

    #[error("single '}}' at byte {0}, use '}}}}' for a literal brace")]
    UnmatchedClose(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    parts: Vec<Part>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' => {
                    if chars.next_if(|&(_, n)| n == '{').is_some() {
                        literal.push('{');
                        continue;
                    }
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, n) in chars.by_ref() {
                        if n == '}' {
                            closed = true;
                            break;
                        }
                        name.push(n);
                    }
                    if !closed {
                        return Err(TemplateError::Unclosed(pos));
                    }
                    if !(name.is_empty() || name == "0") {
                        return Err(TemplateError::UnsupportedPlaceholder(name));
                    }
                    if !literal.is_empty() {
                        parts.push(Part::Literal(std::mem::take(&mut literal)));
                    }
                    parts.push(Part::Message);
                }
                '}' => {
                    if chars.next_if(|&(_, n)| n == '}').is_none() {
                        return Err(TemplateError::UnmatchedClose(pos));
                    }
                    literal.push('}');
                }
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            parts,
        })
    }

    /// Substitute `message` into every slot.
    pub fn render(&self, message: &str) -> String {
        let mut out = String::with_capacity(self.source.len() + message.len());
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Message => out.push_str(message),
            }
        }
        out
    }

    /// The template as written in the configuration.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::parse(s)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_and_bare_slots() {
        let t = Template::parse("Alert: {0}").unwrap();
        assert_eq!(t.render("disk full"), "Alert: disk full");
        let t = Template::parse("[{}] again: {0}").unwrap();
        assert_eq!(t.render("x"), "[x] again: x");
    }

    #[test]
    fn escaped_braces_are_literal() {
        let t = Template::parse("{{json}} {}").unwrap();
        assert_eq!(t.render("msg"), "{json} msg");
    }

    #[test]
    fn template_without_slot_renders_verbatim() {
        let t = Template::parse("static text").unwrap();
        assert_eq!(t.render("ignored"), "static text");
    }

    #[test]
    fn message_braces_are_not_interpreted() {
        let t = Template::parse("got: {}").unwrap();
        assert_eq!(t.render("{0} }"), "got: {0} }");
    }

    #[test]
    fn rejects_other_placeholders() {
        assert_eq!(
            Template::parse("{1}"),
            Err(TemplateError::UnsupportedPlaceholder("1".to_string()))
        );
        assert_eq!(
            Template::parse("hi {name}"),
            Err(TemplateError::UnsupportedPlaceholder("name".to_string()))
        );
        assert_eq!(Template::parse("oops {0"), Err(TemplateError::Unclosed(5)));
        assert_eq!(Template::parse("a } b"), Err(TemplateError::UnmatchedClose(2)));
    }

    #[test]
    fn error_messages_show_braces() {
        let err = Template::parse("{x}").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported placeholder '{x}', only '{}' or '{0}' are allowed"
        );
    }
}
