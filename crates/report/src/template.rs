use crate::error::{ReportError, Result};
use std::path::Path;

const COMPONENT_TEMPLATE: &str = include_str!("../templates/one_graph.html");
const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Which page a template renders; decides the placeholders it may use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Component,
    Index,
}

impl TemplateKind {
    #[must_use]
    pub const fn placeholders(self) -> &'static [&'static str] {
        match self {
            Self::Component => &["title", "stylesheet", "renderer", "nodes", "edges", "codes"],
            Self::Index => &["title", "stylesheet", "rows"],
        }
    }

    const fn builtin(self) -> &'static str {
        match self {
            Self::Component => COMPONENT_TEMPLATE,
            Self::Index => INDEX_TEMPLATE,
        }
    }
}

/// Page template with `{name}` placeholders; `{{` and `}}` are literal braces
#[derive(Debug, Clone)]
pub struct PageTemplate {
    kind: TemplateKind,
    source: String,
}

impl PageTemplate {
    pub fn builtin(kind: TemplateKind) -> Self {
        Self {
            kind,
            source: kind.builtin().to_string(),
        }
    }

    pub fn parse(kind: TemplateKind, source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        for name in extract_placeholders(&source)? {
            if !kind.placeholders().contains(&name.trim()) {
                return Err(ReportError::template(format!(
                    "unsupported placeholder '{{{name}}}'. Allowed: {}",
                    kind.placeholders().join(", ")
                )));
            }
        }
        Ok(Self { kind, source })
    }

    /// Load from `path`, or fall back to the built-in template
    pub fn load(kind: TemplateKind, path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let source =
                    std::fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
                Self::parse(kind, source)
            }
            None => Ok(Self::builtin(kind)),
        }
    }

    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    /// Substitute placeholders; unresolved names render as empty text
    pub fn render<'a>(&self, mut resolve: impl FnMut(&str) -> Option<&'a str>) -> Result<String> {
        let mut out = String::with_capacity(self.source.len());
        let mut chars = self.source.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '{' => {
                    if matches!(chars.peek(), Some('{')) {
                        let _ = chars.next();
                        out.push('{');
                        continue;
                    }
                    let name = read_placeholder(&mut chars)?;
                    out.push_str(resolve(name.trim()).unwrap_or(""));
                }
                '}' => {
                    if matches!(chars.peek(), Some('}')) {
                        let _ = chars.next();
                        out.push('}');
                        continue;
                    }
                    return Err(ReportError::template("stray '}'"));
                }
                _ => out.push(ch),
            }
        }
        Ok(out)
    }
}

fn read_placeholder(chars: &mut impl Iterator<Item = char>) -> Result<String> {
    let mut name = String::new();
    loop {
        match chars.next() {
            Some('}') => break,
            Some('{') => {
                return Err(ReportError::template("nested '{' inside placeholder"));
            }
            Some(c) => name.push(c),
            None => return Err(ReportError::template("unterminated '{...}' placeholder")),
        }
    }
    if name.trim().is_empty() {
        return Err(ReportError::template("empty placeholder '{}'"));
    }
    Ok(name)
}

fn extract_placeholders(template: &str) -> Result<Vec<String>> {
    let mut placeholders = Vec::new();
    let mut chars = template.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '{' => {
                if matches!(chars.peek(), Some('{')) {
                    let _ = chars.next();
                    continue;
                }
                placeholders.push(read_placeholder(&mut chars)?);
            }
            '}' => {
                if matches!(chars.peek(), Some('}')) {
                    let _ = chars.next();
                    continue;
                }
                return Err(ReportError::template("stray '}'"));
            }
            _ => {}
        }
    }
    Ok(placeholders)
}
