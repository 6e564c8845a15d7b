//! Display-ready search records.

use crate::search::HitKind;
use serde::Serialize;
use std::fmt::{self, Write as _};

/// One formatted search result.
///
/// Highlighted fields contain `<mark>` spans around query terms. The summary
/// has been sanitized so the only markup besides highlights is `<code>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRecord {
    pub kind: HitKind,
    /// Scope prefix (`#` or `.`) shown before the title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<&'static str>,
    /// Highlighted member name, or highlighted full name for types.
    pub title: String,
    /// Highlighted argument string, when the entity has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,
    /// Highlighted full name of the owning type; absent for type records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Navigable address: resolved base path plus stored link.
    pub url: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl DisplayRecord {
    /// Title markup as rendered in a documentation page's result list:
    /// `<strong><b>#</b>name</strong><span class="args">(...)</span>`.
    pub fn title_html(&self) -> String {
        let mut html = String::from("<strong>");
        if let Some(prefix) = self.prefix {
            html.push_str("<b>");
            html.push_str(prefix);
            html.push_str("</b>");
        }
        html.push_str(&self.title);
        html.push_str("</strong>");
        if let Some(args) = &self.args {
            html.push_str("<span class=\"args\">");
            html.push_str(args);
            html.push_str("</span>");
        }
        html
    }

    /// Hover text for the result link.
    pub fn link_title(&self) -> String {
        format!("{} docs page", self.full_name)
    }

    /// Plain-text rendering with all markup removed, for terminals and tool output.
    pub fn write_text(&self, out: &mut String) -> fmt::Result {
        write!(out, "{}", self.prefix.unwrap_or(""))?;
        write!(out, "{}", strip_markup(&self.title))?;
        if let Some(args) = &self.args {
            write!(out, "{}", strip_markup(args))?;
        }
        match (&self.type_kind, &self.value) {
            (Some(kind), _) => write!(out, " ({kind})")?,
            (None, Some(value)) => write!(out, " = {value}")?,
            (None, None) => {}
        }
        writeln!(out)?;

        if let Some(owner) = &self.owner {
            writeln!(out, "   in {}", strip_markup(owner))?;
        }
        if let Some(summary) = &self.summary {
            let summary = strip_markup(summary);
            if !summary.trim().is_empty() {
                writeln!(out, "   {}", summary.trim())?;
            }
        }
        writeln!(out, "   {}", self.url)
    }
}

impl fmt::Display for DisplayRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut text = String::new();
        self.write_text(&mut text)?;
        f.write_str(text.trim_end())
    }
}

/// Drop every markup tag, keeping only text.
fn strip_markup(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}
