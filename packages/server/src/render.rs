//! Server-side rendering of the single-page app shell.
//!
//! The shell is an HTML document with two placeholders: one for the
//! pre-rendered markup and one for the JSON payload the client picks up on
//! boot. Both are filled by plain substitution.

use std::fmt::Write as _;
use std::path::Path;

use common::ImageRecord;
use thiserror::Error;

/// Replaced by the pre-rendered markup.
pub const MARKUP_PLACEHOLDER: &str = "<!--app-markup-->";
/// Replaced by the JSON payload.
pub const DATA_PLACEHOLDER: &str = "__APP_DATA__";

const DEFAULT_SHELL: &str = include_str!("../assets/shell.html");

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read shell template {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("shell template is missing the {0} placeholder")]
    MissingPlaceholder(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Text(String),
    Markup,
    Data,
}

/// A parsed shell template, ready to render many times.
#[derive(Debug, Clone)]
pub struct ShellTemplate {
    pieces: Vec<Piece>,
}

impl ShellTemplate {
    /// The shell compiled into the binary.
    pub fn embedded() -> Result<Self, TemplateError> {
        Self::parse(DEFAULT_SHELL)
    }

    pub fn load(path: Option<&Path>) -> Result<Self, TemplateError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::embedded(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let source = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&source)
    }

    /// Split the template at its placeholders. Each must occur at least
    /// once; every occurrence is substituted.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut pieces = Vec::new();
        let mut seen_markup = false;
        let mut seen_data = false;
        let mut rest = source;

        loop {
            let next_markup = rest.find(MARKUP_PLACEHOLDER);
            let next_data = rest.find(DATA_PLACEHOLDER);
            let (pos, piece, len) = match (next_markup, next_data) {
                (Some(m), Some(d)) if m < d => (m, Piece::Markup, MARKUP_PLACEHOLDER.len()),
                (_, Some(d)) => (d, Piece::Data, DATA_PLACEHOLDER.len()),
                (Some(m), None) => (m, Piece::Markup, MARKUP_PLACEHOLDER.len()),
                (None, None) => break,
            };

            if pos > 0 {
                pieces.push(Piece::Text(rest[..pos].to_string()));
            }
            match piece {
                Piece::Markup => seen_markup = true,
                Piece::Data => seen_data = true,
                Piece::Text(_) => {}
            }
            pieces.push(piece);
            rest = &rest[pos + len..];
        }
        if !rest.is_empty() {
            pieces.push(Piece::Text(rest.to_string()));
        }

        if !seen_markup {
            return Err(TemplateError::MissingPlaceholder(MARKUP_PLACEHOLDER));
        }
        if !seen_data {
            return Err(TemplateError::MissingPlaceholder(DATA_PLACEHOLDER));
        }
        Ok(Self { pieces })
    }

    /// Fill both placeholders. Substituted text is never re-scanned, so
    /// captions containing a placeholder token stay literal.
    pub fn render(&self, markup: &str, data: &str) -> String {
        let mut html = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Text(text) => html.push_str(text),
                Piece::Markup => html.push_str(markup),
                Piece::Data => html.push_str(data),
            }
        }
        html
    }
}

/// JSON payload for the page: the lookup result, or `""` when nothing was
/// found. Characters that could end the surrounding `<script>` are escaped.
pub fn data_payload(records: Option<&[ImageRecord]>) -> String {
    let json = match records {
        Some(records) => serde_json::to_string(records),
        None => serde_json::to_string(""),
    }
    .unwrap_or_else(|_| "\"\"".to_string());

    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

/// Pre-rendered markup for the app root.
pub fn render_markup(item: Option<&str>, records: Option<&[ImageRecord]>) -> String {
    let mut html = String::new();
    match item {
        Some(item) => {
            let _ = write!(
                html,
                r#"<main class="work" data-work="{}">"#,
                escape_html(item)
            );
            for record in records.unwrap_or_default() {
                render_figure(&mut html, record);
            }
            html.push_str("</main>");
        }
        None => html.push_str(r#"<main class="app"></main>"#),
    }
    html
}

fn render_figure(html: &mut String, record: &ImageRecord) {
    let _ = write!(
        html,
        r#"<figure class="work-item"><img src="{}" alt="{}" loading="lazy">"#,
        escape_html(&record.url),
        escape_html(&record.file_name)
    );
    if !record.text.is_empty() {
        let _ = write!(html, "<figcaption>{}</figcaption>", escape_html(&record.text));
    }
    html.push_str("</figure>");
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
