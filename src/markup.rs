//! Markdown-to-HTML rendering for page bodies.

use pulldown_cmark::{Options, Parser, html};

/// Render markdown into an HTML fragment.
///
/// Best-effort: arbitrary user text, including malformed markup, always
/// produces some output. Pure — no I/O, no network.
pub fn render_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(text, options);
    let mut out = String::with_capacity(text.len() * 2);
    html::push_html(&mut out, parser);
    out
}
