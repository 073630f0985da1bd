//! Server-rendered HTML views.
//!
//! Kept deliberately small: one shell template and a handful of fragment
//! builders assembled with `format!`. User-supplied text goes through
//! [`escape_html`] everywhere except page bodies, which are produced by the
//! markdown renderer.

use crate::types::{Page, Revision};

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

fn page_href(slug: &str) -> String {
    format!("/page/{}", urlencoding::encode(slug))
}

/// Wrap a body fragment in the HTML shell shared by every view.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{title} - Wicket</title></head><body>\
         <header><nav><a href=\"/\">All pages</a> | <a href=\"/create\">New page</a>\
         <form action=\"/search\" method=\"get\" style=\"display:inline\">\
         <input type=\"search\" name=\"q\" placeholder=\"Search\">\
         <button type=\"submit\">Search</button></form></nav></header>\
         <main>{body}</main></body></html>",
        title = escape_html(title),
        body = body,
    )
}

fn page_list_items(pages: &[Page]) -> String {
    let mut items = String::new();
    for page in pages {
        items.push_str(&format!(
            "<li><a href=\"{href}\">{title}</a> <small>updated {updated}</small></li>",
            href = page_href(&page.slug),
            title = escape_html(&page.title),
            updated = page.updated_at.format("%Y-%m-%d %H:%M"),
        ));
    }
    items
}

/// The front page: every page, most recently updated first.
pub fn index(pages: &[Page]) -> String {
    let body = if pages.is_empty() {
        "<h1>Notes</h1><p>No pages yet. <a href=\"/create\">Create the first one.</a></p>"
            .to_string()
    } else {
        format!("<h1>Notes</h1><ul>{}</ul>", page_list_items(pages))
    };
    layout("Notes", &body)
}

/// Search results, reusing the list layout and echoing the query.
pub fn search_results(query: &str, pages: &[Page]) -> String {
    let heading = format!("Results for '{query}'");
    let list = if pages.is_empty() {
        "<p>No pages matched.</p>".to_string()
    } else {
        format!("<ul>{}</ul>", page_list_items(pages))
    };
    let body = format!("<h1>{}</h1>{list}", escape_html(&heading));
    layout(&heading, &body)
}

/// A rendered page with its edit/delete/history controls.
pub fn page(page: &Page, rendered: &str, revision_count: usize) -> String {
    let slug = urlencoding::encode(&page.slug);
    let history_link = if revision_count > 0 {
        format!(
            "<a href=\"/history/{slug}\">History ({revision_count} \
             revision{s})</a>",
            s = if revision_count == 1 { "" } else { "s" },
        )
    } else {
        String::new()
    };
    let body = format!(
        "<article><h1>{title}</h1>{rendered}</article>\
         <footer><a href=\"/edit/{slug}\">Edit</a> {history_link}\
         <form action=\"/delete/{slug}\" method=\"post\" style=\"display:inline\">\
         <button type=\"submit\">Delete</button></form></footer>",
        title = escape_html(&page.title),
    );
    layout(&page.title, &body)
}

/// A historical snapshot, rendered like a page but clearly marked.
pub fn revision(page: &Page, revision: &Revision, rendered: &str) -> String {
    let title = format!("Revision #{} of {}", revision.id, page.title);
    let body = format!(
        "<p><em>Snapshot from {taken}. \
         <a href=\"{current}\">Back to current version</a></em></p>\
         <article><h1>{heading}</h1>{rendered}</article>",
        taken = revision.created_at.format("%Y-%m-%d %H:%M"),
        current = page_href(&page.slug),
        heading = escape_html(&title),
    );
    layout(&title, &body)
}

/// The shared editor form: empty for create, pre-filled for edit.
pub fn editor(heading: &str, action: &str, title: &str, content: &str) -> String {
    let body = format!(
        "<h1>{heading}</h1>\
         <form action=\"{action}\" method=\"post\">\
         <p><input type=\"text\" name=\"title\" value=\"{title}\" \
         placeholder=\"Title\" required></p>\
         <p><textarea name=\"content\" rows=\"20\" cols=\"80\" \
         placeholder=\"Write markdown here\">{content}</textarea></p>\
         <p><button type=\"submit\">Save</button></p></form>",
        heading = escape_html(heading),
        action = action,
        title = escape_html(title),
        content = escape_html(content),
    );
    layout(heading, &body)
}

/// Revision list for a page, newest first.
pub fn history(page: &Page, revisions: &[Revision]) -> String {
    let slug = urlencoding::encode(&page.slug);
    let heading = format!("History of {}", page.title);
    let list = if revisions.is_empty() {
        "<p>No revisions yet. History begins with the first edit that changes \
         the content.</p>"
            .to_string()
    } else {
        let mut items = String::new();
        for rev in revisions {
            items.push_str(&format!(
                "<li><a href=\"/history/{slug}/{id}\">Revision #{id}</a> \
                 <small>{taken}</small></li>",
                id = rev.id,
                taken = rev.created_at.format("%Y-%m-%d %H:%M"),
            ));
        }
        format!("<ul>{items}</ul>")
    };
    let body = format!(
        "<h1>{heading}</h1>{list}<p><a href=\"{back}\">Back to page</a></p>",
        heading = escape_html(&heading),
        back = page_href(&page.slug),
    );
    layout(&heading, &body)
}
