//! Static HTML rendering used by the `export_html` binary.
use std::fmt::Write;
use std::path::PathBuf;

use super::{yes_no, DetailView, GridCard, ListRow};
use crate::model::Launch;
use crate::pipeline::{Criteria, FilterSummary};
use crate::route::Route;

/// File that serves `route` when the export directory is the web root.
/// Launch ids that are not plain path segments get no file.
pub fn output_path(route: &Route) -> Option<PathBuf> {
    let path = match route {
        Route::Home => PathBuf::from("index.html"),
        Route::Grid => PathBuf::from("grid").join("index.html"),
        Route::GridFilter => PathBuf::from("grid-filter").join("index.html"),
        Route::List => PathBuf::from("list").join("index.html"),
        Route::Launch(id) => {
            let plain = !id.is_empty()
                && id
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if !plain {
                return None;
            }
            PathBuf::from("launch").join(id).join("index.html")
        }
    };
    Some(path)
}

pub fn document(title: &str, current: &Route, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{}</title>
    <link rel="stylesheet" href="/static/style.css">
  </head>
  <body>
    {}
    <main>
      {}
    </main>
  </body>
</html>"#,
        html_escape(title),
        nav(current),
        body
    )
}

pub fn nav(current: &Route) -> String {
    let mut out = String::from("<nav>");
    for (route, label) in Route::NAV.iter() {
        let class = if route == current { " class=\"current\"" } else { "" };
        let _ = write!(
            out,
            "<a href=\"{}\"{}>{}</a>",
            html_attr(&route.path()),
            class,
            html_escape(label)
        );
    }
    out.push_str("</nav>");
    out
}

pub fn grid_card(card: &GridCard<'_>) -> String {
    let l = card.launch;
    let mut out = String::from("<div class=\"card\">");
    if let Some(patch) = l.patch_small() {
        let _ = write!(
            out,
            "<img src=\"{}\" alt=\"{}\" />",
            html_attr(patch),
            html_attr(if l.name.is_empty() { "Launch Image" } else { l.name.as_str() })
        );
    }
    // The stretched title link makes the whole card clickable.
    let _ = write!(
        out,
        "<h3><a class=\"stretched\" href=\"{}\">{}</a></h3>",
        html_attr(&card.target().path()),
        html_escape(l.display_name())
    );
    outcome_badge(&mut out, l);
    let _ = write!(out, "<p class=\"date\">Date: {}</p>", html_escape(&l.formatted_date()));
    if let Some(text) = l.details_text() {
        details(&mut out, text, card.details);
    }
    webcast(&mut out, l);
    out.push_str("</div>\n");
    out
}

pub fn list_row(row: &ListRow<'_>) -> String {
    let l = row.launch;
    let mut out = String::from("<li class=\"row\">");
    if let Some(patch) = l.patch_small() {
        let _ = write!(
            out,
            "<img class=\"thumb\" src=\"{}\" alt=\"{}\" />",
            html_attr(patch),
            html_attr(&l.name)
        );
    }
    out.push_str("<div class=\"info\"><div class=\"head\">");
    let _ = write!(out, "<h3>{}</h3>", html_escape(&l.name));
    outcome_badge(&mut out, l);
    out.push_str("</div>");
    let _ = write!(
        out,
        "<div class=\"meta\"><span>Date: {}</span><span>Rocket ID: {}</span><span>Launchpad ID: {}</span></div>",
        html_escape(&l.formatted_date()),
        html_escape(l.rocket.as_deref().unwrap_or("")),
        html_escape(l.launchpad.as_deref().unwrap_or(""))
    );
    if let Some(text) = l.details_text() {
        details(&mut out, text, row.details);
    }
    webcast(&mut out, l);
    out.push_str("</div></li>\n");
    out
}

pub fn detail(view: &DetailView<'_>) -> String {
    let mut out = format!(
        "<a class=\"back\" href=\"{}\">&larr; Back to Grid</a>",
        html_attr(&view.back().path())
    );
    let Some(l) = view.launch else {
        out.push_str("<p>No launch found.</p>");
        return out;
    };
    let _ = write!(out, "<h1>{}</h1>", html_escape(l.display_name()));
    let _ = write!(
        out,
        "<p class=\"status\" style=\"color: {}\">{}</p>",
        l.outcome().color(),
        l.outcome()
    );
    let _ = write!(out, "<p class=\"date\">Date: {}</p>", html_escape(&l.formatted_date()));
    if let Some(text) = l.details_text() {
        let _ = write!(out, "<p class=\"details\">{}</p>", html_escape(text));
    }

    out.push_str("<div class=\"images\">");
    for src in l.patch_small().into_iter().chain(l.patch_large()) {
        let _ = write!(
            out,
            "<img class=\"patch\" src=\"{}\" alt=\"{}\" />",
            html_attr(src),
            html_attr(l.display_name())
        );
    }
    for (i, src) in l.flickr_images().iter().enumerate() {
        let _ = write!(
            out,
            "<img class=\"photo\" src=\"{}\" alt=\"{} image {}\" />",
            html_attr(src),
            html_attr(&l.name),
            i + 1
        );
    }
    out.push_str("</div>");

    out.push_str("<div class=\"links\">");
    for (label, url) in [
        ("Watch Webcast", l.webcast()),
        ("Wikipedia", l.wikipedia()),
        ("Read Article", l.article()),
    ] {
        if let Some(url) = url {
            let _ = write!(
                out,
                "<p><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></p>",
                html_attr(url),
                label
            );
        }
    }
    out.push_str("</div>");

    out.push_str("<div class=\"metadata\">");
    let _ = write!(
        out,
        "<p><strong>Flight Number:</strong> {}</p>",
        l.flight_number.map(|n| n.to_string()).unwrap_or_default()
    );
    let _ = write!(
        out,
        "<p><strong>Upcoming:</strong> {}</p>",
        yes_no(l.upcoming.unwrap_or(false))
    );
    let _ = write!(
        out,
        "<p><strong>Capsule Reused:</strong> {}</p>",
        yes_no(l.any_core_reused())
    );
    if let Some(rocket) = l.rocket.as_deref() {
        let _ = write!(out, "<p><strong>Rocket ID:</strong> {}</p>", html_escape(rocket));
    }
    if let Some(pad) = l.launchpad.as_deref() {
        let _ = write!(out, "<p><strong>Launchpad ID:</strong> {}</p>", html_escape(pad));
    }
    out.push_str("</div>");
    out
}

/// Read-only summary of the criteria the page was exported with.
pub fn criteria_note(criteria: &Criteria, summary: FilterSummary) -> String {
    let mut parts = vec![format!("status: {}", criteria.outcome)];
    if !criteria.search.trim().is_empty() {
        parts.insert(0, format!("search: &quot;{}&quot;", html_escape(&criteria.search)));
    }
    if criteria.scope == crate::pipeline::SearchScope::Everything {
        parts.push(format!("rocket: {}", html_escape(&criteria.rocket.to_string())));
        parts.push(format!("launchpad: {}", html_escape(&criteria.launchpad.to_string())));
    }
    if let Some(sort) = criteria.sort {
        parts.push(format!("sort: {}", html_escape(sort.label())));
    }
    format!(
        "<p class=\"hint\">{} <span class=\"criteria\">({})</span></p>",
        summary,
        parts.join(", ")
    )
}

fn outcome_badge(out: &mut String, l: &Launch) {
    let _ = write!(
        out,
        "<span class=\"status\" style=\"color: {}\">{}</span>",
        l.outcome().color(),
        l.outcome()
    );
}

fn webcast(out: &mut String, l: &Launch) {
    if let Some(url) = l.webcast() {
        let _ = write!(
            out,
            "<a class=\"webcast\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Watch Webcast</a>",
            html_attr(url)
        );
    }
}

/// Collapsed text inline; the full text sits behind a `<details>` control
/// that is layered above the card link so opening it does not navigate.
fn details(out: &mut String, text: &str, toggle: super::DetailsToggle) {
    if !toggle.applies_to(text) {
        let _ = write!(out, "<p class=\"details\">{}</p>", html_escape(text));
        return;
    }
    let open = if toggle.expanded { " open" } else { "" };
    let _ = write!(
        out,
        "<details class=\"more\"{}><summary><span class=\"short\">{}</span> <span class=\"control\"></span></summary><p class=\"details\">{}</p></details>",
        open,
        html_escape(&super::truncate(text, toggle.budget)),
        html_escape(text)
    );
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn html_attr(s: &str) -> String {
    html_escape(s).replace('"', "&quot;")
}

pub const DEFAULT_STYLE: &str = r#"
:root {
  color-scheme: light dark;
  --fg: #222;
  --bg: #fff;
  --muted: #555;
  --card: #fff;
  --border: #e1e4e8;
  --link: #1da1f2;
}

@media (prefers-color-scheme: dark) {
  :root {
    --fg: #eee;
    --bg: #121212;
    --muted: #aaa;
    --card: #1c1c1c;
    --border: #333;
  }
}

html,
body {
  margin: 0;
  padding: 0;
  background: var(--bg);
  color: var(--fg);
  font: 14px/1.6 -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto,
        'Helvetica Neue', Arial, 'Noto Sans', sans-serif;
}

nav {
  display: flex;
  gap: 1rem;
  padding: 1rem;
  background: #f0f0f0;
}

nav a.current {
  font-weight: 600;
}

main {
  padding: 1rem;
  max-width: 1200px;
  margin: 0 auto;
}

a {
  color: var(--link);
  text-decoration: none;
}

.hint {
  color: var(--muted);
}

.grid {
  columns: 4 240px;
  column-gap: 1rem;
}

.card {
  position: relative;
  break-inside: avoid;
  margin-bottom: 1rem;
  border: 1px solid var(--border);
  border-radius: 8px;
  padding: 1rem;
  background: var(--card);
  box-shadow: 0 1px 3px rgba(0, 0, 0, 0.08);
  display: flex;
  flex-direction: column;
}

.card img {
  width: 100%;
  object-fit: contain;
  border-radius: 8px;
  margin-bottom: 0.5rem;
}

.card h3 {
  margin: 0;
  font-size: 1.1rem;
}

.card a.stretched {
  color: inherit;
}

.card a.stretched::after {
  content: "";
  position: absolute;
  inset: 0;
}

.card details,
.card a.webcast {
  position: relative;
  z-index: 1;
}

.status {
  font-weight: 600;
  font-size: 0.85rem;
}

.date,
.meta {
  color: var(--muted);
  font-size: 0.85rem;
}

.meta span {
  margin-right: 1rem;
}

ul.list {
  list-style: none;
  padding: 0;
}

.row {
  display: flex;
  gap: 1rem;
  border: 1px solid var(--border);
  border-radius: 8px;
  padding: 1rem;
  margin-bottom: 0.75rem;
  background: var(--card);
}

.row img.thumb {
  width: 80px;
  height: 80px;
  object-fit: contain;
  flex-shrink: 0;
}

.row .info {
  flex: 1;
}

.row .head {
  display: flex;
  justify-content: space-between;
  align-items: center;
}

.row h3 {
  margin: 0;
}

details.more summary {
  list-style: none;
  cursor: pointer;
}

details.more summary .control::after {
  content: "See More";
  color: var(--link);
  font-weight: 600;
}

details.more[open] summary .short {
  display: none;
}

details.more[open] summary .control::after {
  content: "See Less";
}

.images {
  display: flex;
  flex-wrap: wrap;
  gap: 1rem;
  margin-top: 1rem;
}

.images img.patch {
  width: 150px;
  border-radius: 8px;
}

.images img.photo {
  width: 200px;
  border-radius: 8px;
}

.metadata {
  margin-top: 2rem;
  color: var(--muted);
}
"#;
