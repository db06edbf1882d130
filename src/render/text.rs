//! Plain-text rendering for the terminal.
use std::fmt::Write;

use super::{yes_no, DetailView, GridCard, ListRow};
use crate::pipeline::{Criteria, FilterSummary, SearchScope};
use crate::reference::ReferenceIndex;
use crate::route::Route;

pub fn nav(current: &Route) -> String {
    let mut out = String::new();
    for (route, label) in Route::NAV.iter() {
        let marker = if route == current { "*" } else { " " };
        let _ = write!(out, "{}{} ({})  ", marker, label, route.path());
    }
    out.trim_end().to_string()
}

pub fn grid_card(n: usize, card: &GridCard<'_>) -> String {
    let l = card.launch;
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}  <{}>", n, l.display_name(), l.outcome());
    if let Some(patch) = l.patch_small() {
        let _ = writeln!(out, "    Patch: {}", patch);
    }
    let _ = writeln!(out, "    Date: {}", l.formatted_date());
    if let Some(text) = l.details_text() {
        details(&mut out, text, card.details);
    }
    if let Some(webcast) = l.webcast() {
        let _ = writeln!(out, "    Watch Webcast: {}", webcast);
    }
    let _ = writeln!(out, "    -> {}", card.target());
    out
}

pub fn list_row(n: usize, row: &ListRow<'_>) -> String {
    let l = row.launch;
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}  <{}>", n, l.name, l.outcome());
    let _ = writeln!(
        out,
        "    Date: {} | Rocket ID: {} | Launchpad ID: {}",
        l.formatted_date(),
        l.rocket.as_deref().unwrap_or(""),
        l.launchpad.as_deref().unwrap_or("")
    );
    if let Some(text) = l.details_text() {
        details(&mut out, text, row.details);
    }
    if let Some(webcast) = l.webcast() {
        let _ = writeln!(out, "    Watch Webcast: {}", webcast);
    }
    out
}

fn details(out: &mut String, text: &str, toggle: super::DetailsToggle) {
    let _ = write!(out, "    {}", toggle.visible(text));
    if toggle.applies_to(text) {
        let _ = write!(out, " [{}]", toggle.label());
    }
    out.push('\n');
}

pub fn detail(view: &DetailView<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<- Back to Grid ({})", view.back());
    let Some(l) = view.launch else {
        out.push_str("No launch found.\n");
        return out;
    };
    let _ = writeln!(out, "\n{}", l.display_name());
    let _ = writeln!(out, "{}", l.outcome());
    let _ = writeln!(out, "Date: {}", l.formatted_date());
    if let Some(text) = l.details_text() {
        let _ = writeln!(out, "\n{}", text);
    }

    let mut images: Vec<&str> = Vec::new();
    images.extend(l.patch_small());
    images.extend(l.patch_large());
    images.extend(l.flickr_images().iter().map(String::as_str));
    if !images.is_empty() {
        out.push_str("\nImages:\n");
        for img in images {
            let _ = writeln!(out, "  {}", img);
        }
    }

    let links = [
        ("Watch Webcast", l.webcast()),
        ("Wikipedia", l.wikipedia()),
        ("Read Article", l.article()),
    ];
    if links.iter().any(|(_, url)| url.is_some()) {
        out.push('\n');
        for (label, url) in links {
            if let Some(url) = url {
                let _ = writeln!(out, "{}: {}", label, url);
            }
        }
    }

    out.push('\n');
    let _ = writeln!(
        out,
        "Flight Number: {}",
        l.flight_number.map(|n| n.to_string()).unwrap_or_default()
    );
    let _ = writeln!(out, "Upcoming: {}", yes_no(l.upcoming.unwrap_or(false)));
    let _ = writeln!(out, "Capsule Reused: {}", yes_no(l.any_core_reused()));
    if let Some(rocket) = l.rocket.as_deref() {
        let _ = writeln!(out, "Rocket ID: {}", rocket);
    }
    if let Some(pad) = l.launchpad.as_deref() {
        let _ = writeln!(out, "Launchpad ID: {}", pad);
    }
    out
}

/// Current criteria plus the options each facet accepts.
pub fn filter_bar(criteria: &Criteria, refs: Option<&ReferenceIndex>) -> String {
    let mut out = String::new();
    let search = if criteria.search.is_empty() {
        "(none)"
    } else {
        criteria.search.as_str()
    };
    let _ = write!(out, "Search: {} | Status: {}", search, criteria.outcome);
    if criteria.scope == SearchScope::Everything {
        let _ = write!(
            out,
            " | Rocket: {} | Launchpad: {}",
            criteria.rocket, criteria.launchpad
        );
    }
    if let Some(sort) = criteria.sort {
        let _ = write!(out, " | Sort: {}", sort.label());
    }
    out.push('\n');

    if let Some(refs) = refs {
        if !refs.rockets().is_empty() {
            out.push_str("Rockets:");
            for r in refs.rockets() {
                let _ = write!(out, " {}={}", r.id, r.name);
            }
            out.push('\n');
        }
        if !refs.launchpads().is_empty() {
            out.push_str("Launchpads:");
            for p in refs.launchpads() {
                let _ = write!(out, " {}={}", p.id, p.name);
            }
            out.push('\n');
        }
    }
    out
}

pub fn summary(summary: FilterSummary) -> String {
    format!("{}\n", summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Core, Launch, LaunchLinks, Patch};
    use crate::render::DetailsToggle;

    fn launch() -> Launch {
        Launch {
            id: "abc".into(),
            name: "Crew-1".into(),
            date_utc: "2020-11-16T00:27:00.000Z".into(),
            success: Some(true),
            details: Some("d".repeat(150)),
            links: Some(LaunchLinks {
                patch: Some(Patch {
                    small: Some("https://img/small.png".into()),
                    large: Some("https://img/large.png".into()),
                }),
                webcast: Some("https://youtu.be/x".into()),
                ..Default::default()
            }),
            rocket: Some("r1".into()),
            launchpad: Some("lp1".into()),
            flight_number: Some(107),
            upcoming: Some(false),
            cores: Some(vec![Core { reused: Some(true) }]),
            ..Default::default()
        }
    }

    #[test]
    fn card_shows_truncated_details_and_target() {
        let l = launch();
        let card = GridCard::new(&l, DetailsToggle::collapsed(120));
        let out = grid_card(1, &card);
        assert!(out.starts_with("[1] Crew-1  <Success>"));
        assert!(out.contains(&format!("{}... [See More]", "d".repeat(120))));
        assert!(out.contains("-> /launch/abc"));
        assert!(out.contains("Watch Webcast: https://youtu.be/x"));
    }

    #[test]
    fn row_within_budget_has_no_control() {
        let l = launch();
        let row = ListRow::new(&l, DetailsToggle::collapsed(170));
        let out = list_row(2, &row);
        assert!(out.contains("Rocket ID: r1 | Launchpad ID: lp1"));
        assert!(!out.contains("See More"));
    }

    #[test]
    fn detail_lists_metadata() {
        let l = launch();
        let out = detail(&DetailView::new(Some(&l)));
        assert!(out.contains("Flight Number: 107"));
        assert!(out.contains("Upcoming: No"));
        assert!(out.contains("Capsule Reused: Yes"));
        assert!(out.contains("https://img/large.png"));
        assert!(!out.contains("Wikipedia"));
    }

    #[test]
    fn detail_without_launch() {
        let out = detail(&DetailView::new(None));
        assert!(out.contains("No launch found."));
    }

    #[test]
    fn nav_marks_current_page() {
        let out = nav(&Route::List);
        assert!(out.contains("*List View (/list)"));
        assert!(out.contains(" Grid View (/grid)"));
    }
}
