//! Static site export: every dashboard page rendered to HTML files.
use anyhow::{anyhow, Context, Result};
use std::path::Path;
use tracing::{info, warn};

use crate::cli::CriteriaArgs;
use crate::config::Config;
use crate::fetch::LaunchSource;
use crate::model::Launch;
use crate::pages::{self, ListData};
use crate::pipeline::{self, Criteria, FilterSummary, OutcomeFilter};
use crate::reference::ReferenceIndex;
use crate::render::html::{self, DEFAULT_STYLE};
use crate::render::{DetailView, DetailsToggle, GridCard, ListRow};
use crate::route::Route;
use crate::state::PageState;

/// Fetch everything once and write the site under `out_dir`.
/// Returns the number of pages written.
pub async fn export_site(
    source: &dyn LaunchSource,
    cfg: &Config,
    flags: &CriteriaArgs,
    out_dir: &Path,
) -> Result<usize> {
    let data = match pages::load_list(source).await {
        PageState::Ready(data) => data,
        PageState::Failed(msg) => return Err(anyhow!(msg)),
        PageState::Idle | PageState::Loading => return Err(anyhow!("launch data never settled")),
    };
    write_site(out_dir, cfg, &data, flags).await
}

async fn write_site(out_dir: &Path, cfg: &Config, data: &ListData, flags: &CriteriaArgs) -> Result<usize> {
    let mut written = 0;

    let home = html::document(
        "SpaceX Launches",
        &Route::Home,
        "<p class=\"hint\">Pick a view above.</p>",
    );
    write_page(out_dir, &Route::Home, home).await?;
    written += 1;

    let cards = |launches: &[&Launch]| -> String {
        launches
            .iter()
            .map(|l| html::grid_card(&GridCard::new(l, DetailsToggle::collapsed(cfg.view.card_details_budget))))
            .collect()
    };

    let all: Vec<_> = data.launches.iter().collect();
    let grid = format!(
        "<h2>Grid View - SpaceX Launches</h2><div class=\"grid\">{}</div>",
        cards(&all)
    );
    write_page(out_dir, &Route::Grid, html::document("Grid View", &Route::Grid, &grid)).await?;
    written += 1;

    // The filterable grid only offers search and outcome.
    let mut grid_criteria = Criteria::grid_filter();
    if let Some(term) = &flags.search {
        grid_criteria = grid_criteria.with_search(term.clone());
    }
    if let Some(outcome) = flags.outcome {
        grid_criteria = grid_criteria.with_outcome(outcome);
    }
    let filtered = pipeline::apply(&data.launches, &ReferenceIndex::default(), &grid_criteria);
    let grid_filter = format!(
        "<h2>Grid View with Filters</h2>{}<div class=\"grid\">{}</div>",
        html::criteria_note(
            &grid_criteria,
            FilterSummary {
                shown: filtered.len(),
                total: data.launches.len()
            }
        ),
        cards(&filtered)
    );
    write_page(
        out_dir,
        &Route::GridFilter,
        html::document("Grid with Filter", &Route::GridFilter, &grid_filter),
    )
    .await?;
    written += 1;

    // The list view has no pending option; that filter stays on the grid.
    let mut list_criteria = flags.apply(Criteria::default());
    if list_criteria.outcome == OutcomeFilter::Pending {
        warn!("pending outcome applies to the filterable grid only; list page shows all outcomes");
        list_criteria = list_criteria.with_outcome(OutcomeFilter::All);
    }
    let visible = pipeline::apply(&data.launches, &data.refs, &list_criteria);
    let rows: String = visible
        .iter()
        .map(|l| html::list_row(&ListRow::new(l, DetailsToggle::collapsed(cfg.view.row_details_budget))))
        .collect();
    let list = format!(
        "<h2>List View - SpaceX Launches</h2>{}<ul class=\"list\">{}</ul>",
        html::criteria_note(
            &list_criteria,
            FilterSummary {
                shown: visible.len(),
                total: data.launches.len()
            }
        ),
        rows
    );
    write_page(out_dir, &Route::List, html::document("List View", &Route::List, &list)).await?;
    written += 1;

    for launch in &data.launches {
        let route = Route::Launch(launch.id.clone());
        let body = html::detail(&DetailView::new(Some(launch)));
        let page = html::document(launch.display_name(), &route, &body);
        if write_page(out_dir, &route, page).await? {
            written += 1;
        }
    }

    let static_dir = out_dir.join("static");
    tokio::fs::create_dir_all(&static_dir)
        .await
        .with_context(|| format!("failed to create {}", static_dir.display()))?;
    let css_path = static_dir.join("style.css");
    tokio::fs::write(&css_path, DEFAULT_STYLE)
        .await
        .with_context(|| format!("failed to write {}", css_path.display()))?;

    info!(pages = written, out_dir = %out_dir.display(), "site exported");
    Ok(written)
}

/// Returns `false` when the route has no safe file name.
async fn write_page(out_dir: &Path, route: &Route, content: String) -> Result<bool> {
    let Some(rel) = html::output_path(route) else {
        warn!(%route, "skipping page with unsafe path");
        return Ok(false);
    };
    let path = out_dir.join(rel);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    tokio::fs::write(&path, content)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}

