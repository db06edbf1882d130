//! Per-page data loading. Each page owns its state and fetches when it
//! becomes active; every fetch failure collapses to one static message.
use tracing::{info, instrument, warn};

use crate::fetch::LaunchSource;
use crate::model::Launch;
use crate::reference::ReferenceIndex;
use crate::state::PageState;

pub const FETCH_FAILED: &str = "Failed to fetch data. Try again later.";
pub const DETAIL_FAILED: &str = "Failed to fetch launch details.";

pub const GRID_LOADING: &str = "Loading grid data...";
pub const LIST_LOADING: &str = "Loading launches...";
pub const DETAIL_LOADING: &str = "Loading launch details...";

/// Launches plus the joined reference collections, as the list page needs.
#[derive(Debug, Clone, Default)]
pub struct ListData {
    pub launches: Vec<Launch>,
    pub refs: ReferenceIndex,
}

/// Grid and filterable grid: one launches fetch.
#[instrument(skip_all)]
pub async fn load_launches(source: &dyn LaunchSource) -> PageState<Vec<Launch>> {
    match source.launches().await {
        Ok(launches) => {
            info!(count = launches.len(), "grid data ready");
            PageState::Ready(launches)
        }
        Err(err) => {
            warn!(%err, "failed to load launches");
            PageState::Failed(FETCH_FAILED.to_string())
        }
    }
}

/// List page: launches and the three reference collections, requested
/// concurrently. Runs only after all four settle. A failed reference
/// collection is treated as empty; a failed launches fetch fails the page.
#[instrument(skip_all)]
pub async fn load_list(source: &dyn LaunchSource) -> PageState<ListData> {
    let (launches, rockets, launchpads, payloads) = futures::join!(
        source.launches(),
        source.rockets(),
        source.launchpads(),
        source.payloads()
    );

    let launches = match launches {
        Ok(launches) => launches,
        Err(err) => {
            warn!(%err, "failed to load launches");
            return PageState::Failed(FETCH_FAILED.to_string());
        }
    };
    let rockets = rockets.unwrap_or_else(|err| {
        warn!(%err, "rockets unavailable; labels will be empty");
        Vec::new()
    });
    let launchpads = launchpads.unwrap_or_else(|err| {
        warn!(%err, "launchpads unavailable; labels will be empty");
        Vec::new()
    });
    let payloads = payloads.unwrap_or_else(|err| {
        warn!(%err, "payloads unavailable; payload search disabled");
        Vec::new()
    });

    info!(
        launches = launches.len(),
        rockets = rockets.len(),
        launchpads = launchpads.len(),
        payloads = payloads.len(),
        "list data ready"
    );
    PageState::Ready(ListData {
        launches,
        refs: ReferenceIndex::new(rockets, launchpads, payloads),
    })
}

/// Detail page: one launch by id. `Ready(None)` renders "No launch found.".
#[instrument(skip(source))]
pub async fn load_detail(source: &dyn LaunchSource, id: &str) -> PageState<Option<Launch>> {
    match source.launch(id).await {
        Ok(launch) => PageState::Ready(launch),
        Err(err) => {
            warn!(%err, "failed to load launch");
            PageState::Failed(DETAIL_FAILED.to_string())
        }
    }
}
