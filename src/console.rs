//! Line-oriented dashboard session. Each input line is one user event:
//! navigating, editing a criterion, toggling details or opening an item.
use std::collections::HashSet;
use std::fmt::Write;

use thiserror::Error;
use tracing::{debug, info};

use crate::config;
use crate::fetch::LaunchSource;
use crate::model::Launch;
use crate::pages::{self, ListData};
use crate::pipeline::{self, Criteria, Facet, FilterSummary, OutcomeFilter, ParseCriteriaError, SortKey};
use crate::reference::ReferenceIndex;
use crate::render::{text, DetailView, DetailsToggle, GridCard, ItemEvent, ListRow};
use crate::route::{Route, RouteError};
use crate::state::{PageState, Tracked};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("'{0}' is not an item number")]
    BadIndex(String),
    #[error(transparent)]
    Criteria(#[from] ParseCriteriaError),
    #[error(transparent)]
    Route(#[from] RouteError),
    #[error("this page has no {0} control")]
    NoControl(&'static str),
    #[error("no item {0} on this page")]
    NoItem(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(Route),
    Search(String),
    Outcome(OutcomeFilter),
    Rocket(Facet),
    Launchpad(Facet),
    Sort(SortKey),
    Reset,
    /// Toggle details of the n-th visible item (1-based).
    More(usize),
    /// Activate the n-th visible item (1-based).
    Open(usize),
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, ConsoleError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };
        let arg = |name: &'static str| {
            if rest.is_empty() {
                Err(ConsoleError::MissingArgument(name))
            } else {
                Ok(rest)
            }
        };
        let cmd = match word.to_ascii_lowercase().as_str() {
            "go" | "cd" => Command::Go(Route::parse(arg("go")?)?),
            "grid" => Command::Go(Route::Grid),
            "filter" => Command::Go(Route::GridFilter),
            "list" => Command::Go(Route::List),
            "home" | "back" => Command::Go(Route::Home),
            // An empty term clears the search.
            "search" => Command::Search(rest.to_string()),
            "outcome" | "status" => Command::Outcome(arg("outcome")?.parse()?),
            "rocket" => Command::Rocket(arg("rocket")?.parse()?),
            "launchpad" | "pad" => Command::Launchpad(arg("launchpad")?.parse()?),
            "sort" => Command::Sort(arg("sort")?.parse()?),
            "reset" => Command::Reset,
            "more" | "less" => Command::More(index(arg("more")?)?),
            "open" => Command::Open(index(arg("open")?)?),
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(ConsoleError::Unknown(other.to_string())),
        };
        Ok(Some(cmd))
    }
}

fn index(raw: &str) -> Result<usize, ConsoleError> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConsoleError::BadIndex(raw.to_string())),
    }
}

pub const HELP: &str = "\
commands:
  go <path>            open /, /grid, /grid-filter, /list or /launch/<id>
  grid | filter | list | home
  search <term>        free-text search (empty clears)
  outcome <value>      all | success | failure | pending (grid filter only)
  rocket <all|id>      list only
  launchpad <all|id>   list only
  sort <key>           name-asc | name-desc | date-new | date-old (list only)
  reset                restore every filter to its default
  more <n>             toggle See More / See Less on item n
  open <n>             open item n (grid cards only)
  quit
";

/// Whether the input loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One browsing session. Navigating to a page discards the previous page's
/// criteria and toggles, then fetches that page's data afresh.
pub struct Session<'s> {
    source: &'s dyn LaunchSource,
    view: config::View,
    route: Route,
    collection: PageState<Vec<Launch>>,
    list: PageState<ListData>,
    detail: Tracked<Option<Launch>>,
    criteria: Criteria,
    expanded: HashSet<String>,
    notice: Option<String>,
}

impl<'s> Session<'s> {
    pub fn new(source: &'s dyn LaunchSource, view: config::View) -> Self {
        Self {
            source,
            view,
            route: Route::Home,
            collection: PageState::Idle,
            list: PageState::Idle,
            detail: Tracked::new(),
            criteria: Criteria::default(),
            expanded: HashSet::new(),
            notice: None,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub async fn navigate(&mut self, route: Route) {
        info!(%route, "navigate");
        self.route = route.clone();
        self.expanded.clear();
        self.collection = PageState::Idle;
        self.list = PageState::Idle;
        match route {
            Route::Home => {}
            Route::Grid => {
                self.criteria = Criteria::default();
                self.collection = PageState::Loading;
                self.collection = pages::load_launches(self.source).await;
            }
            Route::GridFilter => {
                self.criteria = Criteria::grid_filter();
                self.collection = PageState::Loading;
                self.collection = pages::load_launches(self.source).await;
            }
            Route::List => {
                self.criteria = Criteria::default();
                self.list = PageState::Loading;
                self.list = pages::load_list(self.source).await;
            }
            Route::Launch(id) => {
                let ticket = self.detail.begin();
                let loaded = pages::load_detail(self.source, &id).await;
                self.detail.settle(ticket, loaded);
            }
        }
    }

    pub async fn execute(&mut self, cmd: Command) -> Result<Flow, ConsoleError> {
        debug!(?cmd, "execute");
        self.notice = None;
        match cmd {
            Command::Go(route) => self.navigate(route).await,
            Command::Search(term) => {
                self.require_search()?;
                self.criteria = self.criteria.clone().with_search(term);
            }
            Command::Outcome(outcome) => {
                self.require_filters("status")?;
                // The list page offers success/failure/all only.
                if outcome == OutcomeFilter::Pending && self.route == Route::List {
                    return Err(ConsoleError::NoControl("pending status"));
                }
                self.criteria = self.criteria.clone().with_outcome(outcome);
            }
            Command::Rocket(facet) => {
                self.require_list("rocket")?;
                self.criteria = self.criteria.clone().with_rocket(facet);
            }
            Command::Launchpad(facet) => {
                self.require_list("launchpad")?;
                self.criteria = self.criteria.clone().with_launchpad(facet);
            }
            Command::Sort(key) => {
                self.require_list("sort")?;
                self.criteria = self.criteria.clone().with_sort(key);
            }
            Command::Reset => {
                self.require_filters("reset")?;
                self.criteria = self.criteria.reset();
            }
            Command::More(n) => self.dispatch(n, ItemEvent::ToggleDetails).await?,
            Command::Open(n) => self.dispatch(n, ItemEvent::Activate).await?,
            Command::Help => self.notice = Some(HELP.to_string()),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn require_search(&self) -> Result<(), ConsoleError> {
        self.require_filters("search")
    }

    fn require_filters(&self, control: &'static str) -> Result<(), ConsoleError> {
        match self.route {
            Route::GridFilter | Route::List => Ok(()),
            _ => Err(ConsoleError::NoControl(control)),
        }
    }

    fn require_list(&self, control: &'static str) -> Result<(), ConsoleError> {
        if self.route == Route::List {
            Ok(())
        } else {
            Err(ConsoleError::NoControl(control))
        }
    }

    /// Launches currently shown, in display order.
    pub fn visible(&self) -> Vec<&Launch> {
        match self.route {
            Route::Grid => self
                .collection
                .ready()
                .map(|all| all.iter().collect())
                .unwrap_or_default(),
            Route::GridFilter => self
                .collection
                .ready()
                .map(|all| pipeline::apply(all, &ReferenceIndex::default(), &self.criteria))
                .unwrap_or_default(),
            Route::List => self
                .list
                .ready()
                .map(|data| pipeline::apply(&data.launches, &data.refs, &self.criteria))
                .unwrap_or_default(),
            Route::Home | Route::Launch(_) => Vec::new(),
        }
    }

    fn toggle_for(&self, launch: &Launch) -> DetailsToggle {
        let budget = match self.route {
            Route::List => self.view.row_details_budget,
            _ => self.view.card_details_budget,
        };
        DetailsToggle {
            budget,
            expanded: self.expanded.contains(&launch.id),
        }
    }

    async fn dispatch(&mut self, n: usize, event: ItemEvent) -> Result<(), ConsoleError> {
        let (id, expanded, target) = {
            let visible = self.visible();
            let launch = *n
                .checked_sub(1)
                .and_then(|i| visible.get(i))
                .ok_or(ConsoleError::NoItem(n))?;
            let toggle = self.toggle_for(launch);
            match self.route {
                Route::List => {
                    let mut row = ListRow::new(launch, toggle);
                    let target = row.on_event(event);
                    (launch.id.clone(), row.details.expanded, target)
                }
                _ => {
                    let mut card = GridCard::new(launch, toggle);
                    let target = card.on_event(event);
                    (launch.id.clone(), card.details.expanded, target)
                }
            }
        };

        if expanded {
            self.expanded.insert(id);
        } else {
            self.expanded.remove(&id);
        }
        match target {
            Some(route) => self.navigate(route).await,
            None if event == ItemEvent::Activate => {
                self.notice = Some("List rows do not open a detail page.".to_string());
            }
            None => {}
        }
        Ok(())
    }

    /// Render the current page as text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", text::nav(&self.route));
        let _ = writeln!(out, "{}", "-".repeat(60));
        if let Some(notice) = &self.notice {
            let _ = writeln!(out, "{}", notice);
        }
        match &self.route {
            Route::Home => out.push_str("Pick a view: grid, filter or list.\n"),
            Route::Grid => {
                out.push_str("Grid View - SpaceX Launches\n\n");
                self.render_cards(&mut out, &self.collection, pages::GRID_LOADING);
            }
            Route::GridFilter => {
                out.push_str("Grid View with Filters\n");
                out.push_str(&text::filter_bar(&self.criteria, None));
                out.push('\n');
                self.render_cards(&mut out, &self.collection, pages::GRID_LOADING);
            }
            Route::List => {
                out.push_str("List View - SpaceX Launches\n");
                match &self.list {
                    PageState::Idle | PageState::Loading => {
                        let _ = writeln!(out, "{}", pages::LIST_LOADING);
                    }
                    PageState::Failed(msg) => {
                        let _ = writeln!(out, "{}", msg);
                    }
                    PageState::Ready(data) => {
                        out.push_str(&text::filter_bar(&self.criteria, Some(&data.refs)));
                        let visible = self.visible();
                        out.push_str(&text::summary(FilterSummary {
                            shown: visible.len(),
                            total: data.launches.len(),
                        }));
                        out.push('\n');
                        for (i, launch) in visible.iter().enumerate() {
                            let row = ListRow::new(launch, self.toggle_for(launch));
                            out.push_str(&text::list_row(i + 1, &row));
                        }
                    }
                }
            }
            Route::Launch(_) => match self.detail.state() {
                PageState::Idle | PageState::Loading => {
                    let _ = writeln!(out, "{}", pages::DETAIL_LOADING);
                }
                PageState::Failed(msg) => {
                    let _ = writeln!(out, "{}", msg);
                }
                PageState::Ready(launch) => {
                    out.push_str(&text::detail(&DetailView::new(launch.as_ref())));
                }
            },
        }
        out
    }

    fn render_cards(&self, out: &mut String, state: &PageState<Vec<Launch>>, loading: &str) {
        match state {
            PageState::Idle | PageState::Loading => {
                let _ = writeln!(out, "{}", loading);
            }
            PageState::Failed(msg) => {
                let _ = writeln!(out, "{}", msg);
            }
            PageState::Ready(_) => {
                for (i, launch) in self.visible().iter().enumerate() {
                    let card = GridCard::new(launch, self.toggle_for(launch));
                    out.push_str(&text::grid_card(i + 1, &card));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("  ").unwrap(), None);
        assert_eq!(
            Command::parse("go /launch/abc").unwrap(),
            Some(Command::Go(Route::Launch("abc".into())))
        );
        assert_eq!(
            Command::parse("search Falcon Heavy").unwrap(),
            Some(Command::Search("Falcon Heavy".into()))
        );
        assert_eq!(Command::parse("search").unwrap(), Some(Command::Search(String::new())));
        assert_eq!(
            Command::parse("outcome FAILURE").unwrap(),
            Some(Command::Outcome(OutcomeFilter::Failure))
        );
        assert_eq!(
            Command::parse("rocket 5e9d0d95eda69973a809d1ec").unwrap(),
            Some(Command::Rocket(Facet::Only("5e9d0d95eda69973a809d1ec".into())))
        );
        assert_eq!(Command::parse("pad all").unwrap(), Some(Command::Launchpad(Facet::All)));
        assert_eq!(
            Command::parse("sort name-desc").unwrap(),
            Some(Command::Sort(SortKey::NameDesc))
        );
        assert_eq!(Command::parse("more 3").unwrap(), Some(Command::More(3)));
        assert_eq!(Command::parse("q").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            Command::parse("launch now"),
            Err(ConsoleError::Unknown("launch".into()))
        );
        assert_eq!(Command::parse("open 0"), Err(ConsoleError::BadIndex("0".into())));
        assert_eq!(Command::parse("more x"), Err(ConsoleError::BadIndex("x".into())));
        assert_eq!(Command::parse("sort"), Err(ConsoleError::MissingArgument("sort")));
        assert!(matches!(Command::parse("sort upward"), Err(ConsoleError::Criteria(_))));
        assert!(matches!(Command::parse("go /nowhere"), Err(ConsoleError::Route(_))));
    }
}
