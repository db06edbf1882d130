//! Command-line criteria flags shared by the binaries.
use clap::Args;

use crate::console::Command;
use crate::pipeline::{Criteria, Facet, OutcomeFilter, SortKey};

#[derive(Debug, Clone, Default, Args)]
pub struct CriteriaArgs {
    /// Free-text search term
    #[arg(long)]
    pub search: Option<String>,

    /// Outcome filter: all, success, failure or pending
    #[arg(long)]
    pub outcome: Option<OutcomeFilter>,

    /// Rocket id, or "all"
    #[arg(long)]
    pub rocket: Option<Facet>,

    /// Launchpad id, or "all"
    #[arg(long)]
    pub launchpad: Option<Facet>,

    /// Sort key: name-asc, name-desc, date-new or date-old
    #[arg(long)]
    pub sort: Option<SortKey>,
}

impl CriteriaArgs {
    /// The flags as console commands, so page rules still apply.
    pub fn commands(&self) -> Vec<Command> {
        let mut out = Vec::new();
        if let Some(term) = &self.search {
            out.push(Command::Search(term.clone()));
        }
        if let Some(outcome) = self.outcome {
            out.push(Command::Outcome(outcome));
        }
        if let Some(rocket) = &self.rocket {
            out.push(Command::Rocket(rocket.clone()));
        }
        if let Some(pad) = &self.launchpad {
            out.push(Command::Launchpad(pad.clone()));
        }
        if let Some(sort) = self.sort {
            out.push(Command::Sort(sort));
        }
        out
    }

    /// Overlay the flags that were given onto `base`.
    pub fn apply(&self, base: Criteria) -> Criteria {
        let mut criteria = base;
        if let Some(term) = &self.search {
            criteria = criteria.with_search(term.clone());
        }
        if let Some(outcome) = self.outcome {
            criteria = criteria.with_outcome(outcome);
        }
        if let Some(rocket) = &self.rocket {
            criteria = criteria.with_rocket(rocket.clone());
        }
        if let Some(pad) = &self.launchpad {
            criteria = criteria.with_launchpad(pad.clone());
        }
        if let Some(sort) = self.sort {
            criteria = criteria.with_sort(sort);
        }
        criteria
    }
}
