//! Filter/sort pipeline that derives the visible launch list from the full
//! collection, the reference collections and a criteria record.
//!
//! Stages run in a fixed order: search, outcome, rocket, launchpad, sort.
//! Each filter stage is an independent predicate so the order only matters
//! for the final sort, which is stable.
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::{Launch, Outcome};
use crate::reference::ReferenceIndex;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseCriteriaError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutcomeFilter {
    #[default]
    All,
    Success,
    Failure,
    /// Outcome strictly unknown.
    Pending,
}

impl OutcomeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeFilter::All => "all",
            OutcomeFilter::Success => "success",
            OutcomeFilter::Failure => "failure",
            OutcomeFilter::Pending => "pending",
        }
    }

    fn accepts(&self, outcome: Outcome) -> bool {
        match self {
            OutcomeFilter::All => true,
            OutcomeFilter::Success => outcome == Outcome::Success,
            OutcomeFilter::Failure => outcome == Outcome::Failure,
            OutcomeFilter::Pending => outcome == Outcome::Pending,
        }
    }
}

impl FromStr for OutcomeFilter {
    type Err = ParseCriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(OutcomeFilter::All),
            "success" => Ok(OutcomeFilter::Success),
            "failure" => Ok(OutcomeFilter::Failure),
            "pending" => Ok(OutcomeFilter::Pending),
            _ => Err(ParseCriteriaError {
                kind: "outcome",
                value: s.to_string(),
                expected: "all, success, failure, pending",
            }),
        }
    }
}

impl fmt::Display for OutcomeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Equality filter over a foreign key; `All` disables it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Facet {
    #[default]
    All,
    Only(String),
}

impl Facet {
    fn accepts(&self, key: Option<&str>) -> bool {
        match self {
            Facet::All => true,
            Facet::Only(want) => key == Some(want.as_str()),
        }
    }
}

impl FromStr for Facet {
    type Err = ParseCriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseCriteriaError {
                kind: "facet",
                value: String::new(),
                expected: "all or an identifier",
            });
        }
        if s.eq_ignore_ascii_case("all") {
            Ok(Facet::All)
        } else {
            Ok(Facet::Only(s.to_string()))
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facet::All => f.write_str("all"),
            Facet::Only(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    NameAsc,
    NameDesc,
    #[default]
    DateNewest,
    DateOldest,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::DateNewest => "date-new",
            SortKey::DateOldest => "date-old",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::NameAsc => "Name: A → Z",
            SortKey::NameDesc => "Name: Z → A",
            SortKey::DateNewest => "Date: Newest → Oldest",
            SortKey::DateOldest => "Date: Oldest → Newest",
        }
    }

    fn compare(&self, a: &Launch, b: &Launch) -> Ordering {
        match self {
            SortKey::NameAsc => locale_cmp(&a.name, &b.name),
            SortKey::NameDesc => locale_cmp(&b.name, &a.name),
            SortKey::DateNewest => b.timestamp().cmp(&a.timestamp()),
            SortKey::DateOldest => a.timestamp().cmp(&b.timestamp()),
        }
    }
}

impl FromStr for SortKey {
    type Err = ParseCriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name-asc" => Ok(SortKey::NameAsc),
            "name-desc" => Ok(SortKey::NameDesc),
            "date-new" => Ok(SortKey::DateNewest),
            "date-old" => Ok(SortKey::DateOldest),
            _ => Err(ParseCriteriaError {
                kind: "sort key",
                value: s.to_string(),
                expected: "name-asc, name-desc, date-new, date-old",
            }),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which launch attributes the free-text search looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchScope {
    /// Name, details, rocket/launchpad names, payload types and customers.
    #[default]
    Everything,
    NameOnly,
}

/// Immutable criteria record. Build variations with the `with_*` methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criteria {
    pub search: String,
    pub scope: SearchScope,
    pub outcome: OutcomeFilter,
    pub rocket: Facet,
    pub launchpad: Facet,
    /// `None` keeps fetch order.
    pub sort: Option<SortKey>,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            scope: SearchScope::Everything,
            outcome: OutcomeFilter::All,
            rocket: Facet::All,
            launchpad: Facet::All,
            sort: Some(SortKey::DateNewest),
        }
    }
}

impl Criteria {
    /// Filterable grid defaults: name-only search, fetch order kept.
    pub fn grid_filter() -> Self {
        Self {
            scope: SearchScope::NameOnly,
            sort: None,
            ..Self::default()
        }
    }

    /// Every criterion back at its default, keeping the view's search scope
    /// and whether it sorts at all.
    pub fn reset(&self) -> Self {
        let base = match self.scope {
            SearchScope::Everything => Self::default(),
            SearchScope::NameOnly => Self::grid_filter(),
        };
        Self {
            sort: self.sort.and(base.sort),
            ..base
        }
    }

    pub fn with_search(self, term: impl Into<String>) -> Self {
        Self {
            search: term.into(),
            ..self
        }
    }

    pub fn with_outcome(self, outcome: OutcomeFilter) -> Self {
        Self { outcome, ..self }
    }

    pub fn with_rocket(self, rocket: Facet) -> Self {
        Self { rocket, ..self }
    }

    pub fn with_launchpad(self, launchpad: Facet) -> Self {
        Self { launchpad, ..self }
    }

    pub fn with_sort(self, sort: SortKey) -> Self {
        Self {
            sort: Some(sort),
            ..self
        }
    }

    pub fn is_default(&self) -> bool {
        *self == self.reset()
    }
}

/// Run the pipeline. The result borrows from `launches`.
pub fn apply<'a>(
    launches: &'a [Launch],
    refs: &ReferenceIndex,
    criteria: &Criteria,
) -> Vec<&'a Launch> {
    let needle = (!criteria.search.trim().is_empty()).then(|| criteria.search.to_lowercase());

    let mut visible: Vec<&Launch> = launches
        .iter()
        .filter(|l| match &needle {
            Some(n) => matches_search(l, refs, n, criteria.scope),
            None => true,
        })
        .filter(|l| criteria.outcome.accepts(l.outcome()))
        .filter(|l| criteria.rocket.accepts(l.rocket.as_deref()))
        .filter(|l| criteria.launchpad.accepts(l.launchpad.as_deref()))
        .collect();

    if let Some(key) = criteria.sort {
        visible.sort_by(|a, b| key.compare(a, b));
    }
    visible
}

fn matches_search(launch: &Launch, refs: &ReferenceIndex, needle: &str, scope: SearchScope) -> bool {
    let hit = |hay: &str| hay.to_lowercase().contains(needle);
    if hit(launch.name.as_str()) {
        return true;
    }
    if scope == SearchScope::NameOnly {
        return false;
    }
    launch.details.as_deref().is_some_and(hit)
        || hit(refs.rocket_name(launch))
        || hit(refs.launchpad_name(launch))
        || hit(refs.payload_types(launch).as_str())
        || hit(refs.payload_customers(launch).as_str())
}

/// Approximation of locale name order: case-insensitive by code point, with
/// lowercase first on a case-only difference. Punctuation and accented
/// letters sort by code point, not by locale collation rules.
fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// "Showing N of M launches".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSummary {
    pub shown: usize,
    pub total: usize,
}

impl fmt::Display for FilterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} of {} launches", self.shown, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Launchpad, Payload, Rocket};

    fn launch(id: &str, name: &str, success: Option<bool>, date: &str) -> Launch {
        Launch {
            id: id.into(),
            name: name.into(),
            success,
            date_utc: date.into(),
            ..Default::default()
        }
    }

    fn names(v: &[&Launch]) -> Vec<String> {
        v.iter().map(|l| l.name.clone()).collect()
    }

    fn sample() -> Vec<Launch> {
        vec![
            launch("1", "Falcon 9", Some(true), "2020-01-01"),
            launch("2", "Starship", Some(false), "2021-01-01"),
        ]
    }

    #[test]
    fn failure_filter_keeps_only_failures() {
        let launches = sample();
        let criteria = Criteria::default().with_outcome(OutcomeFilter::Failure);
        let out = apply(&launches, &ReferenceIndex::default(), &criteria);
        assert_eq!(names(&out), vec!["Starship"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let launches = sample();
        let criteria = Criteria::default().with_search("fAl");
        let out = apply(&launches, &ReferenceIndex::default(), &criteria);
        assert_eq!(names(&out), vec!["Falcon 9"]);
    }

    #[test]
    fn defaults_sort_newest_first_and_keep_everything() {
        let launches = sample();
        let out = apply(&launches, &ReferenceIndex::default(), &Criteria::default());
        assert_eq!(names(&out), vec!["Starship", "Falcon 9"]);
    }

    #[test]
    fn whitespace_term_disables_search() {
        let launches = sample();
        let criteria = Criteria::default().with_search("   ");
        let out = apply(&launches, &ReferenceIndex::default(), &criteria);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn search_reaches_joined_reference_data() {
        let mut launches = sample();
        launches[0].rocket = Some("r1".into());
        launches[0].launchpad = Some("lp1".into());
        launches[1].payloads = Some(vec!["p1".into()]);
        launches[1].details = Some("Suborbital hop".into());
        let refs = ReferenceIndex::new(
            vec![Rocket { id: "r1".into(), name: "Falcon Heavy".into() }],
            vec![Launchpad { id: "lp1".into(), name: "Vandenberg SLC 4E".into() }],
            vec![Payload {
                id: "p1".into(),
                kind: Some("Crew Dragon".into()),
                customers: vec!["Iridium Communications".into()],
            }],
        );

        let find = |term: &str| names(&apply(&launches, &refs, &Criteria::default().with_search(term)));
        assert_eq!(find("heavy"), vec!["Falcon 9"]);
        assert_eq!(find("vandenberg"), vec!["Falcon 9"]);
        assert_eq!(find("crew"), vec!["Starship"]);
        assert_eq!(find("IRIDIUM"), vec!["Starship"]);
        assert_eq!(find("hop"), vec!["Starship"]);
        assert!(find("nothing-like-this").is_empty());
    }

    #[test]
    fn name_only_scope_ignores_details() {
        let mut launches = sample();
        launches[1].details = Some("falcon booster caught".into());
        let criteria = Criteria::grid_filter().with_search("falcon");
        let out = apply(&launches, &ReferenceIndex::default(), &criteria);
        assert_eq!(names(&out), vec!["Falcon 9"]);
    }

    #[test]
    fn pending_isolates_null_outcomes() {
        let mut launches = sample();
        launches.push(launch("3", "Crew-9", None, "2024-09-28"));
        let criteria = Criteria::grid_filter().with_outcome(OutcomeFilter::Pending);
        let out = apply(&launches, &ReferenceIndex::default(), &criteria);
        assert_eq!(names(&out), vec!["Crew-9"]);
    }

    #[test]
    fn grid_filter_keeps_fetch_order() {
        let launches = sample();
        let out = apply(&launches, &ReferenceIndex::default(), &Criteria::grid_filter());
        assert_eq!(names(&out), vec!["Falcon 9", "Starship"]);
    }

    #[test]
    fn rocket_filter_intersects_with_outcome() {
        let mut launches = vec![
            launch("1", "A", Some(true), "2020-01-01"),
            launch("2", "B", Some(false), "2020-02-01"),
            launch("3", "C", Some(true), "2020-03-01"),
            launch("4", "D", Some(true), "2020-04-01"),
        ];
        launches[0].rocket = Some("r1".into());
        launches[1].rocket = Some("r1".into());
        launches[2].rocket = Some("r2".into());

        let refs = ReferenceIndex::default();
        let by_rocket = Criteria::default().with_rocket(Facet::Only("r1".into()));
        let only_rocket = apply(&launches, &refs, &by_rocket);
        assert!(only_rocket.iter().all(|l| l.rocket.as_deref() == Some("r1")));
        assert_eq!(only_rocket.len(), 2);

        let both = apply(&launches, &refs, &by_rocket.clone().with_outcome(OutcomeFilter::Success));
        let only_outcome = apply(
            &launches,
            &refs,
            &Criteria::default().with_outcome(OutcomeFilter::Success),
        );
        assert_eq!(names(&both), vec!["A"]);
        assert!(both.iter().all(|l| only_rocket.iter().any(|o| o.id == l.id)));
        assert!(both.iter().all(|l| only_outcome.iter().any(|o| o.id == l.id)));
    }

    #[test]
    fn launchpad_filter_skips_missing_keys() {
        let mut launches = sample();
        launches[1].launchpad = Some("lp9".into());
        let criteria = Criteria::default().with_launchpad(Facet::Only("lp9".into()));
        let out = apply(&launches, &ReferenceIndex::default(), &criteria);
        assert_eq!(names(&out), vec!["Starship"]);
    }

    #[test]
    fn name_sorts_are_reverses() {
        let launches = vec![
            launch("1", "Tintin A", None, ""),
            launch("2", "amos-6", None, ""),
            launch("3", "Zuma", None, ""),
            launch("4", "CRS-1", None, ""),
        ];
        let refs = ReferenceIndex::default();
        let asc = names(&apply(&launches, &refs, &Criteria::default().with_sort(SortKey::NameAsc)));
        let mut desc =
            names(&apply(&launches, &refs, &Criteria::default().with_sort(SortKey::NameDesc)));
        assert_eq!(asc, vec!["amos-6", "CRS-1", "Tintin A", "Zuma"]);
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn punctuation_orders_by_code_point() {
        let launches = vec![
            launch("1", "Starlink_1", None, ""),
            launch("2", "starlink-1", None, ""),
            launch("3", "Starlink (v1.0)", None, ""),
            launch("4", "Starlink-1", None, ""),
        ];
        let asc = apply(
            &launches,
            &ReferenceIndex::default(),
            &Criteria::default().with_sort(SortKey::NameAsc),
        );
        assert_eq!(names(&asc), vec!["Starlink (v1.0)", "starlink-1", "Starlink-1", "Starlink_1"]);
    }

    #[test]
    fn oldest_first_puts_unknown_dates_first() {
        let launches = vec![
            launch("1", "B", None, "2021-06-01T00:00:00.000Z"),
            launch("2", "A", None, "garbage"),
            launch("3", "C", None, "2019-06-01T00:00:00.000Z"),
        ];
        let refs = ReferenceIndex::default();
        let old = apply(&launches, &refs, &Criteria::default().with_sort(SortKey::DateOldest));
        assert_eq!(names(&old), vec!["A", "C", "B"]);
        let new = apply(&launches, &refs, &Criteria::default());
        assert_eq!(names(&new), vec!["B", "C", "A"]);
    }

    #[test]
    fn sort_is_stable_on_ties() {
        let launches = vec![
            launch("1", "Same", None, "2020-01-01"),
            launch("2", "Same", None, "2020-01-01"),
        ];
        let out = apply(&launches, &ReferenceIndex::default(), &Criteria::default());
        assert_eq!(out[0].id, "1");
        assert_eq!(out[1].id, "2");
    }

    #[test]
    fn reset_restores_defaults() {
        let launches = sample();
        let refs = ReferenceIndex::default();
        let busy = Criteria::default()
            .with_search("star")
            .with_outcome(OutcomeFilter::Failure)
            .with_rocket(Facet::Only("r".into()))
            .with_launchpad(Facet::Only("p".into()))
            .with_sort(SortKey::NameAsc);
        let reset = busy.reset();
        assert_eq!(reset, Criteria::default());
        assert!(reset.is_default());
        assert_eq!(
            apply(&launches, &refs, &reset),
            apply(&launches, &refs, &Criteria::default())
        );

        let grid = Criteria::grid_filter().with_search("x").reset();
        assert_eq!(grid, Criteria::grid_filter());
    }

    #[test]
    fn tokens_round_trip_through_display() {
        for key in [SortKey::NameAsc, SortKey::NameDesc, SortKey::DateNewest, SortKey::DateOldest] {
            assert_eq!(key.to_string().parse::<SortKey>().unwrap(), key);
        }
        assert_eq!("Failure".parse::<OutcomeFilter>().unwrap(), OutcomeFilter::Failure);
        assert_eq!("ALL".parse::<Facet>().unwrap(), Facet::All);
        assert_eq!("5e9d".parse::<Facet>().unwrap(), Facet::Only("5e9d".into()));
        assert!("sideways".parse::<SortKey>().is_err());
        assert!("".parse::<Facet>().is_err());
    }

    #[test]
    fn summary_reads_naturally() {
        let s = FilterSummary { shown: 3, total: 187 };
        assert_eq!(s.to_string(), "Showing 3 of 187 launches");
    }
}
