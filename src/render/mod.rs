//! Presentation components for a single launch.
//!
//! Components are cheap views over a borrowed [`Launch`]. The only state
//! they carry is the local "See More" toggle, which callers persist between
//! renders if they want it to survive.
use std::borrow::Cow;

use crate::model::Launch;
use crate::route::Route;

pub mod html;
pub mod text;

pub const ELLIPSIS: &str = "...";

/// Cut `text` to `budget` characters (mid-word) and append an ellipsis.
/// Text within budget is returned untouched.
pub fn truncate(text: &str, budget: usize) -> Cow<'_, str> {
    match text.char_indices().nth(budget) {
        Some((cut, _)) => Cow::Owned(format!("{}{}", &text[..cut], ELLIPSIS)),
        None => Cow::Borrowed(text),
    }
}

/// Expand/collapse state of a details paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailsToggle {
    pub budget: usize,
    pub expanded: bool,
}

impl DetailsToggle {
    pub fn collapsed(budget: usize) -> Self {
        Self {
            budget,
            expanded: false,
        }
    }

    /// A toggle control exists only when the text overflows the budget.
    pub fn applies_to(&self, text: &str) -> bool {
        text.chars().count() > self.budget
    }

    pub fn visible<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.expanded {
            Cow::Borrowed(text)
        } else {
            truncate(text, self.budget)
        }
    }

    pub fn label(&self) -> &'static str {
        if self.expanded {
            "See Less"
        } else {
            "See More"
        }
    }

    /// Flip the state if a control would be shown for `text`.
    pub fn toggle(&mut self, text: &str) -> bool {
        if !self.applies_to(text) {
            return false;
        }
        self.expanded = !self.expanded;
        true
    }
}

/// User interaction with a card or row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEvent {
    /// Click on the container itself.
    Activate,
    /// Click on the "See More"/"See Less" control.
    ToggleDetails,
}

/// Card in the grid views; the whole card links to the detail page.
#[derive(Debug, Clone)]
pub struct GridCard<'a> {
    pub launch: &'a Launch,
    pub details: DetailsToggle,
}

impl<'a> GridCard<'a> {
    pub fn new(launch: &'a Launch, details: DetailsToggle) -> Self {
        Self { launch, details }
    }

    pub fn target(&self) -> Route {
        Route::Launch(self.launch.id.clone())
    }

    /// Returns the route to navigate to, if any. Toggling details is
    /// consumed by the control and never reaches the card.
    pub fn on_event(&mut self, event: ItemEvent) -> Option<Route> {
        match event {
            ItemEvent::Activate => Some(self.target()),
            ItemEvent::ToggleDetails => {
                if let Some(text) = self.launch.details_text() {
                    self.details.toggle(text);
                }
                None
            }
        }
    }
}

/// Row in the list view. Rows do not navigate.
#[derive(Debug, Clone)]
pub struct ListRow<'a> {
    pub launch: &'a Launch,
    pub details: DetailsToggle,
}

impl<'a> ListRow<'a> {
    pub fn new(launch: &'a Launch, details: DetailsToggle) -> Self {
        Self { launch, details }
    }

    pub fn on_event(&mut self, event: ItemEvent) -> Option<Route> {
        if event == ItemEvent::ToggleDetails {
            if let Some(text) = self.launch.details_text() {
                self.details.toggle(text);
            }
        }
        None
    }
}

/// Full page for one launch.
#[derive(Debug, Clone)]
pub struct DetailView<'a> {
    pub launch: Option<&'a Launch>,
}

impl<'a> DetailView<'a> {
    pub fn new(launch: Option<&'a Launch>) -> Self {
        Self { launch }
    }

    pub fn back(&self) -> Route {
        Route::Home
    }
}

pub(crate) fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_launch(len: usize) -> Launch {
        let details: String = "abcdefghij".chars().cycle().take(len).collect();
        Launch {
            id: "l1".into(),
            name: "CRS-20".into(),
            details: Some(details),
            ..Default::default()
        }
    }

    #[test]
    fn truncates_to_budget_with_ellipsis() {
        let launch = long_launch(200);
        let text = launch.details_text().unwrap();
        let mut toggle = DetailsToggle::collapsed(120);

        let shown = toggle.visible(text);
        assert!(shown.ends_with(ELLIPSIS));
        assert_eq!(shown.chars().count(), 120 + ELLIPSIS.len());
        assert_eq!(&shown[..120], &text[..120]);

        assert!(toggle.toggle(text));
        assert_eq!(toggle.visible(text), text);
        assert_eq!(toggle.visible(text).chars().count(), 200);
        assert_eq!(toggle.label(), "See Less");
    }

    #[test]
    fn short_text_has_no_toggle() {
        let mut toggle = DetailsToggle::collapsed(120);
        let text = "x".repeat(120);
        assert!(!toggle.applies_to(&text));
        assert!(!toggle.toggle(&text));
        assert_eq!(toggle.visible(&text), text);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        assert_eq!(truncate("ééééé", 3), "ééé...");
        assert_eq!(truncate("héllo", 5), "héllo");
    }

    #[test]
    fn toggling_a_card_does_not_navigate() {
        let launch = long_launch(200);
        let mut card = GridCard::new(&launch, DetailsToggle::collapsed(120));
        assert_eq!(card.on_event(ItemEvent::ToggleDetails), None);
        assert!(card.details.expanded);
        assert_eq!(card.on_event(ItemEvent::ToggleDetails), None);
        assert!(!card.details.expanded);
        assert_eq!(
            card.on_event(ItemEvent::Activate),
            Some(Route::Launch("l1".into()))
        );
    }

    #[test]
    fn rows_toggle_but_never_navigate() {
        let launch = long_launch(300);
        let mut row = ListRow::new(&launch, DetailsToggle::collapsed(170));
        assert_eq!(row.on_event(ItemEvent::Activate), None);
        assert_eq!(row.on_event(ItemEvent::ToggleDetails), None);
        assert!(row.details.expanded);
    }
}
