//! Tagged page state and the last-write-wins guard for detail fetches.

/// Lifecycle of one page's data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    /// Holds the user-facing message.
    Failed(String),
}

impl<T> PageState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            PageState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PageState::Loading)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PageState<U> {
        match self {
            PageState::Idle => PageState::Idle,
            PageState::Loading => PageState::Loading,
            PageState::Ready(data) => PageState::Ready(f(data)),
            PageState::Failed(msg) => PageState::Failed(msg),
        }
    }
}

/// Identifies one in-flight load issued by [`Tracked::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Page state that only accepts the result of the most recent load.
///
/// A detail view whose id changes twice in quick succession issues two
/// loads; whichever settles last must not overwrite the newer request's
/// view, so results carrying an outdated ticket are dropped. The console
/// session loads one page at a time, so there the guard only matters to
/// callers that hold several tickets and settle them out of order.
#[derive(Debug, Clone)]
pub struct Tracked<T> {
    generation: u64,
    state: PageState<T>,
}

impl<T> Default for Tracked<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tracked<T> {
    pub fn new() -> Self {
        Self {
            generation: 0,
            state: PageState::Idle,
        }
    }

    pub fn state(&self) -> &PageState<T> {
        &self.state
    }

    /// Start a new load, superseding any load still in flight.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.state = PageState::Loading;
        Ticket(self.generation)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    /// Apply a settled load. Returns `false` when the ticket is stale.
    pub fn settle(&mut self, ticket: Ticket, outcome: PageState<T>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(stale = ticket.0, current = self.generation, "dropping stale result");
            return false;
        }
        self.state = outcome;
        true
    }
}
