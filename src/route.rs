use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("no page at '{0}'")]
    NotFound(String),
    #[error("launch path is missing an id")]
    MissingId,
}

/// Client-side pages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Grid,
    GridFilter,
    List,
    Launch(String),
}

impl Route {
    /// Navigation bar entries, in display order.
    pub const NAV: [(Route, &'static str); 3] = [
        (Route::Grid, "Grid View"),
        (Route::GridFilter, "Grid with Filter"),
        (Route::List, "List View"),
    ];

    pub fn parse(path: &str) -> Result<Route, RouteError> {
        let path = path.trim();
        let path = path.split(|c| c == '?' || c == '#').next().unwrap_or("");
        let trimmed = path.trim_matches('/');
        match trimmed {
            "" => Ok(Route::Home),
            "grid" => Ok(Route::Grid),
            "grid-filter" => Ok(Route::GridFilter),
            "list" => Ok(Route::List),
            _ => match trimmed.strip_prefix("launch") {
                Some("") => Err(RouteError::MissingId),
                Some(rest) => match rest.strip_prefix('/') {
                    Some(id) if !id.is_empty() && !id.contains('/') => Ok(Route::Launch(id.to_string())),
                    Some("") => Err(RouteError::MissingId),
                    _ => Err(RouteError::NotFound(path.to_string())),
                },
                None => Err(RouteError::NotFound(path.to_string())),
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Grid => "/grid".to_string(),
            Route::GridFilter => "/grid-filter".to_string(),
            Route::List => "/list".to_string(),
            Route::Launch(id) => format!("/launch/{}", id),
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
