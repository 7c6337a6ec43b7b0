//! Route gating for presentation layers
//!
//! Navigation is only decided once the guard state is known and the
//! presentation layer has mounted, so a redirect never races the host's
//! own navigator coming up.

use std::fmt;
use std::str::FromStr;

use telly_core::ShowId;

use crate::auth::GuardState;
use crate::error::GuardError;

/// Navigable destinations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// PIN entry
    Pin,
    /// Show list / search
    Home,
    /// Show detail, reachable by deep link; the terminal front-end has no
    /// detail screen and renders home for it
    Show(ShowId),
    /// Favorites list
    Favorites,
}

impl Route {
    /// Whether this route shows protected content
    pub fn requires_unlock(&self) -> bool {
        !matches!(self, Route::Pin)
    }

    /// Path form used by deep links
    pub fn path(&self) -> String {
        match self {
            Route::Pin => "/pin".to_string(),
            Route::Home => "/".to_string(),
            Route::Show(id) => format!("/show/{}", id),
            Route::Favorites => "/favorites".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "/" | "/index" => Ok(Route::Home),
            "/pin" => Ok(Route::Pin),
            "/favorites" => Ok(Route::Favorites),
            path => path
                .strip_prefix("/show/")
                .and_then(|id| id.parse::<ShowId>().ok())
                .map(Route::Show)
                .ok_or_else(|| GuardError::UnknownRoute(path.to_string())),
        }
    }
}

/// What the presentation layer should render
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    /// Neutral loading view; no navigation allowed
    Loading,
    /// PIN entry; all content blocked
    Pin,
    /// Content at the given route
    Content(Route),
}

/// Decides redirects from guard state changes
#[derive(Debug, Default)]
pub struct RouteGate {
    mounted: bool,
    last_redirect: Option<Route>,
}

impl RouteGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the presentation layer has rendered at least once
    pub fn mark_mounted(&mut self) {
        self.mounted = true;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Redirect to issue for `state`, if any
    ///
    /// Nothing is issued while the state is unknown or before mount. A
    /// redirect is only issued when it differs from the previous one.
    pub fn redirect(&mut self, state: GuardState) -> Option<Route> {
        if !self.mounted {
            return None;
        }

        let target = match state {
            GuardState::Initializing => return None,
            GuardState::Locked => Route::Pin,
            GuardState::Unlocked => Route::Home,
        };

        if self.last_redirect == Some(target) {
            return None;
        }

        tracing::debug!(route = %target, "Redirecting");
        self.last_redirect = Some(target);
        Some(target)
    }

    /// The route actually allowed when `requested` is asked for
    pub fn authorize(requested: Route, state: GuardState) -> Route {
        if requested.requires_unlock() && !state.permits_content() {
            Route::Pin
        } else {
            requested
        }
    }

    /// View to render for `current` in `state`
    pub fn view(state: GuardState, current: Route) -> View {
        match state {
            GuardState::Initializing => View::Loading,
            GuardState::Locked => View::Pin,
            GuardState::Unlocked => match current {
                Route::Pin => View::Content(Route::Home),
                route => View::Content(route),
            },
        }
    }
}
