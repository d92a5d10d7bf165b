//! Signal Routing Types
//!
//! Which executor a chat's signals go to. Routing is explicit: every chat
//! carries its own route in a [`RouteTable`], and forwarding always takes
//! the route as a parameter.

use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Route
// =============================================================================

/// Executor a signal is forwarded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    /// Spot executor.
    #[default]
    Spot,
    /// Linear futures executor.
    Futures,
}

impl Route {
    /// Upper-case mode name shown to users.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Spot => "SPOT",
            Self::Futures => "FUTURES",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Targets
// =============================================================================

/// Websocket URL of each executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTargets {
    /// Spot executor URL.
    pub spot_url: String,
    /// Futures executor URL.
    pub futures_url: String,
}

impl RouteTargets {
    /// Create targets from explicit URLs.
    #[must_use]
    pub fn new(spot_url: impl Into<String>, futures_url: impl Into<String>) -> Self {
        Self {
            spot_url: spot_url.into(),
            futures_url: futures_url.into(),
        }
    }

    /// URL for `route`.
    #[must_use]
    pub fn url_for(&self, route: Route) -> &str {
        match route {
            Route::Spot => &self.spot_url,
            Route::Futures => &self.futures_url,
        }
    }
}

impl Default for RouteTargets {
    fn default() -> Self {
        Self::new("ws://localhost:8765", "ws://localhost:8766")
    }
}

// =============================================================================
// Route Table
// =============================================================================

/// Telegram chat identifier.
pub type ChatId = i64;

/// Current route per chat. Chats never switched use the default route.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    default_route: Route,
    routes: HashMap<ChatId, Route>,
}

impl RouteTable {
    /// Create an empty table with `default_route` for unknown chats.
    #[must_use]
    pub fn new(default_route: Route) -> Self {
        Self {
            default_route,
            routes: HashMap::new(),
        }
    }

    /// Route for `chat_id`.
    #[must_use]
    pub fn route_for(&self, chat_id: ChatId) -> Route {
        self.routes
            .get(&chat_id)
            .copied()
            .unwrap_or(self.default_route)
    }

    /// Switch `chat_id` to `route`, returning the previous route.
    pub fn switch(&mut self, chat_id: ChatId, route: Route) -> Route {
        let previous = self.route_for(chat_id);
        self.routes.insert(chat_id, route);
        previous
    }

    /// Number of chats with an explicit route.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// No chat has switched yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_chat_uses_default() {
        let table = RouteTable::default();
        assert_eq!(table.route_for(42), Route::Spot);
        assert!(table.is_empty());
    }

    #[test]
    fn switch_is_per_chat() {
        let mut table = RouteTable::new(Route::Spot);
        assert_eq!(table.switch(1, Route::Futures), Route::Spot);
        assert_eq!(table.route_for(1), Route::Futures);
        assert_eq!(table.route_for(2), Route::Spot);
        assert_eq!(table.switch(1, Route::Spot), Route::Futures);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn targets_map_routes_to_urls() {
        let targets = RouteTargets::default();
        assert_eq!(targets.url_for(Route::Spot), "ws://localhost:8765");
        assert_eq!(targets.url_for(Route::Futures), "ws://localhost:8766");
    }

    #[test]
    fn route_labels() {
        assert_eq!(Route::Spot.to_string(), "SPOT");
        assert_eq!(Route::Futures.as_str(), "FUTURES");
    }
}
