// File: src/plugin.rs
// Purpose: App plugins and the router capability they install

use std::collections::HashMap;
use std::sync::Arc;

use character_router::{HistoryMode, Location, Resolution, RouteError, Router};

use crate::app::App;
use crate::views::View;

/// Something that adds a capability to an `App` before it is mounted
pub trait Plugin {
    /// Short name, recorded on the app
    fn name(&self) -> &'static str;

    /// Wires the capability into the app
    fn install(self, app: &mut App);
}

/// Router plus history mode, shared by everything that renders
///
/// Cheap to clone; the router itself is behind an `Arc` and never mutated.
#[derive(Debug, Clone)]
pub struct Routing {
    router: Arc<Router<View>>,
    mode: HistoryMode,
}

impl Routing {
    pub fn new(router: Router<View>, mode: HistoryMode) -> Self {
        Self {
            router: Arc::new(router),
            mode,
        }
    }

    pub fn router(&self) -> &Router<View> {
        &self.router
    }

    pub fn mode(&self) -> &HistoryMode {
        &self.mode
    }

    /// Resolves a router path
    pub fn resolve(&self, path: &str) -> Result<Resolution<View>, RouteError> {
        self.router.resolve(path)
    }

    /// Reads the router location out of a browser URL
    pub fn location(&self, url: &str) -> Location {
        self.mode.parse_location(url)
    }

    /// Href for a router path under the active history mode
    pub fn href(&self, full_path: &str) -> String {
        self.mode.href(full_path)
    }

    /// Href of a named route; unknown names and missing params link home
    pub fn href_for(&self, name: &str, params: &HashMap<String, String>) -> String {
        let path = self
            .router
            .href_for(name, params)
            .unwrap_or_else(|| "/".to_string());
        self.href(&path)
    }
}

/// Installs client-side routing
///
/// ```
/// use character_app::{build_router, App, RouterConfig, RouterPlugin};
/// use character_router::HistoryMode;
///
/// let app = App::new("Characters").use_plugin(RouterPlugin::new(
///     build_router(&RouterConfig::default()),
///     HistoryMode::web("/"),
/// ));
/// assert!(app.routing().is_some());
/// assert_eq!(app.plugins(), ["router"]);
/// ```
pub struct RouterPlugin {
    routing: Routing,
}

impl RouterPlugin {
    pub fn new(router: Router<View>, mode: HistoryMode) -> Self {
        Self {
            routing: Routing::new(router, mode),
        }
    }
}

impl Plugin for RouterPlugin {
    fn name(&self) -> &'static str {
        "router"
    }

    fn install(self, app: &mut App) {
        app.provide_routing(self.routing);
    }
}
