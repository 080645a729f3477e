// Characters - single-page application shell
// Route table, views, router plugin and the mount-once bootstrap

pub mod app;
pub mod config;
pub mod document;
pub mod error;
pub mod plugin;
pub mod routes;
pub mod views;

pub use app::{App, MountedApp, Page};
pub use config::{AppConfig, Config, HistoryKind, RouterConfig, ServerConfig};
pub use document::{Document, Element, Selector};
pub use error::MountError;
pub use plugin::{Plugin, RouterPlugin, Routing};
pub use routes::{build_router, route_table, DETAIL_ROUTE, LIST_ROUTE};
pub use views::View;

// Re-export the router crate for callers that need its types
pub use character_router;

use anyhow::{Context, Result};

/// Composition root: create the app, install routing, mount it
///
/// `url` is the location the page was loaded at.
pub fn bootstrap(config: &Config, url: &str) -> Result<MountedApp> {
    let mount: Selector = config
        .app
        .mount
        .parse()
        .context("Invalid [app] mount selector")?;
    let document = Document::shell(url, &config.app.title, &mount);

    App::new(&config.app.title)
        .use_plugin(RouterPlugin::new(
            build_router(&config.router),
            config.router.history_mode(),
        ))
        .mount_into(mount, document)
        .with_context(|| format!("Failed to mount app into '{}'", config.app.mount))
}
