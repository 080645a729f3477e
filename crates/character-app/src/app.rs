// File: src/app.rs
// Purpose: Application instance, mounting and navigation

use std::collections::VecDeque;

use character_router::{HistoryStack, Location, NavigationEvent, Resolution, RouteError};
use maud::{html, Markup};
use tracing::{debug, info, warn};

use crate::document::{Document, Selector};
use crate::error::MountError;
use crate::plugin::{Plugin, Routing};
use crate::routes::LIST_ROUTE;
use crate::views::View;

/// An application that has not been mounted yet
///
/// Plugins are installed with `use_plugin`; `mount` consumes the app, so
/// an instance can be mounted at most once.
#[derive(Debug)]
pub struct App {
    title: String,
    routing: Option<Routing>,
    plugins: Vec<&'static str>,
}

impl App {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            routing: None,
            plugins: Vec::new(),
        }
    }

    /// Installs a plugin
    pub fn use_plugin<P: Plugin>(mut self, plugin: P) -> Self {
        let name = plugin.name();
        debug!(plugin = name, "installing plugin");
        plugin.install(&mut self);
        self.plugins.push(name);
        self
    }

    /// Makes `routing` available to every view of this app
    pub fn provide_routing(&mut self, routing: Routing) {
        self.routing = Some(routing);
    }

    pub fn routing(&self) -> Option<&Routing> {
        self.routing.as_ref()
    }

    /// Names of installed plugins, in install order
    pub fn plugins(&self) -> &[&'static str] {
        &self.plugins
    }

    /// Mounts the app into the element matching `selector`
    ///
    /// Resolves the document's URL, replaces it if a redirect was followed,
    /// and renders the resulting view into the mount element.
    pub fn mount(self, selector: &str, document: Document) -> Result<MountedApp, MountError> {
        self.mount_into(selector.parse()?, document)
    }

    /// Mounts the app into the element of an already parsed selector
    pub fn mount_into(self, mount: Selector, document: Document) -> Result<MountedApp, MountError> {
        let routing = self.routing.ok_or(MountError::RouterNotInstalled)?;

        if document.query(&mount).is_none() {
            return Err(MountError::ElementNotFound(mount.id().to_string()));
        }

        let mut location = routing.location(document.url());
        let resolution = routing.resolve(&location.path)?;
        location.path = resolution.path.clone();

        let mut mounted = MountedApp {
            title: self.title,
            routing,
            document,
            mount,
            history: HistoryStack::new(location.full_path()),
            location,
            current: resolution,
            pending: VecDeque::new(),
        };
        mounted.paint();

        info!(
            selector = %mounted.mount,
            path = %mounted.location.path,
            view = mounted.current.view.name(),
            "app mounted"
        );
        Ok(mounted)
    }
}

/// A rendered page for one location, produced without touching app state
#[derive(Debug, Clone)]
pub struct Page {
    pub location: Location,
    pub resolution: Resolution<View>,
    pub html: String,
}

/// A mounted application
///
/// Navigation events are queued and handled strictly in arrival order,
/// each one completely before the next.
#[derive(Debug)]
pub struct MountedApp {
    title: String,
    routing: Routing,
    document: Document,
    mount: Selector,
    history: HistoryStack,
    location: Location,
    current: Resolution<View>,
    pending: VecDeque<NavigationEvent>,
}

impl MountedApp {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn routing(&self) -> &Routing {
        &self.routing
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn mount_point(&self) -> &Selector {
        &self.mount
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// What is currently rendered
    pub fn current(&self) -> &Resolution<View> {
        &self.current
    }

    /// Queues an event without handling it
    pub fn enqueue(&mut self, event: NavigationEvent) {
        self.pending.push_back(event);
    }

    /// Number of queued events
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Handles every queued event in order
    ///
    /// A failing event leaves the current view as it was and does not stop
    /// later events; the last failure is returned.
    pub fn process_pending(&mut self) -> Result<(), RouteError> {
        let mut outcome = Ok(());
        while let Some(event) = self.pending.pop_front() {
            if let Err(err) = self.apply(&event) {
                warn!(?event, error = %err, "navigation failed");
                outcome = Err(err);
            }
        }
        outcome
    }

    /// Queues `event`, drains the queue and returns the new current view
    pub fn navigate(&mut self, event: NavigationEvent) -> Result<&Resolution<View>, RouteError> {
        self.enqueue(event);
        self.process_pending()?;
        Ok(&self.current)
    }

    /// Shorthand for `navigate(NavigationEvent::Push(..))`
    pub fn push(&mut self, to: impl Into<String>) -> Result<&Resolution<View>, RouteError> {
        self.navigate(NavigationEvent::Push(to.into()))
    }

    fn apply(&mut self, event: &NavigationEvent) -> Result<(), RouteError> {
        match event {
            NavigationEvent::Push(to) => {
                let (location, resolution) = self.resolve_location(Location::parse(to))?;
                self.history.push(location.full_path());
                self.commit(location, resolution);
            }
            NavigationEvent::Replace(to) => {
                let (location, resolution) = self.resolve_location(Location::parse(to))?;
                self.history.replace(location.full_path());
                self.commit(location, resolution);
            }
            NavigationEvent::Back => self.traverse(-1)?,
            NavigationEvent::Forward => self.traverse(1)?,
            NavigationEvent::Go(delta) => self.traverse(*delta)?,
        }
        Ok(())
    }

    fn traverse(&mut self, delta: isize) -> Result<(), RouteError> {
        let Some(entry) = self.history.go(delta).map(str::to_owned) else {
            debug!(delta, "history traversal out of range");
            return Ok(());
        };

        match self.resolve_location(Location::parse(&entry)) {
            Ok((location, resolution)) => {
                self.commit(location, resolution);
                Ok(())
            }
            Err(err) => {
                self.history.go(-delta);
                Err(err)
            }
        }
    }

    fn resolve_location(
        &self,
        mut location: Location,
    ) -> Result<(Location, Resolution<View>), RouteError> {
        let resolution = self.routing.resolve(&location.path)?;
        location.path = resolution.path.clone();
        Ok((location, resolution))
    }

    fn commit(&mut self, location: Location, resolution: Resolution<View>) {
        debug!(
            path = %location.path,
            view = resolution.view.name(),
            redirected = resolution.was_redirected(),
            "navigated"
        );
        self.location = location;
        self.current = resolution;
        self.paint();
    }

    /// Re-renders the view region into the mount element
    fn paint(&mut self) {
        let url = self.routing.href(&self.location.full_path());
        let content = self.render_root(&self.current);
        self.document.set_url(url);
        if let Some(element) = self.document.query_mut(&self.mount) {
            element.content = Some(content);
        }
    }

    /// App shell around a resolved view
    fn render_root(&self, resolution: &Resolution<View>) -> Markup {
        let home = self.routing.href_for(LIST_ROUTE, &Default::default());
        html! {
            header {
                nav {
                    a href=(home) { (self.title) }
                }
            }
            main data-path=(resolution.path) {
                (resolution.view.render(resolution, &self.routing))
            }
        }
    }

    /// Markup of the mount element's content
    pub fn render_view(&self) -> Markup {
        self.render_root(&self.current)
    }

    /// The whole document, as currently mounted
    pub fn render(&self) -> Markup {
        self.document.render()
    }

    /// Renders the page for `url` without navigating
    ///
    /// Used to answer many independent requests from one mounted app.
    pub fn render_url(&self, url: &str) -> Result<Page, RouteError> {
        let (location, resolution) = self.resolve_location(self.routing.location(url))?;
        let content = self.render_root(&resolution);
        let html = self.document.render_with(&self.mount, &content).into_string();
        Ok(Page {
            location,
            resolution,
            html,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouterConfig;
    use crate::plugin::RouterPlugin;
    use crate::routes::build_router;
    use character_router::HistoryMode;

    fn mounted(url: &str) -> MountedApp {
        let selector: Selector = "#app".parse().unwrap();
        App::new("Characters")
            .use_plugin(RouterPlugin::new(
                build_router(&RouterConfig::default()),
                HistoryMode::web("/"),
            ))
            .mount("#app", Document::shell(url, "Characters", &selector))
            .unwrap()
    }

    #[test]
    fn test_failed_push_keeps_current_view() {
        let router = character_router::Router::new()
            .with_route(character_router::Route::view("/characters", View::CharacterList));
        let selector: Selector = "#app".parse().unwrap();
        let mut app = App::new("Characters")
            .use_plugin(RouterPlugin::new(router, HistoryMode::web("/")))
            .mount("#app", Document::shell("/characters", "Characters", &selector))
            .unwrap();

        let err = app.push("/nowhere").unwrap_err();
        assert_eq!(err, RouteError::NoMatch { path: "/nowhere".to_string() });
        assert_eq!(app.current().view, View::CharacterList);
        assert_eq!(app.history().entries(), ["/characters"]);
    }

    #[test]
    fn test_queued_events_run_in_order() {
        let mut app = mounted("/characters");
        app.enqueue(NavigationEvent::Push("/characters/1".to_string()));
        app.enqueue(NavigationEvent::Push("/characters/2".to_string()));
        app.enqueue(NavigationEvent::Back);
        assert_eq!(app.pending(), 3);

        app.process_pending().unwrap();
        assert_eq!(app.pending(), 0);
        assert_eq!(app.current().param("id"), Some("1"));
        assert_eq!(app.history().position(), 1);
    }

    #[test]
    fn test_back_at_start_is_noop() {
        let mut app = mounted("/characters");
        let current = app.navigate(NavigationEvent::Back).unwrap();
        assert_eq!(current.view, View::CharacterList);
    }
}
