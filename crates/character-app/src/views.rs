// File: src/views.rs
// Purpose: Presentational views the route table points at

use character_router::Resolution;
use maud::{html, Markup};
use serde::Serialize;

use crate::plugin::Routing;
use crate::routes::LIST_ROUTE;

/// Identifier of a renderable view
///
/// Routes carry one of these as their target; rendering switches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    CharacterList,
    CharacterDetail,
    NotFound,
}

impl View {
    /// Stable name, also used as the `data-view` attribute
    pub fn name(self) -> &'static str {
        match self {
            View::CharacterList => "character-list",
            View::CharacterDetail => "character-detail",
            View::NotFound => "not-found",
        }
    }

    pub fn is_not_found(self) -> bool {
        self == View::NotFound
    }

    /// Renders this view for a resolved location
    pub fn render(self, resolution: &Resolution<View>, routing: &Routing) -> Markup {
        let list_href = routing.href_for(LIST_ROUTE, &Default::default());

        match self {
            View::CharacterList => html! {
                section.character-list data-view=(self.name()) {
                    h1 { "Characters" }
                    p { "Pick a character to see their details." }
                }
            },
            View::CharacterDetail => {
                let id = resolution.param("id").unwrap_or_default();
                html! {
                    section.character-detail data-view=(self.name()) data-id=(id) {
                        h1 { "Character " (id) }
                        a href=(list_href) { "Back to characters" }
                    }
                }
            }
            View::NotFound => {
                let missing = format!("/{}", resolution.param("pathMatch").unwrap_or_default());
                html! {
                    section.not-found data-view=(self.name()) {
                        h1 { "Page not found" }
                        p { "Nothing lives at " code { (missing) } "." }
                        a href=(list_href) { "Go to characters" }
                    }
                }
            }
        }
    }
}
