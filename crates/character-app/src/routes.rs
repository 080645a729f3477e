// File: src/routes.rs
// Purpose: The application's route table

use character_router::{Route, Router};

use crate::config::RouterConfig;
use crate::views::View;

/// Name of the list route, for links back to it
pub const LIST_ROUTE: &str = "characters";
/// Name of the detail route
pub const DETAIL_ROUTE: &str = "character";

/// Route table, in matching order
///
/// | Pattern | Target |
/// |---|---|
/// | `/` | redirect to `/characters` |
/// | `/characters` | `View::CharacterList` |
/// | `/characters/:id` | `View::CharacterDetail` |
/// | `/*pathMatch` | `View::NotFound` |
///
/// The catch-all has to stay last.
pub fn route_table() -> Vec<Route<View>> {
    vec![
        Route::redirect("/", "/characters"),
        Route::view("/characters", View::CharacterList).with_name(LIST_ROUTE),
        Route::view("/characters/:id", View::CharacterDetail).with_name(DETAIL_ROUTE),
        Route::view("/:pathMatch(.*)*", View::NotFound),
    ]
}

/// Builds the router over `route_table()` with the configured options
pub fn build_router(config: &RouterConfig) -> Router<View> {
    Router::new()
        .with_case_sensitivity(config.case_insensitive)
        .with_max_redirects(config.max_redirects)
        .with_routes(route_table())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catch_all_is_last() {
        let table = route_table();
        let (last, rest) = table.split_last().unwrap();
        assert!(last.has_catch_all);
        assert!(rest.iter().all(|route| !route.has_catch_all));
    }

    #[test]
    fn test_build_router_applies_config() {
        let config = RouterConfig {
            case_insensitive: true,
            max_redirects: 2,
            ..RouterConfig::default()
        };
        let router = build_router(&config);
        assert!(router.is_case_insensitive());
        assert_eq!(router.max_redirects(), 2);
        assert_eq!(router.routes().len(), 4);
    }
}
