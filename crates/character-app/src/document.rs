// File: src/document.rs
// Purpose: The host page the app mounts into

use std::fmt;
use std::str::FromStr;

use maud::{html, Markup, DOCTYPE};

use crate::error::MountError;

/// An `#id` selector naming a mount point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    id: String,
}

impl Selector {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl FromStr for Selector {
    type Err = MountError;

    /// ```
    /// use character_app::Selector;
    ///
    /// let selector: Selector = "#app".parse().unwrap();
    /// assert_eq!(selector.id(), "app");
    /// assert!("app".parse::<Selector>().is_err());
    /// assert!("#".parse::<Selector>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .trim()
            .strip_prefix('#')
            .filter(|id| {
                !id.is_empty()
                    && id
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            })
            .ok_or_else(|| MountError::InvalidSelector(s.to_string()))?;

        Ok(Selector { id: id.to_string() })
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id)
    }
}

/// A top-level element of the page body
#[derive(Debug, Clone)]
pub struct Element {
    pub id: String,
    pub content: Option<Markup>,
}

/// The page: its URL, title and body elements
#[derive(Debug, Clone)]
pub struct Document {
    url: String,
    title: String,
    elements: Vec<Element>,
}

impl Document {
    /// An empty page at `url`
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            elements: Vec::new(),
        }
    }

    /// The usual single-page shell: one empty element to mount into
    pub fn shell(url: impl Into<String>, title: impl Into<String>, mount: &Selector) -> Self {
        Self::new(url, title).with_element(mount.id())
    }

    /// Appends an empty body element
    pub fn with_element(mut self, id: impl Into<String>) -> Self {
        self.elements.push(Element {
            id: id.into(),
            content: None,
        });
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Element matching `selector`, if present
    pub fn query(&self, selector: &Selector) -> Option<&Element> {
        self.elements.iter().find(|element| element.id == selector.id())
    }

    pub fn query_mut(&mut self, selector: &Selector) -> Option<&mut Element> {
        self.elements
            .iter_mut()
            .find(|element| element.id == selector.id())
    }

    /// Renders the whole page
    pub fn render(&self) -> Markup {
        self.render_elements(None)
    }

    /// Renders the page with `content` in place of the selected element's
    /// children, leaving the document itself untouched
    pub fn render_with(&self, selector: &Selector, content: &Markup) -> Markup {
        self.render_elements(Some((selector, content)))
    }

    fn render_elements(&self, replace: Option<(&Selector, &Markup)>) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (self.title) }
                }
                body {
                    @for element in &self.elements {
                        div id=(element.id) {
                            @if let Some(content) = content_of(element, replace) {
                                (content)
                            }
                        }
                    }
                }
            }
        }
    }
}

fn content_of<'a>(
    element: &'a Element,
    replace: Option<(&Selector, &'a Markup)>,
) -> Option<&'a Markup> {
    match replace {
        Some((selector, content)) if selector.id() == element.id => Some(content),
        _ => element.content.as_ref(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_rejects_non_id_selectors() {
        for input in ["app", ".app", "#", "#a b", "div#app", ""] {
            assert_eq!(
                input.parse::<Selector>(),
                Err(MountError::InvalidSelector(input.to_string())),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_selector_display() {
        let selector: Selector = "#app".parse().unwrap();
        assert_eq!(selector.to_string(), "#app");
    }

    #[test]
    fn test_query_finds_elements() {
        let selector: Selector = "#app".parse().unwrap();
        let document = Document::shell("/", "Characters", &selector);
        assert!(document.query(&selector).is_some());
        assert!(document.query(&"#other".parse().unwrap()).is_none());
    }

    #[test]
    fn test_render_empty_shell() {
        let selector: Selector = "#app".parse().unwrap();
        let html = Document::shell("/", "Characters", &selector)
            .render()
            .into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Characters</title>"));
        assert!(html.contains(r#"<div id="app"></div>"#));
    }

    #[test]
    fn test_render_with_leaves_document_alone() {
        let selector: Selector = "#app".parse().unwrap();
        let document = Document::shell("/", "Characters", &selector);
        let html = document
            .render_with(&selector, &html! { p { "hi" } })
            .into_string();
        assert!(html.contains(r#"<div id="app"><p>hi</p></div>"#));
        assert!(document.query(&selector).unwrap().content.is_none());
    }
}
