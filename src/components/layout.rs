//! Base layout components for the web UI.
//!
//! This module provides the HTML skeleton and the page header.

use maud::{html, Markup, DOCTYPE};

use super::icons;

/// Base page layout builder.
///
/// # Example
///
/// ```ignore
/// use maud::html;
/// use crate::components::layout::BaseLayout;
///
/// let content = html! { h2 { "Hello World" } };
/// let page = BaseLayout::new("Discord Memo Estz").render(content);
/// ```
#[derive(Debug, Clone)]
pub struct BaseLayout<'a> {
    title: &'a str,
    tagline: Option<&'a str>,
}

impl<'a> BaseLayout<'a> {
    /// Create a new base layout with the given site title.
    #[must_use]
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            tagline: None,
        }
    }

    /// Set the line shown under the title.
    #[must_use]
    pub fn with_tagline(mut self, tagline: &'a str) -> Self {
        self.tagline = Some(tagline);
        self
    }

    /// Render the complete HTML page with the given content.
    ///
    /// The content will be placed inside the `<main class="container">` element.
    #[must_use]
    pub fn render(self, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    meta name="description" content="Your Discord highlights, archived and browsable.";
                    title { (self.title) }
                    link rel="stylesheet" href="/static/css/gallery.css";
                    link rel="icon" href="/favicon.ico";
                }
                body {
                    div class="backdrop-orbs" aria-hidden="true" {
                        div class="orb orb-1" {}
                        div class="orb orb-2" {}
                        div class="orb orb-3" {}
                    }
                    (self.render_header())
                    main class="container" {
                        (content)
                    }
                    script src="/static/js/gallery.js" defer {}
                }
            }
        }
    }

    /// Render the sticky page header.
    fn render_header(&self) -> Markup {
        html! {
            header class="site-header" {
                div class="container header-inner" {
                    div class="header-title" {
                        a href="/" class="logo" title="Back to all highlights" { (icons::film()) }
                        h1 class="site-title" { (self.title) }
                    }
                    @if let Some(tagline) = self.tagline {
                        div class="header-tagline" {
                            (icons::sparkles())
                            p { (tagline) }
                            (icons::sparkles())
                        }
                    }
                }
            }
        }
    }
}
