//! Error banner shown when the highlight query fails.

use maud::{html, Markup, Render};

use super::icons;

/// A banner with a title, the failure message, and an optional hint.
///
/// # Example
///
/// ```ignore
/// use crate::components::alert::ErrorBanner;
///
/// let banner = ErrorBanner::new("Error Loading Highlights", "permission denied")
///     .with_hint("Check the row-level security policies.");
/// ```
#[derive(Debug, Clone)]
pub struct ErrorBanner<'a> {
    pub title: &'a str,
    pub message: &'a str,
    pub hint: Option<&'a str>,
}

impl<'a> ErrorBanner<'a> {
    #[must_use]
    pub const fn new(title: &'a str, message: &'a str) -> Self {
        Self {
            title,
            message,
            hint: None,
        }
    }

    #[must_use]
    pub const fn with_hint(mut self, hint: &'a str) -> Self {
        self.hint = Some(hint);
        self
    }
}

impl Render for ErrorBanner<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="error-banner" role="alert" {
                div class="error-icon" { (icons::alert()) }
                div {
                    h3 { (self.title) }
                    p class="error-message" { (self.message) }
                    @if let Some(hint) = self.hint {
                        p class="error-hint" { (hint) }
                    }
                }
            }
        }
    }
}
