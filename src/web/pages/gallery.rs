//! The gallery page: filter panel, status area, and the highlight grid.

use maud::{html, Markup, Render};

use crate::components::{
    icons, BaseLayout, CardState, EmptyState, ErrorBanner, Form, HighlightCard, HighlightGrid,
    Input, Label, Select, SelectOption,
};
use crate::constants::{SITE_TAGLINE, STORE_ERROR_HINT};
use crate::filters::{FilterOptions, FilterSelection};
use crate::orchestrator::GalleryState;

/// Everything the gallery page is rendered from.
#[derive(Debug)]
pub struct GalleryPageParams<'a> {
    pub site_title: &'a str,
    pub selection: &'a FilterSelection,
    pub options: &'a FilterOptions,
    pub state: &'a GalleryState,
    /// Id of the highlight whose modal is open.
    pub open: Option<&'a str>,
}

/// The collapsible filter panel.
#[derive(Debug)]
pub struct FilterPanel<'a> {
    pub selection: &'a FilterSelection,
    pub options: &'a FilterOptions,
}

impl<'a> FilterPanel<'a> {
    #[must_use]
    pub fn new(selection: &'a FilterSelection, options: &'a FilterOptions) -> Self {
        Self { selection, options }
    }

    fn game_select(&self) -> Select<'a> {
        let options: Vec<SelectOption> = self
            .options
            .games
            .iter()
            .map(|game| {
                let label = if game.is_empty() { "All Games" } else { game.as_str() };
                SelectOption::new(game, label)
            })
            .collect();

        Select::new("game")
            .id("gameFilter")
            .class("filter-input")
            .options(options)
            .selected(self.selection.game().unwrap_or_default())
            .autosubmit()
    }

    fn tag_select(&self) -> Select<'a> {
        let options: Vec<SelectOption> = self
            .options
            .tags
            .iter()
            .map(|tag| {
                let label = if tag.is_empty() {
                    "All Tags".to_string()
                } else {
                    format!("#{tag}")
                };
                SelectOption::new(tag, label)
            })
            .collect();

        Select::new("tag")
            .id("tagFilter")
            .class("filter-input")
            .options(options)
            .selected(self.selection.tag().unwrap_or_default())
            .autosubmit()
    }
}

impl Render for FilterPanel<'_> {
    fn render(&self) -> Markup {
        let user = Input::text("user")
            .id("userFilter")
            .class("filter-input")
            .placeholder("Search username...")
            .autocomplete("off")
            .value_opt(self.selection.user())
            .autosubmit();

        let fields = html! {
            div class="filter-grid" {
                div class="filter-field" {
                    (Label::new("gameFilter", "Game").icon("🎮"))
                    (self.game_select())
                }
                div class="filter-field" {
                    (Label::new("tagFilter", "Tag").icon("🏷️"))
                    (self.tag_select())
                }
                div class="filter-field" {
                    (Label::new("userFilter", "User").icon("👤"))
                    (user)
                }
            }
            noscript {
                div class="filter-actions" {
                    button type="submit" class="apply-filters" { "Apply" }
                }
            }
            @if self.selection.is_filtering() {
                div class="filter-actions" {
                    a href="/" class="clear-filters" {
                        (icons::close())
                        "Clear Filters"
                    }
                }
            }
        };

        html! {
            details class="filter-panel" open {
                summary class="filter-summary" {
                    span class="filter-summary-title" {
                        span class="filter-badge" { (icons::filter()) }
                        span { "Filters & Search" }
                    }
                    (icons::chevron())
                }
                (Form::get("/", fields).id("filters").class("filter-form"))
            }
        }
    }
}

fn render_loading(visible: bool) -> Markup {
    html! {
        div class="loading-indicator" hidden[!visible] data-loading {
            div class="spinner" {}
            div class="loading-text" {
                (icons::sparkles())
                p { "Loading your epic moments..." }
                (icons::sparkles())
            }
        }
    }
}

fn render_results(params: &GalleryPageParams) -> Markup {
    let results = &params.state.results;
    let close_href = params.selection.to_href(&[]);

    let cards: Vec<HighlightCard> = results
        .iter()
        .map(|h| {
            let state = if params.open == Some(h.id.as_str()) {
                CardState::ModalOpen
            } else {
                CardState::default()
            };
            HighlightCard::new(h)
                .with_state(state)
                .with_links(
                    params.selection.to_href(&[("open", h.id.as_str())]),
                    close_href.clone(),
                )
        })
        .collect();

    html! {
        div class="result-count" {
            div class="result-count-icon" { (icons::collection()) }
            p {
                "Found "
                span class="count" { (results.len()) }
                " highlight"
                @if results.len() != 1 { "s" }
            }
        }
        (HighlightGrid::new(cards))
    }
}

/// Render the full gallery page.
#[must_use]
pub fn render_gallery_page(params: &GalleryPageParams) -> Markup {
    let state = params.state;

    let content = html! {
        (FilterPanel::new(params.selection, params.options))
        (render_loading(state.is_loading))

        @if let Some(error) = &state.error {
            (ErrorBanner::new("Error Loading Highlights", error).with_hint(STORE_ERROR_HINT))
        } @else if !state.is_loading {
            @if state.results.is_empty() {
                (EmptyState::new(params.selection.is_filtering()))
            } @else {
                (render_results(params))
            }
        }
    };

    BaseLayout::new(params.site_title)
        .with_tagline(SITE_TAGLINE)
        .render(content)
}
