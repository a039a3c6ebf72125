//! Highlight cards, the grid they sit in, and the focused (modal) view.
//!
//! Each card is a small state machine: collapsed (optionally hovered) or
//! showing its modal. [`CardState::transition`] is the source of truth for
//! those transitions; the gallery script follows the same table in the
//! browser, and the server renders a card straight into [`CardState::ModalOpen`]
//! when the page is requested with `open=<id>`.

use maud::{html, Markup, Render};

use super::icons;
use super::media::{ImageViewer, NoMedia, VideoPlayer};
use crate::model::{Highlight, MediaKind};

/// Interaction state of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Collapsed { hovered: bool },
    ModalOpen,
}

impl Default for CardState {
    fn default() -> Self {
        Self::Collapsed { hovered: false }
    }
}

/// Something the visitor did to a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardEvent {
    HoverEnter,
    HoverLeave,
    /// Click anywhere on the collapsed card.
    Click,
    CloseClick,
    /// Click on the modal outside the media area.
    BackdropClick,
    /// Click inside the modal's media area.
    MediaClick,
}

/// Side effect on the card's inline video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaAction {
    Play,
    PauseAndRewind,
}

impl CardState {
    /// Apply an event, returning the next state and any inline video action.
    ///
    /// Video actions are only produced for [`MediaKind::Video`] cards.
    #[must_use]
    pub fn transition(self, event: CardEvent, kind: MediaKind) -> (Self, Option<MediaAction>) {
        let video = |action| (kind == MediaKind::Video).then_some(action);

        match (self, event) {
            (Self::Collapsed { .. }, CardEvent::HoverEnter) => (
                Self::Collapsed { hovered: true },
                video(MediaAction::Play),
            ),
            (Self::Collapsed { .. }, CardEvent::HoverLeave) => (
                Self::Collapsed { hovered: false },
                video(MediaAction::PauseAndRewind),
            ),
            (Self::Collapsed { .. }, CardEvent::Click) => (Self::ModalOpen, None),
            (
                Self::ModalOpen,
                CardEvent::Click | CardEvent::CloseClick | CardEvent::BackdropClick,
            ) => (Self::Collapsed { hovered: false }, None),
            // The overlay covers the card, so leaving it stops the preview.
            (Self::ModalOpen, CardEvent::HoverLeave) => {
                (Self::ModalOpen, video(MediaAction::PauseAndRewind))
            }
            (state, _) => (state, None),
        }
    }

    #[must_use]
    pub fn is_modal_open(self) -> bool {
        self == Self::ModalOpen
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Collapsed { hovered: false } => "collapsed",
            Self::Collapsed { hovered: true } => "hovered",
            Self::ModalOpen => "modal-open",
        }
    }
}

/// A card for one highlight.
#[derive(Debug, Clone)]
pub struct HighlightCard<'a> {
    pub highlight: &'a Highlight,
    pub state: CardState,
    /// Link that opens this card's modal without script.
    pub open_href: String,
    /// Link that closes the modal.
    pub close_href: String,
}

impl<'a> HighlightCard<'a> {
    #[must_use]
    pub fn new(highlight: &'a Highlight) -> Self {
        Self {
            highlight,
            state: CardState::default(),
            open_href: format!("/?open={}", urlencoding::encode(&highlight.id)),
            close_href: "/".to_string(),
        }
    }

    #[must_use]
    pub fn with_state(mut self, state: CardState) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn with_links(mut self, open_href: String, close_href: String) -> Self {
        self.open_href = open_href;
        self.close_href = close_href;
        self
    }

    /// Media area of the collapsed card.
    fn render_preview(&self, kind: MediaKind, alt: &str) -> Markup {
        match (self.highlight.primary_media(), kind) {
            (None, _) | (_, MediaKind::None) => NoMedia.render(),
            (Some(url), MediaKind::Video) => VideoPlayer::preview(url).render(),
            // Anything else falls back to an image attempt.
            (Some(url), _) => ImageViewer::new(url, alt).with_class("card-image").render(),
        }
    }

    /// Media shown inside the modal; unknown kinds render nothing.
    fn render_focused(&self, kind: MediaKind, alt: &str) -> Markup {
        match (self.highlight.primary_media(), kind) {
            (Some(url), MediaKind::Video) => VideoPlayer::focused(url).render(),
            (Some(url), MediaKind::Image) => html! {
                div class="modal-image" {
                    (ImageViewer::new(url, alt).lazy(false).with_class("modal-img"))
                }
            },
            _ => html! {},
        }
    }

    fn render_modal(&self, kind: MediaKind, alt: &str) -> Markup {
        html! {
            div class="modal" role="dialog" aria-modal="true" aria-label=(alt) data-modal {
                a class="modal-backdrop" href=(self.close_href) aria-label="Close" data-modal-close {}
                a class="modal-close" href=(self.close_href) aria-label="Close" data-modal-close {
                    (icons::close())
                }
                div class="modal-media" data-modal-media {
                    (self.render_focused(kind, alt))
                }
            }
        }
    }
}

impl Render for HighlightCard<'_> {
    fn render(&self) -> Markup {
        let h = self.highlight;
        let kind = h.media_kind();
        let alt = h.alt_text();

        html! {
            article
                class="highlight-card"
                id=(format!("highlight-{}", h.id))
                data-state=(self.state.as_str())
                data-media-kind=(kind.as_str())
                data-media-url=[h.primary_media()]
                data-alt=(alt)
            {
                a class="card-link" href=(self.open_href) data-card-toggle {
                    div class="card-media" {
                        (self.render_preview(kind, &alt))
                        div class="card-media-shade" {}
                    }
                    div class="card-body" {
                        div class="card-text" {
                            @if let Some(game) = &h.game {
                                p class="card-game" title=(game) { (game) }
                            }
                            @if let Some(content) = &h.content {
                                p class="card-content" title=(content) { (content) }
                            }
                            @if !h.tags().is_empty() {
                                div class="card-tags" {
                                    @for tag in h.tags() {
                                        span class="tag-chip" { "#" (tag) }
                                    }
                                }
                            }
                        }
                        div class="card-footer" {
                            span class="card-author" { "By " (h.username) }
                            time class="card-date" datetime=(h.created_at) { (h.formatted_date()) }
                        }
                    }
                }
                @if self.state.is_modal_open() {
                    (self.render_modal(kind, &alt))
                }
            }
        }
    }
}

/// A grid container for highlight cards.
#[derive(Debug, Clone)]
pub struct HighlightGrid<'a> {
    pub cards: Vec<HighlightCard<'a>>,
}

impl<'a> HighlightGrid<'a> {
    #[must_use]
    pub fn new(cards: Vec<HighlightCard<'a>>) -> Self {
        Self { cards }
    }
}

impl Render for HighlightGrid<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="highlight-grid" {
                @for card in &self.cards {
                    (card)
                }
            }
        }
    }
}

/// Shown when a query returns no highlights.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub filtering: bool,
}

impl EmptyState {
    #[must_use]
    pub const fn new(filtering: bool) -> Self {
        Self { filtering }
    }
}

impl Render for EmptyState {
    fn render(&self) -> Markup {
        let message = if self.filtering {
            "Try adjusting your filters to see more results."
        } else {
            "Start sharing your epic gaming moments in Discord!"
        };

        html! {
            div class="empty-state" {
                div class="empty-icon" { (icons::video_camera()) }
                h3 { "No Highlights Yet" }
                p { (message) }
                div class="empty-hint" { "Post clips with !memo in your Discord server" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(media_urls: &[&str]) -> Highlight {
        Highlight {
            id: "h1".to_string(),
            media_urls: media_urls.iter().map(|s| (*s).to_string()).collect(),
            game: Some("Chess".to_string()),
            tags: Some(vec!["clutch".to_string(), "win".to_string()]),
            username: "magnus".to_string(),
            created_at: "2024-01-05T10:00:00+00:00".to_string(),
            content: Some("mate in one".to_string()),
        }
    }

    #[test]
    fn test_hover_plays_and_rewinds_video() {
        let state = CardState::default();
        let (state, action) = state.transition(CardEvent::HoverEnter, MediaKind::Video);
        assert_eq!(state, CardState::Collapsed { hovered: true });
        assert_eq!(action, Some(MediaAction::Play));

        let (state, action) = state.transition(CardEvent::HoverLeave, MediaKind::Video);
        assert_eq!(state, CardState::Collapsed { hovered: false });
        assert_eq!(action, Some(MediaAction::PauseAndRewind));
    }

    #[test]
    fn test_hover_on_image_has_no_action() {
        let (state, action) =
            CardState::default().transition(CardEvent::HoverEnter, MediaKind::Image);
        assert_eq!(state, CardState::Collapsed { hovered: true });
        assert_eq!(action, None);
    }

    #[test]
    fn test_click_toggles_modal() {
        let (state, _) = CardState::default().transition(CardEvent::Click, MediaKind::Image);
        assert_eq!(state, CardState::ModalOpen);
        let (state, _) = state.transition(CardEvent::Click, MediaKind::Image);
        assert_eq!(state, CardState::default());
    }

    #[test]
    fn test_modal_closes_on_backdrop_and_close_button() {
        for event in [CardEvent::BackdropClick, CardEvent::CloseClick] {
            let (state, _) = CardState::ModalOpen.transition(event, MediaKind::Video);
            assert_eq!(state, CardState::Collapsed { hovered: false });
        }
    }

    #[test]
    fn test_media_click_keeps_modal_open() {
        let (state, action) = CardState::ModalOpen.transition(CardEvent::MediaClick, MediaKind::Video);
        assert_eq!(state, CardState::ModalOpen);
        assert_eq!(action, None);
    }

    #[test]
    fn test_collapsed_ignores_modal_events() {
        let start = CardState::Collapsed { hovered: true };
        for event in [
            CardEvent::CloseClick,
            CardEvent::BackdropClick,
            CardEvent::MediaClick,
        ] {
            assert_eq!(start.transition(event, MediaKind::Video), (start, None));
        }
    }

    #[test]
    fn test_card_without_media_renders_placeholder_only() {
        let h = sample(&[]);
        let html = HighlightCard::new(&h).render().into_string();
        assert!(html.contains("No media"));
        assert!(!html.contains("<img"));
        assert!(!html.contains("<video"));
        assert!(html.contains(r#"data-media-kind="none""#));
        assert!(!html.contains("data-media-url"));
    }

    #[test]
    fn test_card_with_video() {
        let h = sample(&["https://x.test/clip.mp4"]);
        let html = HighlightCard::new(&h).render().into_string();
        assert!(html.contains("<video"));
        assert!(html.contains("play-overlay"));
        assert!(!html.contains("<img"));
        assert!(!html.contains("modal-video"));
    }

    #[test]
    fn test_card_with_unknown_media_falls_back_to_image() {
        let h = sample(&["https://example.com/file"]);
        let html = HighlightCard::new(&h).render().into_string();
        assert!(html.contains("<img"));
        assert!(html.contains(r#"data-media-kind="unknown""#));
    }

    #[test]
    fn test_card_body() {
        let h = sample(&["https://cdn.discordapp.com/a.png"]);
        let html = HighlightCard::new(&h).render().into_string();
        assert!(html.contains(r#"<p class="card-game" title="Chess">Chess</p>"#));
        assert!(html.contains("mate in one"));
        assert!(html.contains(r#"<span class="tag-chip">#clutch</span>"#));
        assert!(html.contains(r#"<span class="tag-chip">#win</span>"#));
        assert!(html.contains("By magnus"));
        assert!(html.contains("Jan 5, 2024"));
        assert!(html.contains(r#"alt="Highlight from Chess""#));
        assert!(html.contains(r#"href="/?open=h1""#));
    }

    #[test]
    fn test_collapsed_card_has_no_modal() {
        let h = sample(&["https://cdn.discordapp.com/a.png"]);
        let html = HighlightCard::new(&h).render().into_string();
        assert!(!html.contains(r#"class="modal""#));
        assert!(html.contains(r#"data-state="collapsed""#));
    }

    #[test]
    fn test_open_card_renders_modal() {
        let h = sample(&["https://x.test/clip.mkv"]);
        let html = HighlightCard::new(&h)
            .with_state(CardState::ModalOpen)
            .with_links("/?game=Chess&open=h1".to_string(), "/?game=Chess".to_string())
            .render()
            .into_string();
        assert!(html.contains(r#"class="modal""#));
        assert!(html.contains(r#"data-state="modal-open""#));
        assert!(html.contains("modal-video"));
        assert!(html.contains(r#"class="modal-close" href="/?game=Chess""#));
    }

    #[test]
    fn test_open_card_with_unknown_media_has_empty_modal() {
        let h = sample(&["https://example.com/file"]);
        let html = HighlightCard::new(&h)
            .with_state(CardState::ModalOpen)
            .render()
            .into_string();
        assert!(html.contains(r#"<div class="modal-media" data-modal-media></div>"#));
    }

    #[test]
    fn test_grid_renders_every_card() {
        let a = sample(&[]);
        let mut b = sample(&[]);
        b.id = "h2".to_string();
        let html = HighlightGrid::new(vec![HighlightCard::new(&a), HighlightCard::new(&b)])
            .render()
            .into_string();
        assert!(html.contains(r#"id="highlight-h1""#));
        assert!(html.contains(r#"id="highlight-h2""#));
    }

    #[test]
    fn test_empty_state_message_depends_on_filtering() {
        let html = EmptyState::new(true).render().into_string();
        assert!(html.contains("Try adjusting your filters"));
        let html = EmptyState::new(false).render().into_string();
        assert!(html.contains("Start sharing your epic gaming moments"));
    }
}
