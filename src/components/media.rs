//! Media display components for highlight videos and images.
//!
//! Images are always loaded through the `/media` proxy, which only fetches
//! from allow-listed hosts. Videos are streamed straight from their source.

use maud::{html, Markup, Render};
use urlencoding::encode;

use super::icons;

/// Path of the image proxy for a remote URL.
#[must_use]
pub fn proxied_src(url: &str) -> String {
    format!("/media?url={}", encode(url))
}

/// How a video element is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoMode {
    /// Muted looping preview inside a card, played on hover.
    Preview,
    /// Full player inside the modal.
    Focused,
}

/// Video player component.
#[derive(Debug, Clone)]
pub struct VideoPlayer<'a> {
    /// Source URL for the video
    pub src: &'a str,
    pub mode: VideoMode,
}

impl<'a> VideoPlayer<'a> {
    #[must_use]
    pub fn preview(src: &'a str) -> Self {
        Self {
            src,
            mode: VideoMode::Preview,
        }
    }

    #[must_use]
    pub fn focused(src: &'a str) -> Self {
        Self {
            src,
            mode: VideoMode::Focused,
        }
    }

    /// Infer the video MIME type from the source URL extension.
    fn inferred_type(&self) -> &'static str {
        let extension = self.src.rsplit('.').next().unwrap_or("").to_lowercase();

        match extension.as_str() {
            "webm" => "video/webm",
            "mkv" => "video/x-matroska",
            "mov" => "video/quicktime",
            _ => "video/mp4",
        }
    }
}

impl Render for VideoPlayer<'_> {
    fn render(&self) -> Markup {
        let video_type = self.inferred_type();

        match self.mode {
            VideoMode::Preview => html! {
                video class="card-video" preload="metadata" muted loop playsinline {
                    source src=(self.src) type=(video_type);
                }
                div class="play-overlay" { (icons::play()) }
            },
            VideoMode::Focused => html! {
                video class="modal-video" controls autoplay loop playsinline {
                    source src=(self.src) type=(video_type);
                    "Your browser does not support the video tag."
                }
            },
        }
    }
}

/// Image viewer component.
#[derive(Debug, Clone)]
pub struct ImageViewer<'a> {
    /// Remote URL of the image
    pub src: &'a str,
    /// Alt text for accessibility
    pub alt: &'a str,
    /// Optional CSS class(es) to add
    pub class: Option<&'a str>,
    /// Whether to use lazy loading
    pub lazy: bool,
}

impl<'a> ImageViewer<'a> {
    /// Create a new image viewer.
    #[must_use]
    pub fn new(src: &'a str, alt: &'a str) -> Self {
        Self {
            src,
            alt,
            class: None,
            lazy: true,
        }
    }

    /// Add CSS class(es) to the image.
    #[must_use]
    pub fn with_class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }

    /// Enable or disable lazy loading.
    #[must_use]
    pub fn lazy(mut self, lazy: bool) -> Self {
        self.lazy = lazy;
        self
    }
}

impl Render for ImageViewer<'_> {
    fn render(&self) -> Markup {
        let loading = if self.lazy { Some("lazy") } else { None };

        html! {
            img src=(proxied_src(self.src)) alt=(self.alt) class=[self.class] loading=[loading];
        }
    }
}

/// Placeholder for highlights without media.
#[derive(Debug, Clone, Copy)]
pub struct NoMedia;

impl Render for NoMedia {
    fn render(&self) -> Markup {
        html! {
            div class="no-media" { "No media" }
        }
    }
}
