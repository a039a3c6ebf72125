//! Maud HTML template components for the gallery UI.
//!
//! Components are organized into submodules by functionality:
//!
//! - `layout`: Base page layout and header
//! - `alert`: Error banner
//! - `card`: Highlight cards, the grid, the modal, and the empty state
//! - `form`: Filter form elements
//! - `media`: Video, image, and placeholder media components
//! - `icons`: Inline SVG icons
//!
//! # Example
//!
//! ```ignore
//! use maud::{html, Markup};
//! use crate::components::{BaseLayout, EmptyState};
//!
//! fn empty_page() -> Markup {
//!     BaseLayout::new("Gallery").render(html! { (EmptyState::new(false)) })
//! }
//! ```

pub mod alert;
pub mod card;
pub mod form;
pub mod icons;
pub mod layout;
pub mod media;

pub use alert::ErrorBanner;
pub use card::{CardEvent, CardState, EmptyState, HighlightCard, HighlightGrid, MediaAction};
pub use form::{Form, Input, Label, Select, SelectOption};
pub use layout::BaseLayout;
pub use media::{proxied_src, ImageViewer, NoMedia, VideoMode, VideoPlayer};
