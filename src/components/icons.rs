//! Inline SVG icons.

use maud::{html, Markup};

fn outline(class: &str, stroke_width: &str, path: &str) -> Markup {
    html! {
        svg class=(class) fill="none" stroke="currentColor" stroke-width=(stroke_width)
            viewBox="0 0 24 24" aria-hidden="true" {
            path stroke-linecap="round" stroke-linejoin="round" d=(path) {}
        }
    }
}

#[must_use]
pub fn film() -> Markup {
    outline(
        "icon icon-lg",
        "2",
        "M7 4v16M17 4v16M3 8h4m10 0h4M3 12h18M3 16h4m10 0h4M4 20h16a1 1 0 001-1V5a1 1 0 00-1-1H4a1 1 0 00-1 1v14a1 1 0 001 1z",
    )
}

#[must_use]
pub fn filter() -> Markup {
    outline(
        "icon",
        "2",
        "M3 4a1 1 0 011-1h16a1 1 0 011 1v2.586a1 1 0 01-.293.707l-6.414 6.414a1 1 0 00-.293.707V17l-4 4v-6.586a1 1 0 00-.293-.707L3.293 7.293A1 1 0 013 6.586V4z",
    )
}

#[must_use]
pub fn chevron() -> Markup {
    outline("icon chevron", "2", "M4.5 15.75l7.5-7.5 7.5 7.5")
}

#[must_use]
pub fn sparkles() -> Markup {
    outline(
        "icon sparkles",
        "2",
        "M5 3v4M3 5h4M6 17v4m-2-2h4m5-16l2.286 6.857L21 12l-5.714 2.143L13 21l-2.286-6.857L5 12l5.714-2.143L13 3z",
    )
}

#[must_use]
pub fn close() -> Markup {
    outline("icon icon-lg", "1.5", "M6 18L18 6M6 6l12 12")
}

#[must_use]
pub fn alert() -> Markup {
    outline(
        "icon icon-lg",
        "2",
        "M12 8v4m0 4h.01M21 12a9 9 0 11-18 0 9 9 0 0118 0z",
    )
}

#[must_use]
pub fn video_camera() -> Markup {
    outline(
        "icon icon-xl",
        "2",
        "M15 10l4.553-2.276A1 1 0 0121 8.618v6.764a1 1 0 01-1.447.894L15 14M5 18h8a2 2 0 002-2V8a2 2 0 00-2-2H5a2 2 0 00-2 2v8a2 2 0 002 2z",
    )
}

#[must_use]
pub fn play() -> Markup {
    html! {
        svg class="icon play-icon" viewBox="0 0 24 24" fill="currentColor" aria-hidden="true" {
            path fill-rule="evenodd" clip-rule="evenodd"
                d="M4.5 5.653c0-1.426 1.529-2.33 2.779-1.643l11.54 6.647c1.295.742 1.295 2.545 0 3.286L7.279 20.99c-1.25.717-2.779-.217-2.779-1.643V5.653z" {}
        }
    }
}

#[must_use]
pub fn collection() -> Markup {
    outline(
        "icon",
        "2",
        "M19 11H5m14 0a2 2 0 012 2v6a2 2 0 01-2 2H5a2 2 0 01-2-2v-6a2 2 0 012-2m14 0V9a2 2 0 00-2-2M5 11V9a2 2 0 012-2m0 0V5a2 2 0 012-2h6a2 2 0 012 2v2M7 7h10",
    )
}
