//! Form components for the filter panel.
//!
//! Elements marked `data-autosubmit` submit their form on change; the
//! gallery script wires that up.

use maud::{html, Markup, Render};

/// A form container element.
#[derive(Debug)]
pub struct Form<'a> {
    /// Form action URL
    pub action: &'a str,
    /// HTTP method ("get" or "post")
    pub method: &'a str,
    /// Form content (inputs, buttons, etc.)
    pub content: Markup,
    /// Optional CSS class
    pub class: Option<&'a str>,
    /// Optional form ID
    pub id: Option<&'a str>,
}

impl<'a> Form<'a> {
    /// Create a new form with the given action and method.
    #[must_use]
    pub fn new(action: &'a str, method: &'a str, content: Markup) -> Self {
        Self {
            action,
            method,
            content,
            class: None,
            id: None,
        }
    }

    /// Create a GET form.
    #[must_use]
    pub fn get(action: &'a str, content: Markup) -> Self {
        Self::new(action, "get", content)
    }

    /// Set the CSS class.
    #[must_use]
    pub fn class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }

    /// Set the form ID.
    #[must_use]
    pub fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }
}

impl Render for Form<'_> {
    fn render(&self) -> Markup {
        html! {
            form action=(self.action) method=(self.method) class=[self.class] id=[self.id] {
                (self.content)
            }
        }
    }
}

/// An input element.
#[derive(Debug, Clone)]
pub struct Input<'a> {
    pub name: &'a str,
    pub r#type: &'a str,
    pub value: Option<&'a str>,
    pub placeholder: Option<&'a str>,
    pub id: Option<&'a str>,
    pub class: Option<&'a str>,
    pub autocomplete: Option<&'a str>,
    /// Submit the form once typing pauses.
    pub autosubmit: bool,
}

impl<'a> Input<'a> {
    /// Create a new input with the given name and type.
    #[must_use]
    pub fn new(name: &'a str, r#type: &'a str) -> Self {
        Self {
            name,
            r#type,
            value: None,
            placeholder: None,
            id: None,
            class: None,
            autocomplete: None,
            autosubmit: false,
        }
    }

    /// Create a text input.
    #[must_use]
    pub fn text(name: &'a str) -> Self {
        Self::new(name, "text")
    }

    /// Set the value if Some.
    #[must_use]
    pub fn value_opt(mut self, value: Option<&'a str>) -> Self {
        self.value = value;
        self
    }

    /// Set the placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Set the ID.
    #[must_use]
    pub fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the CSS class.
    #[must_use]
    pub fn class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }

    /// Set the autocomplete attribute.
    #[must_use]
    pub fn autocomplete(mut self, autocomplete: &'a str) -> Self {
        self.autocomplete = Some(autocomplete);
        self
    }

    #[must_use]
    pub fn autosubmit(mut self) -> Self {
        self.autosubmit = true;
        self
    }
}

impl Render for Input<'_> {
    fn render(&self) -> Markup {
        html! {
            input
                type=(self.r#type)
                name=(self.name)
                value=[self.value]
                placeholder=[self.placeholder]
                id=[self.id]
                class=[self.class]
                autocomplete=[self.autocomplete]
                data-autosubmit=[self.autosubmit.then_some("debounce")];
        }
    }
}

/// A select dropdown element.
#[derive(Debug)]
pub struct Select<'a> {
    /// Select name attribute
    pub name: &'a str,
    /// Available options
    pub options: Vec<SelectOption<'a>>,
    /// Currently selected value
    pub selected: Option<&'a str>,
    /// Optional ID attribute
    pub id: Option<&'a str>,
    /// Optional CSS class
    pub class: Option<&'a str>,
    /// Submit the form on change.
    pub autosubmit: bool,
}

impl<'a> Select<'a> {
    /// Create a new select with the given name.
    #[must_use]
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            options: Vec::new(),
            selected: None,
            id: None,
            class: None,
            autosubmit: false,
        }
    }

    /// Add options to the select.
    #[must_use]
    pub fn options(mut self, options: Vec<SelectOption<'a>>) -> Self {
        self.options = options;
        self
    }

    /// Set the selected value.
    #[must_use]
    pub fn selected(mut self, selected: &'a str) -> Self {
        self.selected = Some(selected);
        self
    }

    /// Set the ID.
    #[must_use]
    pub fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the CSS class.
    #[must_use]
    pub fn class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }

    #[must_use]
    pub fn autosubmit(mut self) -> Self {
        self.autosubmit = true;
        self
    }
}

impl Render for Select<'_> {
    fn render(&self) -> Markup {
        html! {
            select
                name=(self.name)
                id=[self.id]
                class=[self.class]
                disabled[self.options.is_empty()]
                data-autosubmit=[self.autosubmit.then_some("change")]
            {
                @for opt in &self.options {
                    option
                        value=(opt.value)
                        selected[self.selected == Some(opt.value)]
                    {
                        (opt.label)
                    }
                }
            }
        }
    }
}

/// An option for a select element.
#[derive(Debug, Clone)]
pub struct SelectOption<'a> {
    /// Option value
    pub value: &'a str,
    /// Option display label
    pub label: String,
}

impl<'a> SelectOption<'a> {
    /// Create a new select option.
    #[must_use]
    pub fn new(value: &'a str, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// A label element for form inputs, with an optional leading emoji.
#[derive(Debug)]
pub struct Label<'a> {
    /// The ID of the input this label is for
    pub r#for: &'a str,
    /// Label text
    pub text: &'a str,
    pub icon: Option<&'a str>,
}

impl<'a> Label<'a> {
    /// Create a new label.
    #[must_use]
    pub fn new(r#for: &'a str, text: &'a str) -> Self {
        Self {
            r#for,
            text,
            icon: None,
        }
    }

    #[must_use]
    pub fn icon(mut self, icon: &'a str) -> Self {
        self.icon = Some(icon);
        self
    }
}

impl Render for Label<'_> {
    fn render(&self) -> Markup {
        html! {
            label for=(self.r#for) class="filter-label" {
                @if let Some(icon) = self.icon {
                    span class="filter-icon" aria-hidden="true" { (icon) }
                }
                span { (self.text) }
            }
        }
    }
}
