//! PostgREST query construction for the highlights table.

use crate::filters::FilterSelection;

/// A single column constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `column = value`
    Eq { column: &'static str, value: String },
    /// Array column contains every listed value.
    Contains {
        column: &'static str,
        values: Vec<String>,
    },
    /// Case-insensitive substring match.
    ILikeSubstring { column: &'static str, needle: String },
}

impl Filter {
    /// The `(column, operator.value)` pair PostgREST expects.
    #[must_use]
    pub fn to_param(&self) -> (String, String) {
        match self {
            Self::Eq { column, value } => ((*column).to_string(), format!("eq.{value}")),
            Self::Contains { column, values } => {
                let items: Vec<String> = values.iter().map(|v| array_item(v)).collect();
                ((*column).to_string(), format!("cs.{{{}}}", items.join(",")))
            }
            Self::ILikeSubstring { column, needle } => (
                (*column).to_string(),
                format!("ilike.%{}%", escape_like(needle)),
            ),
        }
    }
}

/// Sort direction on a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub column: &'static str,
    pub descending: bool,
}

impl Order {
    fn to_param(self) -> String {
        let dir = if self.descending { "desc" } else { "asc" };
        format!("{}.{dir}", self.column)
    }
}

/// A read query against the highlights table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightQuery {
    pub select: &'static str,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
}

impl HighlightQuery {
    /// Unfiltered read of the columns the filter dropdowns are built from.
    #[must_use]
    pub fn filter_columns() -> Self {
        Self {
            select: "game,tags",
            filters: Vec::new(),
            order: None,
        }
    }

    /// Newest-first read of full rows, constrained by every non-empty part
    /// of the selection.
    #[must_use]
    pub fn for_selection(selection: &FilterSelection) -> Self {
        let mut filters = Vec::new();
        if let Some(game) = selection.game() {
            filters.push(Filter::Eq {
                column: "game",
                value: game.to_string(),
            });
        }
        if let Some(tag) = selection.tag() {
            filters.push(Filter::Contains {
                column: "tags",
                values: vec![tag.to_string()],
            });
        }
        if let Some(user) = selection.user() {
            filters.push(Filter::ILikeSubstring {
                column: "username",
                needle: user.to_string(),
            });
        }

        Self {
            select: "*",
            filters,
            order: Some(Order {
                column: "created_at",
                descending: true,
            }),
        }
    }

    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.filters.is_empty()
    }

    /// Query-string pairs in a stable order: select, filters, order.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), self.select.to_string())];
        pairs.extend(self.filters.iter().map(Filter::to_param));
        if let Some(order) = self.order {
            pairs.push(("order".to_string(), order.to_param()));
        }
        pairs
    }
}

/// Quote a value for a Postgres array literal when it contains characters
/// that would otherwise split or terminate the literal.
fn array_item(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| matches!(c, ',' | '{' | '}' | '"' | '\\' | '(' | ')') || c.is_whitespace());
    if needs_quotes {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

/// Escape LIKE wildcards so user input only ever matches literally.
fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
