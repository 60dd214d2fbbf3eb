//! In-memory model of the news container element

use crate::content::NewsItem;

/// A child of the news container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Markup that was already in the page
    Markup(String),

    /// One rendered news entry
    NewsBox {
        index: usize,
        item: NewsItem,
        date_label: String,
    },

    /// A plain user-facing message, e.g. the load failure notice
    Message(String),
}

impl Element {
    /// Create the box for the `index`-th item (1-based)
    pub fn news_box(index: usize, item: NewsItem, date_label: impl Into<String>) -> Self {
        Element::NewsBox {
            index,
            item,
            date_label: date_label.into(),
        }
    }

    /// Element id of a news box, used by scroll observers
    pub fn dom_id(&self) -> Option<String> {
        match self {
            Element::NewsBox { index, .. } => Some(format!("news-item-{}", index)),
            _ => None,
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            Element::Markup(markup) => markup.clone(),
            Element::Message(text) => format!("<p>{}</p>", text),
            Element::NewsBox {
                index,
                item,
                date_label,
            } => {
                let date = if item.has_date() {
                    format!(
                        "\n    <div class=\"news-date\">{}{}</div>",
                        date_label, item.published
                    )
                } else {
                    String::new()
                };
                format!(
                    "<div class=\"news-box\" id=\"news-item-{}\">\n    <h3>{}</h3>\n    <div class=\"news-content styled-content\">{}</div>{}\n</div>",
                    index, item.title, item.body_html, date
                )
            }
        }
    }
}

/// Children of the element identified by `id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    id: String,
    children: Vec<Element>,
}

impl Container {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
        }
    }

    /// Wrap existing inner HTML; blank content yields an empty container
    pub fn from_markup(id: impl Into<String>, markup: &str) -> Self {
        let mut container = Self::new(id);
        let markup = markup.trim();
        if !markup.is_empty() {
            container.children.push(Element::Markup(markup.to_string()));
        }
        container
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn append(&mut self, element: Element) {
        self.children.push(element);
    }

    /// Drop all children and show a single element instead
    pub fn replace_with(&mut self, element: Element) {
        self.children.clear();
        self.children.push(element);
    }

    /// Number of news boxes currently held
    pub fn news_box_count(&self) -> usize {
        self.children
            .iter()
            .filter(|child| matches!(child, Element::NewsBox { .. }))
            .count()
    }

    pub fn to_html(&self) -> String {
        self.children
            .iter()
            .map(Element::to_html)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
