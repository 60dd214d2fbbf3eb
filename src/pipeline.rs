//! News rendering pipeline
//!
//! Fetches every configured document in order, parses each into a
//! [`NewsItem`] and mounts the resulting boxes into the page's news
//! container. Rendering is all-or-nothing: one failed fetch replaces the
//! container content with a single error message.

use chrono::{DateTime, Local};
use thiserror::Error;
use tokio::sync::oneshot;

use crate::config::NewsConfig;
use crate::content::{ContentResource, NewsItem, NewsParser};
use crate::fetch::{ContentFetcher, FetchError};
use crate::i18n::I18n;
use crate::page::{Element, HtmlPage, PageError};

/// Why a render did not produce news boxes
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("news container #{0} not found")]
    MissingContainer(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Page(#[from] PageError),
}

/// Parsed items in resource-list order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedCollection {
    items: Vec<NewsItem>,
}

impl RenderedCollection {
    pub fn items(&self) -> &[NewsItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<NewsItem> {
        self.items
    }
}

/// Sent once after the first successful render
#[derive(Debug, Clone)]
pub struct RenderNotice {
    pub container_id: String,
    /// Element ids of the inserted news boxes, in order
    pub item_ids: Vec<String>,
    pub rendered_at: DateTime<Local>,
}

/// Localized text the pipeline writes into the page
#[derive(Debug, Clone)]
pub struct RenderStrings {
    pub date_label: String,
    pub load_failed: String,
}

impl RenderStrings {
    pub fn from_i18n(i18n: &I18n) -> Self {
        Self {
            date_label: i18n.get("news.published_label"),
            load_failed: i18n.get("news.load_failed"),
        }
    }
}

/// Composes fetching, parsing and mounting for one container
pub struct NewsPipeline<F> {
    fetcher: F,
    resources: Vec<ContentResource>,
    parser: NewsParser,
    container_id: String,
    strings: RenderStrings,
    notifier: Option<oneshot::Sender<RenderNotice>>,
}

impl<F: ContentFetcher> NewsPipeline<F> {
    pub fn new(
        fetcher: F,
        resources: Vec<ContentResource>,
        parser: NewsParser,
        container_id: impl Into<String>,
        strings: RenderStrings,
    ) -> Self {
        Self {
            fetcher,
            resources,
            parser,
            container_id: container_id.into(),
            strings,
            notifier: None,
        }
    }

    /// Build a pipeline from the `news` settings and the active locale
    pub fn from_config(fetcher: F, news: &NewsConfig, i18n: &I18n) -> Result<Self, regex::Error> {
        let parser = NewsParser::new(&news.patterns(), i18n.get("news.untitled"))?;
        Ok(Self::new(
            fetcher,
            news.files.clone(),
            parser,
            news.container_id.clone(),
            RenderStrings::from_i18n(i18n),
        ))
    }

    pub fn resources(&self) -> &[ContentResource] {
        &self.resources
    }

    /// Get notified when the first successful render has been mounted
    ///
    /// Replaces any earlier subscription.
    pub fn subscribe(&mut self) -> oneshot::Receiver<RenderNotice> {
        let (tx, rx) = oneshot::channel();
        self.notifier = Some(tx);
        rx
    }

    /// Fetch and parse every resource in order, stopping at the first failure
    pub async fn collect(&self) -> Result<RenderedCollection, FetchError> {
        let mut items = Vec::with_capacity(self.resources.len());
        for resource in &self.resources {
            let doc = self.fetcher.fetch(resource).await?;
            tracing::debug!("Fetched {} ({} bytes)", resource, doc.text.len());
            items.push(self.parser.parse(doc));
        }
        Ok(RenderedCollection { items })
    }

    /// Render the news boxes into the page's container
    ///
    /// Without a container the page is left untouched. On a fetch failure
    /// the container holds only the load-failure message.
    pub async fn render(&mut self, page: &mut HtmlPage) -> Result<RenderedCollection, RenderError> {
        let Some(mut container) = page.container(&self.container_id)? else {
            tracing::error!("News container #{} not found", self.container_id);
            return Err(RenderError::MissingContainer(self.container_id.clone()));
        };
        container.clear();

        let collection = match self.collect().await {
            Ok(collection) => collection,
            Err(e) => {
                tracing::error!("Error loading news: {}", e);
                container.replace_with(Element::Message(self.strings.load_failed.clone()));
                page.mount(&container)?;
                return Err(e.into());
            }
        };

        for (i, item) in collection.items().iter().enumerate() {
            container.append(Element::news_box(
                i + 1,
                item.clone(),
                self.strings.date_label.as_str(),
            ));
        }
        page.mount(&container)?;
        tracing::info!(
            "Rendered {} news items into #{}",
            collection.len(),
            self.container_id
        );

        if let Some(tx) = self.notifier.take() {
            let notice = RenderNotice {
                container_id: self.container_id.clone(),
                item_ids: container.children().iter().filter_map(Element::dom_id).collect(),
                rendered_at: Local::now(),
            };
            if tx.send(notice).is_err() {
                tracing::debug!("Render notice receiver dropped");
            }
        }

        Ok(collection)
    }
}
