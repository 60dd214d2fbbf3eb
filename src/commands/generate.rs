//! Generate the public page with rendered news

use anyhow::Result;
use notify::Watcher;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use walkdir::WalkDir;

use crate::page::HtmlPage;
use crate::pipeline::{NewsPipeline, RenderError};
use crate::state::{Language, Theme};
use crate::Site;

/// Overrides for the configured display state
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    pub language: Option<Language>,
    pub theme: Option<Theme>,
}

/// What a generation run produced
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub output: PathBuf,
    pub news_count: usize,
    /// Element ids of the news boxes, for scroll animation hooks
    pub item_ids: Vec<String>,
}

/// Render the page and write it, with copied assets, to the public directory
///
/// A page without a news container is written unchanged. When a news
/// document cannot be fetched the page is still written, carrying the
/// load-failure message, and the error is returned.
pub async fn run(site: &Site, options: &GenerateOptions) -> Result<GenerateReport> {
    let start = Instant::now();

    let mut state = site.state();
    if let Some(language) = options.language {
        state.set_language(language);
    }
    if let Some(theme) = options.theme {
        state.set_theme(theme);
    }

    if !site.page_path.exists() {
        anyhow::bail!("Page template not found: {:?}", site.page_path);
    }
    let mut page = HtmlPage::load(&site.page_path)?;
    let i18n = site.i18n(state.language())?;
    page.apply_theme(state.theme());
    page.apply_language(&i18n, state.language());

    let fetcher = site.fetcher()?;
    tracing::info!(
        "Loading {} news documents from {}",
        site.config.news.files.len(),
        fetcher.location()
    );
    let mut pipeline = NewsPipeline::from_config(fetcher, &site.config.news, &i18n)?;
    let notice = pipeline.subscribe();
    let rendered = pipeline.render(&mut page).await;

    copy_assets(site)?;
    let output = write_page(site, page)?;

    let mut report = GenerateReport {
        output,
        news_count: 0,
        item_ids: Vec::new(),
    };

    match rendered {
        Ok(collection) => {
            report.news_count = collection.len();
            if let Ok(notice) = notice.await {
                tracing::debug!(
                    "News boxes ready for scroll animations: {}",
                    notice.item_ids.join(", ")
                );
                report.item_ids = notice.item_ids;
            }
        }
        Err(RenderError::MissingContainer(id)) => {
            tracing::warn!("Page has no #{} element, news skipped", id);
        }
        Err(e) => return Err(e.into()),
    }

    tracing::info!(
        "Generated {:?} ({}, {}) in {:.2}s",
        report.output,
        state.language(),
        state.theme(),
        start.elapsed().as_secs_f64()
    );

    Ok(report)
}

fn write_page(site: &Site, page: HtmlPage) -> Result<PathBuf> {
    let file_name = site
        .page_path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid page path: {:?}", site.page_path))?;
    let output = site.public_dir.join(file_name);

    fs::create_dir_all(&site.public_dir)?;
    fs::write(&output, page.into_string())?;
    Ok(output)
}

/// Copy configured asset files and directories into the public directory
fn copy_assets(site: &Site) -> Result<()> {
    for asset in &site.config.assets {
        let source = site.base_dir.join(asset);
        if !source.exists() {
            continue;
        }

        for entry in WalkDir::new(&source)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let relative = path.strip_prefix(&site.base_dir).unwrap_or(path);
            let target = site.public_dir.join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &target)?;
            tracing::debug!("Copied {:?}", relative);
        }
    }

    Ok(())
}

/// Paths whose changes require a regeneration
pub fn watched_paths(site: &Site) -> Vec<PathBuf> {
    let mut paths = vec![site.page_path.clone(), site.config_path()];
    if let Some(news_dir) = site.news_dir() {
        paths.push(news_dir);
    }
    paths.push(site.languages_dir.clone());
    paths.into_iter().filter(|p| p.exists()).collect()
}

/// Watch the page, config and news documents and regenerate on change
pub async fn watch(site: &Site, options: &GenerateOptions) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<notify::Event>();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    for path in watched_paths(site) {
        watcher.watch(&path, notify::RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = Instant::now();
    while let Some(_event) = rx.recv().await {
        // Debounce bursts of events from a single save
        if last_rebuild.elapsed() <= Duration::from_millis(500) {
            continue;
        }

        tracing::info!("File changed, regenerating...");
        if let Err(e) = run(site, options).await {
            tracing::error!("Generation failed: {}", e);
        }
        last_rebuild = Instant::now();
    }

    Ok(())
}
