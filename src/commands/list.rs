//! List the configured news documents

use anyhow::Result;

use crate::content::{ContentResource, NewsItem};
use crate::pipeline::NewsPipeline;
use crate::state::Language;
use crate::Site;

/// Fetch and parse every news document and print a summary line for each
pub async fn run(site: &Site, language: Option<Language>) -> Result<()> {
    let language = language.unwrap_or(site.config.language);
    let i18n = site.i18n(language)?;
    let pipeline = NewsPipeline::from_config(site.fetcher()?, &site.config.news, &i18n)?;

    let collection = pipeline.collect().await?;
    println!("News ({}):", collection.len());
    for line in summarize(pipeline.resources(), collection.items()) {
        println!("  {}", line);
    }

    Ok(())
}

fn summarize(resources: &[ContentResource], items: &[NewsItem]) -> Vec<String> {
    resources
        .iter()
        .zip(items)
        .map(|(resource, item)| {
            let date = if item.has_date() {
                item.published.as_str()
            } else {
                "-"
            };
            format!("{} - {} [{}]", date, item.title, resource)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize() {
        let resources = vec![ContentResource::new("a.md"), ContentResource::new("b.md")];
        let items = vec![
            NewsItem {
                title: "First".to_string(),
                published: "2024-01-01".to_string(),
                body_html: String::new(),
            },
            NewsItem {
                title: "Second".to_string(),
                published: String::new(),
                body_html: String::new(),
            },
        ];
        assert_eq!(
            summarize(&resources, &items),
            vec!["2024-01-01 - First [a.md]", "- - Second [b.md]"]
        );
    }
}
