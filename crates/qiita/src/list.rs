use crate::prelude::{println, *};
use colored::Colorize;
use qiita_core::qiita::{transform_articles, ListItem, ListOutput};

use crate::config::QiitaConfig;
use crate::fetcher::{ArticleFetcher, QiitaClient};

#[derive(Debug, clap::Args, Clone)]
pub struct ListOptions {
    /// Only list articles whose title matches
    #[arg(short, long, default_value = "")]
    pub title: String,

    /// Number of articles to print (overrides --count)
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ListOptions, config: QiitaConfig) -> Result<()> {
    let config = config.with_overrides(options.limit)?;

    if config.verbose {
        println!(
            "Fetching {} articles from {}...",
            config.count,
            config.endpoints.base_url()
        );
    }

    let client = QiitaClient::from_config(&config)?;
    let output = list_articles_data(&client, &config, &options.title).await?;

    if options.json {
        println!("{}", format_list_json(&output)?);
    } else {
        print!("{}", format_list_text(&output));
    }

    Ok(())
}

/// Fetch one page of articles and shape it for output
pub async fn list_articles_data<F: ArticleFetcher>(
    fetcher: &F,
    config: &QiitaConfig,
    title: &str,
) -> Result<ListOutput> {
    let articles = fetcher
        .fetch_articles(config.count, title)
        .await
        .with_context(|| format!("Failed to fetch articles from {}", config.endpoints.base_url()))?;

    Ok(transform_articles(
        &articles,
        &config.endpoints,
        title,
        config.count,
    ))
}

fn format_list_json(output: &ListOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_item(index: usize, item: &ListItem) -> String {
    format!(
        "\n{} {}\n    {}: {} | {}: {}\n",
        format!("[{}]", index + 1).yellow().bold(),
        item.title.white().bold(),
        "By".green(),
        item.author.bright_white(),
        "URL".green(),
        item.url.cyan().underline()
    )
}

fn format_list_text(output: &ListOutput) -> String {
    let mut result = String::new();

    let heading = if output.query.is_empty() {
        "QIITA ARTICLES".to_string()
    } else {
        format!("QIITA ARTICLES MATCHING \"{}\"", output.query)
    };

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!("{}\n", heading.bright_cyan().bold()));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    if output.items.is_empty() {
        result.push_str(&format!("\n{}\n", "No articles found.".yellow()));
    } else {
        for (index, item) in output.items.iter().enumerate() {
            result.push_str(&format_item(index, item));
        }
    }

    result.push_str(&format!("\n{}:\n", "To open an article".bright_white().bold()));
    result.push_str(&format!("  {}\n", "qiita open <id>".cyan()));
    result.push_str(&format!(
        "\n{}:\n",
        "To browse interactively".bright_white().bold()
    ));
    result.push_str(&format!("  {}\n", "qiita browse".cyan()));

    result.push('\n');
    result
}
