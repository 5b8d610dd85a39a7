use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::Parser;
use shared::{
    generate_notes, notes_label, ClaudeNotesGenerator, Config, ConfigError, FeedRegistry,
    HttpFeedFetcher, NotesWriter, PromptBuilder, Prompter,
};
use std::io;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "podcast-notes")]
#[command(version)]
#[command(about = "Turn recent RSS articles into weekly podcast program notes with Claude")]
struct Args {}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "podcast_notes=info,shared=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _args = Args::parse();
    init_tracing();

    println!("=== RSS Podcast Note Generator ===");

    let config = Config::from_env()?;

    let registry = FeedRegistry::load(&config.feeds_path)
        .with_context(|| format!("Failed to load feeds from {}", config.feeds_path.display()))?;
    if registry.is_empty() {
        return Err(ConfigError::NoFeeds)
            .with_context(|| format!("Add feeds to {}", config.feeds_path.display()));
    }
    info!(
        "Loaded {} feeds from {}",
        registry.len(),
        config.feeds_path.display()
    );

    let params = {
        let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
        prompter
            .collect_parameters(&registry)
            .context("Failed to read your choices")?
    };

    println!("\n✓ Selected: {}", params.selected_feed_names().join(", "));

    let fetcher = HttpFeedFetcher::new().context("Failed to create HTTP client")?;
    let generator =
        ClaudeNotesGenerator::new(config.anthropic_api_key.clone(), config.model.clone())
            .context("Failed to create HTTP client")?;

    println!("\n📚 Fetching feeds and generating podcast program notes...");
    println!("  (This may take a minute...)");
    let notes = generate_notes(
        &fetcher,
        &generator,
        &PromptBuilder::new(),
        &registry,
        &params,
        Utc::now(),
    )
    .await
    .context("Failed to generate program notes")?;

    if !notes.failed_feeds.is_empty() {
        println!("\n⚠ Skipped {} feed(s) that failed to load:", notes.failed_feeds.len());
        for name in &notes.failed_feeds {
            println!("  ✗ {}", name);
        }
    }
    println!("✓ Used {} articles", notes.article_count);

    // Show the notes before saving so a failed write does not lose them
    println!("\n=== Podcast Program Notes ===\n");
    println!("{}", notes.text);

    let writer = NotesWriter::new(&config.output_dir);
    let filepath = writer
        .save(
            &notes.text,
            &notes_label(params.selected_feed_names()),
            Local::now(),
        )
        .context("Failed to save program notes (they are printed above)")?;

    println!("\n✅ Program notes saved to: {}", filepath.display());

    Ok(())
}
