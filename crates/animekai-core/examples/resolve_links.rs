//! Walks the full flow against the live site: search, load, resolve.

use animekai_core::AnimekaiScraper;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let query = std::env::args().nth(1).unwrap_or_else(|| "naruto".to_string());

    let scraper = AnimekaiScraper::new()?;

    println!("Searching for {:?}...\n", query);
    let results = scraper.search(&query).await?;
    for result in &results {
        println!("  {} -> {}", result.title, result.url);
    }

    let Some(first) = results.first() else {
        println!("No results.");
        return Ok(());
    };

    let detail = scraper.load(&first.url).await?;
    println!(
        "\n{} ({:?}), {} episodes",
        detail.title,
        detail.kind,
        detail.episodes.len()
    );

    let Some(episode) = detail.episodes.first() else {
        println!("No episodes.");
        return Ok(());
    };

    println!("\nResolving links for {}...", episode.url);
    let found = scraper
        .load_links(
            &episode.url,
            &mut |subtitle| println!("  subtitle [{}]: {}", subtitle.language, subtitle.url),
            &mut |link| println!("  link [{:?}]: {}", link.quality, link.url),
        )
        .await?;

    if !found {
        println!("  no supported player on this episode");
    }

    Ok(())
}
