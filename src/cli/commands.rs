//! Command implementations driving a [`CatalogBrowser`].

use super::render::{render_json, render_view, OutputFormat};
use anyhow::bail;
use pokedex_browser::catalog::{
    CatalogBrowser, CatalogSource, LoadOutcome, SearchOutcome, SkipReason, Viewport,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// Terminal rows treated as the visible viewport when scrolling.
const VIEWPORT_ROWS: f64 = 40.0;

/// One line of input in interactive mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseInput {
    /// Scroll to the bottom
    More,
    Search(String),
    Clear,
    Quit,
    Help,
}

impl BrowseInput {
    /// `""`/`more` scroll, `/name` or `search name` submit, `clear`, `quit`.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" | "more" | "m" => Self::More,
            "clear" | "c" | "back" => Self::Clear,
            "quit" | "q" | "exit" => Self::Quit,
            "help" | "?" => Self::Help,
            _ => {
                if let Some(query) = line.strip_prefix('/') {
                    Self::Search(query.to_string())
                } else if let Some(query) = line.strip_prefix("search ") {
                    Self::Search(query.to_string())
                } else {
                    Self::Search(line.to_string())
                }
            }
        }
    }
}

const BROWSE_HELP: &str = "\
  <enter> | more     load the next page
  /name | search x   show one Pokémon by exact name
  clear              back to all Pokémon
  quit               exit";

/// Scroll gesture that lands at the bottom of what has been rendered so far.
fn scroll_to_bottom(rendered: &str) -> Viewport {
    let document_rows = rendered.lines().count() as f64;
    Viewport::at_bottom(VIEWPORT_ROWS, document_rows.max(VIEWPORT_ROWS))
}

/// Load up to `pages` pages and print them.
pub async fn cmd_list<S: CatalogSource>(
    browser: &CatalogBrowser<S>,
    pages: usize,
    format: OutputFormat,
    sprite_base: &str,
) -> anyhow::Result<()> {
    let mut outcome = browser.mount().await;
    let mut loaded = 1;
    while loaded < pages {
        match outcome {
            LoadOutcome::Loaded {
                exhausted: false, ..
            } => {}
            _ => break,
        }
        let rendered = render_view(&browser.snapshot(), sprite_base);
        outcome = browser.on_scroll(scroll_to_bottom(&rendered)).await;
        loaded += 1;
    }
    debug!(pages = loaded, total = browser.len(), "Listing complete");

    match format {
        OutputFormat::Table => print!("{}", render_view(&browser.snapshot(), sprite_base)),
        OutputFormat::Json => println!("{}", render_json(&browser.entities())?),
    }

    if let LoadOutcome::Failed(err) = outcome {
        if browser.is_empty() {
            bail!(err.user_message());
        }
    }
    Ok(())
}

/// Resolve one Pokémon by exact name and print it.
pub async fn cmd_show<S: CatalogSource>(
    browser: &CatalogBrowser<S>,
    name: &str,
    format: OutputFormat,
    sprite_base: &str,
) -> anyhow::Result<()> {
    let outcome = browser.search(name).await;

    match format {
        OutputFormat::Table => print!("{}", render_view(&browser.snapshot(), sprite_base)),
        OutputFormat::Json => println!("{}", render_json(&browser.visible())?),
    }

    match outcome {
        SearchOutcome::Failed(err) => bail!(err.user_message()),
        SearchOutcome::ShowAll => bail!("a Pokémon name is required"),
        _ => Ok(()),
    }
}

/// Apply one state-changing input. Scrolling loads the next page whether or
/// not a search is active.
async fn apply_input<S: CatalogSource>(
    browser: &CatalogBrowser<S>,
    input: BrowseInput,
    rendered: &str,
) {
    match input {
        BrowseInput::More => {
            let outcome = browser.on_scroll(scroll_to_bottom(rendered)).await;
            if outcome == LoadOutcome::Skipped(SkipReason::Exhausted) {
                println!("End of catalog.");
            }
        }
        BrowseInput::Search(query) => {
            browser.search(&query).await;
        }
        BrowseInput::Clear => browser.clear_search(),
        BrowseInput::Quit | BrowseInput::Help => {}
    }
}

/// Interactive session over stdin.
pub async fn cmd_browse<S: CatalogSource>(
    browser: &CatalogBrowser<S>,
    sprite_base: &str,
) -> anyhow::Result<()> {
    println!("{}", BROWSE_HELP);
    browser.mount().await;
    let mut rendered = render_view(&browser.snapshot(), sprite_base);
    print!("{}", rendered);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match BrowseInput::parse(&line) {
            BrowseInput::Quit => break,
            BrowseInput::Help => {
                println!("{}", BROWSE_HELP);
                continue;
            }
            input => apply_input(browser, input, &rendered).await,
        }
        rendered = render_view(&browser.snapshot(), sprite_base);
        print!("{}", rendered);
    }

    browser.unmount();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokedex_browser::catalog::{DetailRecord, Endpoints, MockCatalogSource};
    use std::sync::Arc;

    #[test]
    fn test_browse_input_parse() {
        assert_eq!(BrowseInput::parse(""), BrowseInput::More);
        assert_eq!(BrowseInput::parse("  more "), BrowseInput::More);
        assert_eq!(BrowseInput::parse("clear"), BrowseInput::Clear);
        assert_eq!(BrowseInput::parse("q"), BrowseInput::Quit);
        assert_eq!(
            BrowseInput::parse("/Pikachu"),
            BrowseInput::Search("Pikachu".into())
        );
        assert_eq!(
            BrowseInput::parse("search mr-mime"),
            BrowseInput::Search("mr-mime".into())
        );
        assert_eq!(BrowseInput::parse("eevee"), BrowseInput::Search("eevee".into()));
    }

    #[test]
    fn test_scroll_to_bottom_is_near_bottom() {
        let viewport = scroll_to_bottom(&"line\n".repeat(500));
        assert!(viewport.near_bottom(0.0));
    }

    fn mock_browser(pages: usize) -> (Arc<MockCatalogSource>, CatalogBrowser<MockCatalogSource>) {
        let endpoints = Endpoints::default();
        let mock = Arc::new(MockCatalogSource::new());
        let mut url = endpoints.list_url.clone();
        for page in 0..pages {
            let next = (page + 1 < pages).then(|| format!("{}?page={}", endpoints.list_url, page + 1));
            let id = page as u64 + 1;
            mock.add_detail_page(
                url.clone(),
                &endpoints.detail_base,
                vec![DetailRecord::new(format!("mon-{}", id), id)],
                next.clone(),
            );
            if let Some(next) = next {
                url = next;
            }
        }
        (Arc::clone(&mock), CatalogBrowser::new(mock, endpoints))
    }

    #[tokio::test]
    async fn test_cmd_list_stops_at_requested_pages() {
        let (mock, browser) = mock_browser(5);
        cmd_list(&browser, 3, OutputFormat::Json, "s").await.unwrap();
        assert_eq!(mock.page_calls(), 3);
        assert_eq!(browser.len(), 3);
    }

    #[tokio::test]
    async fn test_cmd_list_stops_when_exhausted() {
        let (mock, browser) = mock_browser(2);
        cmd_list(&browser, 10, OutputFormat::Json, "s").await.unwrap();
        assert_eq!(mock.page_calls(), 2);
    }

    #[tokio::test]
    async fn test_browse_more_loads_while_searching() {
        let (mock, browser) = mock_browser(2);
        browser.mount().await;
        apply_input(&browser, BrowseInput::Search("mon-1".into()), "").await;

        apply_input(&browser, BrowseInput::More, "").await;

        assert_eq!(mock.page_calls(), 2);
        assert_eq!(browser.len(), 2);
        assert_eq!(browser.search_term().as_str(), "mon-1");
        assert_eq!(browser.visible().len(), 1);
    }

    #[tokio::test]
    async fn test_cmd_show_not_found_is_error() {
        let (_mock, browser) = mock_browser(1);
        let err = cmd_show(&browser, "missingno", OutputFormat::Json, "s")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Pokémon not found.");
    }
}
