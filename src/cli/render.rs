//! Terminal rendering of the browser state.

use colored::Colorize;
use pokedex_browser::catalog::{CatalogSnapshot, Entity, StatusBanner};

/// Output format for listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable cards
    Table,
    /// JSON array of entities
    Json,
}

/// One entity card: name, types, measurements, abilities, sprite.
pub fn render_card(entity: &Entity, sprite_base: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        entity.name.bright_cyan().bold(),
        format!("#{}", entity.id).dimmed()
    ));
    out.push_str(&format!("  {} {}\n", "Type:".bold(), entity.types.join(", ")));
    out.push_str(&format!(
        "  {} {} lbs   {} {} ft\n",
        "Weight:".bold(),
        entity.weight,
        "Height:".bold(),
        entity.height
    ));
    out.push_str(&format!("  {}\n", "Abilities:".bold()));
    for ability in &entity.abilities {
        out.push_str(&format!("    - {}\n", ability.yellow()));
    }
    out.push_str(&format!(
        "  {} {}\n",
        "Image:".bold(),
        entity.sprite_url(sprite_base).dimmed()
    ));
    out
}

/// Error and loading lines; empty when neither is set.
pub fn render_banner(banner: &StatusBanner) -> String {
    let mut out = String::new();
    if let Some(ref error) = banner.error {
        out.push_str(&format!("{}\n", error.red()));
    }
    if banner.loading {
        out.push_str(&format!("{}\n", "Loading...".red()));
    }
    out
}

/// Banner, visible cards, and the back hint while a search is active.
pub fn render_view(snapshot: &CatalogSnapshot, sprite_base: &str) -> String {
    let mut out = render_banner(&snapshot.banner);

    if snapshot.visible.is_empty() {
        if snapshot.search_active() {
            out.push_str(&format!("No Pokémon named '{}'.\n", snapshot.term));
        } else {
            out.push_str("No Pokémon loaded yet.\n");
        }
    }
    for entity in &snapshot.visible {
        out.push('\n');
        out.push_str(&render_card(entity, sprite_base));
    }

    if snapshot.search_active() {
        out.push_str(&format!(
            "\n{}\n",
            "← Back to all Pokémon: type 'clear'".dimmed()
        ));
    } else {
        out.push_str(&format!(
            "\n{}\n",
            format!(
                "{} loaded{}",
                snapshot.entities.len(),
                if snapshot.is_exhausted() { ", end of catalog" } else { "" }
            )
            .dimmed()
        ));
    }
    out
}

pub fn render_json(entities: &[Entity]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(entities)?)
}
