// ABOUTME: This module handles output formatting for batch creature listings
// ABOUTME: It provides a psql-style table formatter and a JSON formatter over creature summaries

use anyhow::Result;
use pokeapi_sdk::{Creature, SpriteVariant};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::ascii::AsciiRenderer;

/// A hydrated creature with its sprite already rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatureSummary {
    pub id: u32,
    pub name: String,
    pub sprite_url: Option<String>,
    pub width: u32,
    pub height: u32,
    pub art: String,
}

impl CreatureSummary {
    pub fn from_creature(creature: &Creature, renderer: &AsciiRenderer) -> Self {
        Self {
            id: creature.record.id,
            name: creature.record.name.clone(),
            sprite_url: creature
                .record
                .sprites
                .url(SpriteVariant::Front)
                .map(str::to_string),
            width: creature.sprite.width(),
            height: creature.sprite.height(),
            art: renderer.render_grid(&creature.sprite).to_string(),
        }
    }

    fn art_rows(&self) -> usize {
        self.art.lines().count()
    }
}

/// Render every creature and sort by id. Fetch results arrive in
/// completion order, so listings sort before display.
pub fn summarize(creatures: &[Creature], renderer: &AsciiRenderer) -> Vec<CreatureSummary> {
    let mut summaries: Vec<CreatureSummary> = creatures
        .iter()
        .map(|creature| CreatureSummary::from_creature(creature, renderer))
        .collect();
    summaries.sort_by_key(|summary| summary.id);
    summaries
}

pub trait OutputFormat {
    fn format_creatures(&self, creatures: &[CreatureSummary]) -> Result<String>;
}

pub struct TableFormatter;

impl TableFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormat for JsonFormatter {
    fn format_creatures(&self, creatures: &[CreatureSummary]) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(creatures)?)
        } else {
            Ok(serde_json::to_string(creatures)?)
        }
    }
}

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "#")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Art rows")]
    art_rows: usize,
}

impl OutputFormat for TableFormatter {
    fn format_creatures(&self, creatures: &[CreatureSummary]) -> Result<String> {
        let rows: Vec<TableRow> = creatures
            .iter()
            .map(|creature| TableRow {
                id: creature.id,
                name: creature.name.clone(),
                size: format!("{}x{}", creature.width, creature.height),
                art_rows: creature.art_rows(),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::psql());
        Ok(table.to_string())
    }
}
