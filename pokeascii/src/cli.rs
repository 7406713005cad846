// ABOUTME: CLI argument definitions for the pokeascii application
// ABOUTME: Defines the command-line interface structure using clap derive macros

use clap::{Parser, Subcommand};
use pokeapi_sdk::SpriteVariant;
use std::path::PathBuf;

use crate::ascii::RowBound;
use crate::config::Config;
use crate::constants::defaults;

#[derive(Parser, Debug)]
#[command(name = "pokeascii")]
#[command(about = "Render Pokemon sprites as ASCII art", long_about = None)]
#[command(version)]
pub struct Cli {
    /// PokeAPI base URL (e.g., https://pokeapi.co)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Read configuration from this file instead of the standard locations
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Bound rows by image width, as for square sprites
    #[arg(long, global = true)]
    pub legacy_square: bool,

    /// Reverse the glyph ramp for light terminal backgrounds
    #[arg(long, global = true)]
    pub invert: bool,

    /// Enable verbose output for debugging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a Pokemon and print its sprite as ASCII art
    Show {
        /// Pokemon name or national dex number
        #[arg(default_value = defaults::CREATURE)]
        name: String,

        /// Sprite variant: front, back, or shiny
        #[arg(long, default_value = "front")]
        sprite: SpriteVariant,
    },
    /// Render a local PNG file as ASCII art
    Render {
        /// Path to a PNG image
        file: PathBuf,
    },
    /// Fetch a page of Pokemon concurrently and list them
    All {
        /// Number of Pokemon to request from the index
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        limit: Option<u32>,

        /// Maximum number of Pokemon fetched at once
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        concurrency: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Pretty print JSON output
        #[arg(long, requires = "json")]
        pretty: bool,
    },
    /// Serve rendered sprites over HTTP
    Serve {
        /// Address to bind (e.g., 127.0.0.1:8080)
        #[arg(long, value_name = "ADDR")]
        addr: Option<String>,
    },
}

impl Cli {
    /// Config values supplied on the command line; these take precedence
    /// over every config file.
    pub fn overrides(&self) -> Config {
        let mut config = Config {
            api_url: self.api_url.clone(),
            invert_ramp: self.invert.then_some(true),
            row_bound: self.legacy_square.then_some(RowBound::Width),
            ..Default::default()
        };

        match &self.command {
            Commands::All {
                limit, concurrency, ..
            } => {
                config.list_limit = *limit;
                config.concurrency = concurrency.map(|c| c as usize);
            }
            Commands::Serve { addr } => config.bind_addr = addr.clone(),
            Commands::Show { .. } | Commands::Render { .. } => {}
        }

        config
    }
}
