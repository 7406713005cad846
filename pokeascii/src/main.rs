// ABOUTME: Main entry point for the pokeascii application
// ABOUTME: Loads configuration, dispatches subcommands, and reports errors with hints

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pokeapi_sdk::{sprite, PokeError, SpriteVariant};
use std::io::{IsTerminal, Write};
use std::path::Path;
use std::time::Duration;

use pokeascii::ascii::AsciiRenderer;
use pokeascii::cli::{Cli, Commands};
use pokeascii::config::Config;
use pokeascii::constants::ui;
use pokeascii::output::{summarize, JsonFormatter, OutputFormat, TableFormatter};
use pokeascii::server::{self, App};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {:#}", err);

        if let Some(help) = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<PokeError>())
            .and_then(PokeError::help_text)
        {
            eprintln!();
            eprintln!("{}", help);
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

async fn run(cli: Cli) -> Result<()> {
    let file_config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    let config = file_config.merge(cli.overrides());
    config.validate()?;

    let renderer = AsciiRenderer::new(config.render_options()?);

    match cli.command {
        Commands::Show { name, sprite } => show(&config, &renderer, &name, sprite).await,
        Commands::Render { file } => render_file(&renderer, &file),
        Commands::All { json, pretty, .. } => all(&config, &renderer, json, pretty).await,
        Commands::Serve { .. } => serve(&config, renderer).await,
    }
}

async fn show(
    config: &Config,
    renderer: &AsciiRenderer,
    name: &str,
    variant: SpriteVariant,
) -> Result<()> {
    let client = config.client()?;
    let record = client.fetch_record(name).await?;
    let image = client.fetch_sprite(&record, variant).await?;

    let stdout = std::io::stdout();
    renderer.render(&image, &mut stdout.lock())
}

fn render_file(renderer: &AsciiRenderer, path: &Path) -> Result<()> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read image file: {}", path.display()))?;
    let image = sprite::decode_png(&bytes)
        .with_context(|| format!("Failed to decode image file: {}", path.display()))?;

    let stdout = std::io::stdout();
    renderer.render(&image, &mut stdout.lock())
}

async fn all(config: &Config, renderer: &AsciiRenderer, json: bool, pretty: bool) -> Result<()> {
    let client = config.client()?;
    let fetcher = config.fetcher();

    let progress = spinner(format!(
        "Fetching Pokemon ({} at a time)",
        fetcher.limit()
    ));
    let fetched = client.list_creatures(&fetcher, config.list_limit).await;
    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }
    let creatures = fetched.context("Failed to fetch Pokemon list")?;

    let summaries = summarize(&creatures, renderer);
    let formatter: Box<dyn OutputFormat> = if json {
        Box::new(JsonFormatter::new(pretty))
    } else {
        Box::new(TableFormatter::new())
    };

    let output = formatter.format_creatures(&summaries)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output).context("Failed to write output")?;
    Ok(())
}

async fn serve(config: &Config, renderer: AsciiRenderer) -> Result<()> {
    let app = App::new(
        config.client()?,
        config.fetcher(),
        renderer,
        config.list_limit,
    );
    let addr = config.bind_addr().to_string();
    let runtime = tokio::runtime::Handle::current();

    tokio::task::spawn_blocking(move || server::serve(app, &addr, runtime))
        .await
        .context("Server thread panicked")?
}

fn spinner(message: String) -> Option<ProgressBar> {
    if !std::io::stderr().is_terminal() {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(ui::PROGRESS_TICK_MS));
    Some(pb)
}
