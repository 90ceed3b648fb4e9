use anyhow::Context;
use clap::{Parser, Subcommand};

use stadtwetter_core::render::{render, render_error};
use stadtwetter_core::{
    Block, BrightskyClient, Config, Language, NominatimClient, Pipeline, RenderTarget,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "stadtwetter", version, about = "Current weather for a city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for a city.
    Show {
        /// City name, e.g. "Berlin".
        city: String,

        /// Display language; overrides the configured one.
        #[arg(long)]
        lang: Option<Language>,
    },

    /// Choose the display language and store it in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Show { city, lang } => {
                let lang = lang.unwrap_or(config.language);
                show(&config, &city, lang).await
            }
            Command::Configure => configure(config),
        }
    }
}

async fn show(config: &Config, city: &str, lang: Language) -> anyhow::Result<()> {
    let pipeline = Pipeline::new(
        NominatimClient::with_base_url(config.geocoding_url().to_string()),
        BrightskyClient::with_base_url(config.weather_url().to_string()),
    );

    let mut console = Console::default();

    match pipeline.submit(city).await {
        Ok(result) => {
            console.replace(&render(&result, lang));
            Ok(())
        }
        Err(err) => {
            // The user sees the same fixed message for both failure kinds;
            // the chain stays in the logs.
            tracing::warn!(error = ?err, "submission failed");
            console.replace(&render_error(lang));
            std::process::exit(1);
        }
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let choice = inquire::Select::new("Display language:", vec!["de", "en"])
        .prompt()
        .context("Language selection aborted")?;

    config.language = choice.parse()?;
    config.save()?;

    println!("Saved. Language is now '{}'.", config.language.as_str());
    Ok(())
}

/// Console rendering target: prints the blocks, one line each.
#[derive(Debug, Default)]
struct Console;

impl RenderTarget for Console {
    fn replace(&mut self, blocks: &[Block]) {
        for block in blocks {
            match block {
                Block::Heading(text) => {
                    println!("{text}");
                    println!("{}", "=".repeat(text.chars().count()));
                }
                Block::Labeled { label, value } => println!("{label}: {value}"),
                Block::Error(text) => eprintln!("{text}"),
            }
        }
    }
}
