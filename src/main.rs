use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wardrobe_assistant::ai::mime;
use wardrobe_assistant::assistant::Assistant;
use wardrobe_assistant::config::Config;
use wardrobe_assistant::media;
use wardrobe_assistant::rating::{OutfitContext, StyleRating};
use wardrobe_assistant::session::Session;
use wardrobe_assistant::theme::{Theme, ThemeStore};

#[derive(Debug, Parser)]
#[command(name = "wardrobe-assistant")]
#[command(about = "Classify clothing photos and get outfit advice")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify clothing photos into short labels.
    Classify {
        #[arg(value_name = "FILE", required = true)]
        photos: Vec<PathBuf>,
    },
    /// Recommend an outfit from photos and/or item names.
    Recommend {
        /// Photo of a wardrobe item (repeatable).
        #[arg(long = "photo", value_name = "FILE")]
        photos: Vec<PathBuf>,
        /// Name of a wardrobe item (repeatable).
        #[arg(long = "item", value_name = "NAME")]
        items: Vec<String>,
    },
    /// Rate an outfit description for a venue, weather and style.
    Rate {
        #[arg(long)]
        description: String,
        #[arg(long, default_value = "Professional")]
        venue: String,
        #[arg(long, default_value = "Mild/Spring")]
        weather: String,
        #[arg(long, default_value = "Minimalist")]
        preference: String,
    },
    /// Generate an illustration of an outfit.
    Imagine {
        prompt: String,
        /// Write the image here instead of printing a data URI.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Show or change the theme preference (dark, light or toggle).
    Theme {
        #[arg(value_name = "THEME", value_parser = parse_theme_arg)]
        action: Option<ThemeAction>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ThemeAction {
    Set(Theme),
    Toggle,
}

fn parse_theme_arg(input: &str) -> std::result::Result<ThemeAction, String> {
    if input.eq_ignore_ascii_case("toggle") {
        return Ok(ThemeAction::Toggle);
    }
    input
        .parse::<Theme>()
        .map(ThemeAction::Set)
        .map_err(|_| format!("Invalid theme '{}'. Expected dark, light or toggle", input))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wardrobe_assistant=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    match run(args.command, &config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

async fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Classify { photos } => {
            let session = Session::new(Assistant::from_config(config));
            for photo in &photos {
                session.add_photo(photo).await?;
            }
            for item in session.items() {
                println!("{}\t{}", item.name, item.image_url);
            }
        }
        Command::Recommend { photos, items } => {
            let session = Session::new(Assistant::from_config(config));
            for photo in &photos {
                session.add_photo(photo).await?;
            }
            for name in &items {
                session.add_labelled_item(name, "")?;
            }
            println!("{}", session.recommend().await?);
        }
        Command::Rate {
            description,
            venue,
            weather,
            preference,
        } => {
            let session = Session::new(Assistant::from_config(config));
            let context = OutfitContext::new(venue, weather, preference);
            let rating = session.rate(&description, &context).await?;
            print_rating(&rating);
        }
        Command::Imagine { prompt, output } => {
            let assistant = Assistant::from_config(config);
            match output {
                Some(path) => {
                    let image = assistant.generate_image_data(&prompt).await?;
                    let bytes = media::decode_image(&image)?;
                    let path = if path.extension().is_none() {
                        path.with_extension(mime::extension_for_mime(&image.mime_type))
                    } else {
                        path
                    };
                    tokio::fs::write(&path, &bytes).await?;
                    info!("Wrote {} bytes to {}", bytes.len(), path.display());
                    println!("{}", path.display());
                }
                None => println!("{}", assistant.generate_image(&prompt).await?),
            }
        }
        Command::Theme { action } => {
            let store = ThemeStore::new(&config.data_dir);
            let current = store.load();
            let theme = match action {
                None => current,
                Some(ThemeAction::Toggle) => current.toggle(),
                Some(ThemeAction::Set(theme)) => theme,
            };
            if theme != current {
                store.save(theme)?;
            }
            println!("{}", theme);
        }
    }
    Ok(())
}

fn print_rating(rating: &StyleRating) {
    println!("Score: {}/10", rating.score);
    println!();
    println!("{}", rating.explanation);
    if !rating.tips.is_empty() {
        println!();
        println!("Tips:");
        for tip in &rating.tips {
            println!("- {}", tip);
        }
    }
}
