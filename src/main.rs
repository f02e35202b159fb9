use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use lyrics_maker::commands::generate::{self, FormDefaults};
use lyrics_maker::llm::{self, ClientConfig, GeminiClient};
use lyrics_maker::logging::LoggingConfig;
use lyrics_maker::song::selection::parse_creativity;
use lyrics_maker::song::{Creativity, Genre, Purpose};
use lyrics_maker::utils::strip_controls_and_escapes;

#[derive(Parser, Debug)]
#[command(
    name = "lyrics-maker",
    version,
    about = "Create custom song lyrics tailored to your preferences.",
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true,
    disable_help_subcommand = true
)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace). RUST_LOG overrides it.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate lyrics. Opens the interactive form unless --theme is given.
    Generate(GenerateArgs),
    /// Manage the stored Gemini API key
    Key {
        /// Store a new API key in the local auth file
        #[arg(long, value_name = "KEY", conflicts_with = "clear")]
        set: Option<String>,
        /// Remove the stored API key from the local auth file
        #[arg(long, conflicts_with = "test")]
        clear: bool,
        /// Verify the configured API key by calling the Gemini API
        #[arg(long, conflicts_with = "clear")]
        test: bool,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[arg(long, value_enum)]
    genre: Option<Genre>,
    /// Lyrics writer style, e.g. "Bob Dylan"
    #[arg(long, value_name = "WRITER")]
    style: Option<String>,
    /// Brief description or theme for the song
    #[arg(long)]
    theme: Option<String>,
    #[arg(long, value_enum)]
    purpose: Option<Purpose>,
    /// Creativity level between 0.1 and 1.0
    #[arg(long, value_parser = parse_creativity)]
    creativity: Option<Creativity>,
    /// Gemini model name. Defaults to $LYRICS_MAKER_MODEL, then gemini-pro
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("{:?}", err);
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    LoggingConfig::from_verbosity(cli.verbose)
        .json_format(cli.log_json)
        .init()?;

    match cli.command {
        Command::Generate(args) => {
            let config = ClientConfig::from_sources(args.model)?;
            debug!(model = %config.model, "client configured");
            let client = GeminiClient::new(config);
            let defaults = FormDefaults {
                genre: args.genre,
                writer_style: args.style,
                theme: args.theme,
                purpose: args.purpose,
                creativity: args.creativity,
            };
            generate::run(&client, defaults).await?;
        }
        Command::Key { set, clear, test } => handle_key_command(set, clear, test).await?,
    }

    Ok(())
}

async fn handle_key_command(set: Option<String>, clear: bool, test: bool) -> Result<()> {
    let mut action_taken = false;

    if let Some(key) = set {
        llm::store_api_key(&strip_controls_and_escapes(&key))?;
        println!("Stored Gemini API key in the local auth file.");
        action_taken = true;
    }

    if clear {
        let removed = llm::clear_api_key()?;
        if removed {
            println!("Removed the stored Gemini API key.");
        } else {
            println!("No Gemini API key found in the auth file.");
        }
        action_taken = true;
    }

    if test {
        let source = llm::test_configured_api_key().await?;
        println!("Gemini API key from the {} is valid.", source.description());
        action_taken = true;
    }

    if !action_taken {
        bail!("No action provided. Use --set, --clear, or --test.");
    }
    Ok(())
}
