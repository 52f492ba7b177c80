use std::path::PathBuf;

use anyhow::Context;
use cells_encoder::{utils, CellsEncoder, CustomEncoder, EncoderConfig, Strategy};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cells-encoder", version, about = "Base64 and URL encoding helpers")]
struct Cli {
    /// JSON file with `strategy` and `charset` keys
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// auto, native or named
    #[arg(long, global = true)]
    strategy: Option<Strategy>,

    /// Charset label for the named strategy
    #[arg(long, global = true)]
    charset: Option<String>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Base64-encode the UTF-8 bytes of a string
    Base64Encode { value: String },
    /// Decode Base64 and print it as text
    Base64Decode {
        value: String,
        /// Print the decoded bytes as hex instead of text
        #[arg(long)]
        hex: bool,
    },
    /// Form-encode a string
    UrlEncode { value: String },
    /// Decode a form-encoded string
    UrlDecode { value: String },
    /// Print the UTF-8 bytes of a string as hex
    Utf8Bytes { value: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    utils::init_cli_logger(cli.verbose);

    let config = load_config(&cli)?;
    let encoder = CellsEncoder::from_config(&config);

    match cli.command {
        Command::Base64Encode { value } => println!("{}", encoder.base64_encode_str(&value)),
        Command::Base64Decode { value, hex } => {
            if hex {
                let bytes = encoder
                    .base64_decode(value.as_bytes())
                    .context("failed to decode base64 input")?;
                println!("{}", hex::encode(bytes));
            } else {
                let text = encoder
                    .base64_decode_str(&value)
                    .context("failed to decode base64 input")?;
                println!("{}", text);
            }
        }
        Command::UrlEncode { value } => println!("{}", encoder.utf8_encode(&value)),
        Command::UrlDecode { value } => {
            let text = encoder
                .utf8_decode(&value)
                .context("failed to decode url-encoded input")?;
            println!("{}", text);
        }
        Command::Utf8Bytes { value } => println!("{}", hex::encode(encoder.get_utf8_bytes(&value))),
    }

    Ok(())
}

/// File, then environment, then flags.
fn load_config(cli: &Cli) -> anyhow::Result<EncoderConfig> {
    let mut config = match &cli.config {
        Some(path) => EncoderConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => EncoderConfig::default(),
    };

    config
        .apply_env()
        .context("invalid encoder settings in environment")?;

    if let Some(strategy) = cli.strategy {
        config.strategy = strategy;
    }
    config
        .apply_overrides(None, cli.charset.as_deref())
        .context("invalid --charset")?;

    Ok(config)
}
