use clap::{Parser, Subcommand};
use imprint::{Channel, DctParams};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imprint", version = "1.0.0", about = "Steganographic image-signing CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Embed a message into a carrier via the DCT coder (PNG/JPEG carriers)
    EmbedDct {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(short, long)]
        message: String,
        #[arg(short, long)]
        password: String,
        /// Defaults to `password` when omitted
        #[arg(long)]
        positions_secret: Option<String>,
        #[arg(long, default_value = "24.0")]
        strength: f32,
        #[arg(long, default_value = "30")]
        redundancy: usize,
        #[arg(long, default_value = "Y")]
        channel: String,
        #[arg(long, default_value = "100")]
        quality: u8,
    },
    /// Extract a message previously embedded via `embed-dct`
    ExtractDct {
        input: PathBuf,
        #[arg(short, long)]
        password: String,
        #[arg(long)]
        positions_secret: Option<String>,
        #[arg(long, default_value = "30")]
        redundancy: usize,
        #[arg(long, default_value = "Y")]
        channel: String,
        #[arg(long, default_value = "1000")]
        max_payload_bytes: usize,
    },
    /// Embed a message into a carrier via the LSB coder (lossless carriers)
    EmbedLsb {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(short, long)]
        message: String,
        #[arg(long, default_value = "10")]
        repeat: usize,
    },
    /// Extract a message previously embedded via `embed-lsb`
    ExtractLsb {
        input: PathBuf,
        #[arg(long, default_value = "5")]
        repeat: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    match Cli::parse().command {
        Commands::EmbedDct {
            input, output, message, password, positions_secret,
            strength, redundancy, channel, quality,
        } => {
            let carrier_bytes = std::fs::read(&input)?;
            let params = DctParams {
                strength,
                redundancy,
                channel: parse_channel(&channel),
                output_quality: quality,
                ..DctParams::default()
            };
            let secret = positions_secret.as_deref().unwrap_or(&password);
            let out = imprint::embed_dct(&carrier_bytes, &message, &password, secret, &params)?;
            std::fs::write(&output, out)?;
            println!("Embedded {} B message → {}", message.len(), output.display());
        }

        Commands::ExtractDct { input, password, positions_secret, redundancy, channel, max_payload_bytes } => {
            let carrier_bytes = std::fs::read(&input)?;
            let params = DctParams {
                redundancy,
                channel: parse_channel(&channel),
                max_payload_bytes,
                ..DctParams::default()
            };
            let secret = positions_secret.as_deref().unwrap_or(&password);
            let message = imprint::extract_dct(&carrier_bytes, &password, secret, &params)?;
            println!("{message}");
        }

        Commands::EmbedLsb { input, output, message, repeat } => {
            let carrier_bytes = std::fs::read(&input)?;
            let out = imprint::embed_lsb(&carrier_bytes, &message, repeat)?;
            std::fs::write(&output, out)?;
            println!("Embedded {} B message → {}", message.len(), output.display());
        }

        Commands::ExtractLsb { input, repeat } => {
            let carrier_bytes = std::fs::read(&input)?;
            let message = imprint::extract_lsb(&carrier_bytes, repeat)?;
            println!("{message}");
        }
    }

    Ok(())
}

fn parse_channel(s: &str) -> Channel {
    match s.to_ascii_uppercase().as_str() {
        "CR" => Channel::Cr,
        "CB" => Channel::Cb,
        _ => Channel::Y,
    }
}
