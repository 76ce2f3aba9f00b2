use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use lht65n_codec::util::{decode_payload_text, format_hex_compact, PayloadEncoding};
use lht65n_codec::{
    init_logger, log_error, log_info, ControlByte, DecoderConfig, Lht65nDecoder, UplinkDecoder, UplinkInput,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lht65n-cli")]
#[command(about = "CLI tool for decoding Dragino LHT65N uplinks")]
struct Cli {
    /// JSON decoder configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a payload given as hex or base64
    Decode {
        #[arg(long, conflicts_with = "base64", required_unless_present = "base64")]
        hex: Option<String>,
        #[arg(long)]
        base64: Option<String>,
        #[arg(short, long, default_value = "2")]
        port: u8,
    },
    /// Decode a ChirpStack-style JSON uplink
    DecodeJson { file: PathBuf },
    /// Show how the control byte of a payload is classified
    Classify {
        #[arg(long, conflicts_with = "base64", required_unless_present = "base64")]
        hex: Option<String>,
        #[arg(long)]
        base64: Option<String>,
    },
}

/// Uplink as exported by ChirpStack: either base64 `data` or a `bytes` array.
#[derive(Deserialize)]
struct ChirpstackUplink {
    #[serde(rename = "fPort", default)]
    f_port: u8,
    data: Option<String>,
    bytes: Option<Vec<u8>>,
    #[serde(default)]
    variables: HashMap<String, serde_json::Value>,
}

fn payload_arg(hex: Option<String>, base64: Option<String>) -> Result<Vec<u8>> {
    let bytes = match (hex, base64) {
        (Some(text), _) => decode_payload_text(&text, PayloadEncoding::Hex)?,
        (None, Some(text)) => decode_payload_text(&text, PayloadEncoding::Base64)?,
        (None, None) => bail!("either --hex or --base64 is required"),
    };
    Ok(bytes)
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}

fn main() -> Result<()> {
    init_logger();

    let cli = Cli::parse();
    run(cli).inspect_err(|err| log_error(&format!("{err:#}")))
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => DecoderConfig::load_with_env_overrides(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => {
            let mut config = DecoderConfig::default();
            config.apply_env_overrides()?;
            config
        }
    };
    let decoder = Lht65nDecoder::new(config)?;

    match cli.command {
        Commands::Decode { hex, base64, port } => {
            let bytes = payload_arg(hex, base64)?;
            log_info(&format!("Decoding payload: {}", format_hex_compact(&bytes)));
            let output = decoder.decode(&UplinkInput::new(port, bytes));
            print_json(&output, cli.pretty)?;
        }
        Commands::DecodeJson { file } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read uplink file: {}", file.display()))?;
            let uplink: ChirpstackUplink = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse uplink file: {}", file.display()))?;

            let bytes = match (uplink.bytes, uplink.data) {
                (Some(bytes), _) => bytes,
                (None, Some(data)) => decode_payload_text(&data, PayloadEncoding::Base64)?,
                (None, None) => bail!("uplink has neither `bytes` nor `data`"),
            };
            let input = UplinkInput {
                f_port: uplink.f_port,
                bytes,
                variables: uplink.variables,
            };
            print_json(&decoder.decode(&input), cli.pretty)?;
        }
        Commands::Classify { hex, base64 } => {
            let bytes = payload_arg(hex, base64)?;
            let control = ControlByte::parse(&bytes)?;
            println!("control byte:    0x{:02X}", control.raw());
            println!("external sensor: {}", control.external_sensor);
            println!("poll:            {}", control.poll());
            println!("retransmission:  {}", control.retransmission());
            match control.kind() {
                Some(kind) => println!("kind:            {kind:?}"),
                None => println!("kind:            unknown"),
            }
        }
    }

    Ok(())
}
