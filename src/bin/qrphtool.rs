use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rust_qrph::decoder::parse_payload_with;
use rust_qrph::encoder::{EncoderConfig, PayloadEncoder};
use rust_qrph::pricing::{Catalog, PricingSnapshot};
use rust_qrph::render::{RenderOptions, render_png, render_terminal};
use rust_qrph::tools::{BatchStats, encode_batch, load_requests};
use rust_qrph::{Amount, PaymentRequest};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qrphtool", version, about = "QR Ph payment payload tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a payment request as a QR Ph payload
    Encode {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        name: String,
        /// Amount in pesos, e.g. 1250.50
        #[arg(long)]
        amount: Amount,
        /// Also write the QR symbol to this PNG file
        #[arg(long)]
        png: Option<PathBuf>,
        /// Pixels per module for --png
        #[arg(long, default_value_t = 8)]
        scale: u32,
        /// Also print the QR symbol to the terminal
        #[arg(long)]
        terminal: bool,
    },
    /// Check a payload's CRC
    Verify { payload: String },
    /// Print a payload's fields
    Decode { payload: String },
    /// Price a tier selection and optionally encode its downpayment
    Quote {
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long)]
        tier: String,
        #[arg(long = "addon")]
        addons: Vec<String>,
        #[arg(long, requires = "name")]
        phone: Option<String>,
        #[arg(long, requires = "phone")]
        name: Option<String>,
    },
    /// Encode every `phone,name,amount` line of a file
    Batch {
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let encoder = PayloadEncoder::new(EncoderConfig::from_env());

    let result = match cli.command {
        Command::Encode {
            phone,
            name,
            amount,
            png,
            scale,
            terminal,
        } => encode_cmd(
            &encoder,
            &PaymentRequest::new(phone, name, amount),
            png.as_deref(),
            scale,
            terminal,
        ),
        Command::Verify { payload } => verify_cmd(&encoder, &payload),
        Command::Decode { payload } => decode_cmd(&encoder, &payload),
        Command::Quote {
            catalog,
            tier,
            addons,
            phone,
            name,
        } => quote_cmd(&encoder, &catalog, &tier, &addons, phone.zip(name)),
        Command::Batch { input } => batch_cmd(&encoder, &input),
    };

    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

/// `RUST_LOG` directives, or `warn` when none are given
fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives.unwrap_or_default())
}

fn encode_cmd(
    encoder: &PayloadEncoder,
    request: &PaymentRequest,
    png: Option<&Path>,
    scale: u32,
    terminal: bool,
) -> Result<()> {
    let payload = encoder.encode(request)?;
    println!("{payload}");

    if let Some(path) = png {
        let options = RenderOptions {
            scale,
            ..RenderOptions::default()
        };
        render_png(&payload, path, &options)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Wrote {}", path.display());
    }
    if terminal {
        println!("{}", render_terminal(&payload)?);
    }
    Ok(())
}

fn verify_cmd(encoder: &PayloadEncoder, payload: &str) -> Result<()> {
    let parsed = parse_payload_with(payload.trim(), encoder.config().crc_input)?;
    println!("OK crc={}", parsed.crc());
    Ok(())
}

fn decode_cmd(encoder: &PayloadEncoder, payload: &str) -> Result<()> {
    let parsed = parse_payload_with(payload.trim(), encoder.config().crc_input)?;
    for record in parsed.records() {
        println!("  {} ({:02}) {}", record.tag, record.value_len(), record.value);
    }
    let account = parsed.merchant_account();
    println!("Provider: {}", account.guid);
    println!("Mobile:   {}", account.mobile);
    println!("Name:     {}", parsed.merchant_name());
    println!("City:     {}", parsed.merchant_city());
    match parsed.amount() {
        Some(amount) => println!("Amount:   {} {}", amount, parsed.currency()),
        None => println!("Amount:   (entered by payer)"),
    }
    Ok(())
}

fn quote_cmd(
    encoder: &PayloadEncoder,
    catalog: &Path,
    tier: &str,
    addons: &[String],
    payee: Option<(String, String)>,
) -> Result<()> {
    let catalog = Catalog::load(catalog)
        .with_context(|| format!("failed to load catalog {}", catalog.display()))?;
    let snapshot = PricingSnapshot::compute(&catalog, tier, addons)?;

    println!("Package:  {} ({})", snapshot.tier_title(), snapshot.base_price());
    if let Some(tier) = catalog.tier(snapshot.tier_id()) {
        for feature in tier.features() {
            println!("  - {feature}");
        }
    }
    for addon in snapshot.addons() {
        println!("  + {} {}", addon.label, addon.price);
    }
    println!("Total:    {}", snapshot.display());

    let Some((phone, name)) = payee else {
        return Ok(());
    };
    if !snapshot.is_payable() {
        bail!("tier '{}' is quoted on request; no QR payment", snapshot.tier_id());
    }
    let request = snapshot.payment_request(phone, name)?;
    println!("Downpayment: {}", request.amount);
    println!("{}", encoder.encode(&request)?);
    Ok(())
}

fn batch_cmd(encoder: &PayloadEncoder, input: &Path) -> Result<()> {
    let requests = load_requests(input)
        .with_context(|| format!("failed to read requests from {}", input.display()))?;

    let start = Instant::now();
    let results = encode_batch(encoder, &requests);
    let elapsed = start.elapsed();

    for (i, result) in results.iter().enumerate() {
        match result {
            Ok(payload) => println!("{payload}"),
            Err(err) => eprintln!("request {}: {}", i + 1, err),
        }
    }

    let stats = BatchStats::from_results(&results);
    eprintln!(
        "Encoded {}/{} requests in {:.2?}",
        stats.ok,
        requests.len(),
        elapsed
    );
    if stats.failed > 0 {
        bail!("{} requests failed", stats.failed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_defaults_to_warn() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(Some("")).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn log_filter_honours_bare_level() {
        assert_eq!(
            log_filter(Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            log_filter(Some("error")).max_level_hint(),
            Some(LevelFilter::ERROR)
        );
    }

    #[test]
    fn log_filter_honours_target_directive() {
        assert_eq!(
            log_filter(Some("rust_qrph=trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }
}
