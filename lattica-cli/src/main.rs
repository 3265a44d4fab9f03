//! Lattica CLI - ML-DSA signatures from the command line.

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use lattica_ml_dsa::api::{self, SecurityLevel};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;
use zeroize::Zeroizing;

/// ML-DSA (FIPS 204) signature tool
#[derive(Parser)]
#[command(name = "lattica")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new key pair
    Keygen {
        /// Algorithm to use
        #[arg(short, long, value_enum, default_value = "ml-dsa-65")]
        algorithm: Algorithm,

        /// Output file prefix (creates `<prefix>.pub` and `<prefix>.sec`)
        #[arg(short, long)]
        output: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "hex")]
        format: OutputFormat,

        /// Derive the key pair from a 32-byte hex seed instead of the OS RNG
        #[arg(long)]
        seed: Option<String>,
    },

    /// Sign a file
    Sign {
        /// Path to the signing key file
        #[arg(long = "key")]
        key: PathBuf,

        /// Input file to sign
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for signature
        #[arg(short, long)]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "hex")]
        format: OutputFormat,

        /// Context string bound into the signature (at most 255 bytes)
        #[arg(short, long, default_value = "")]
        context: String,

        /// Mix fresh randomness into the signature instead of signing deterministically
        #[arg(long)]
        hedged: bool,

        /// Algorithm (detected from the key size if omitted)
        #[arg(short, long, value_enum)]
        algorithm: Option<Algorithm>,
    },

    /// Verify a signature
    Verify {
        /// Path to the verification (public) key file
        #[arg(long = "pub")]
        pubkey: PathBuf,

        /// Input file that was signed
        #[arg(short, long)]
        input: PathBuf,

        /// Signature file
        #[arg(short, long)]
        signature: PathBuf,

        /// Context string used when signing
        #[arg(short, long, default_value = "")]
        context: String,

        /// Algorithm (detected from the key size if omitted)
        #[arg(short, long, value_enum)]
        algorithm: Option<Algorithm>,
    },

    /// Display information about supported parameter sets
    Info,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    /// ML-DSA-44 (NIST Security Level 2, 128-bit)
    #[value(name = "ml-dsa-44")]
    MlDsa44,
    /// ML-DSA-65 (NIST Security Level 3, 192-bit)
    #[value(name = "ml-dsa-65")]
    MlDsa65,
    /// ML-DSA-87 (NIST Security Level 5, 256-bit)
    #[value(name = "ml-dsa-87")]
    MlDsa87,
}

impl From<Algorithm> for SecurityLevel {
    fn from(algo: Algorithm) -> Self {
        match algo {
            Algorithm::MlDsa44 => SecurityLevel::MlDsa44,
            Algorithm::MlDsa65 => SecurityLevel::MlDsa65,
            Algorithm::MlDsa87 => SecurityLevel::MlDsa87,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Hexadecimal encoding
    Hex,
    /// Base64 encoding
    Base64,
    /// PEM format
    Pem,
}

const PUBLIC_KEY_LABEL: &str = "ML-DSA PUBLIC KEY";
const SECRET_KEY_LABEL: &str = "ML-DSA SECRET KEY";
const SIGNATURE_LABEL: &str = "ML-DSA SIGNATURE";

/// Encode bytes to the specified format
fn encode_output(data: &[u8], format: OutputFormat, label: &str) -> String {
    match format {
        OutputFormat::Hex => hex::encode(data),
        OutputFormat::Base64 => BASE64.encode(data),
        OutputFormat::Pem => {
            let b64 = BASE64.encode(data);
            let mut wrapped = String::with_capacity(b64.len() + b64.len() / 64 + 1);
            for (i, c) in b64.chars().enumerate() {
                if i > 0 && i % 64 == 0 {
                    wrapped.push('\n');
                }
                wrapped.push(c);
            }
            format!("-----BEGIN {label}-----\n{wrapped}\n-----END {label}-----\n")
        }
    }
}

/// Check if a string is valid hexadecimal
fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Decode bytes with auto-detection of format.
/// Detection order: PEM (by header) -> Hex (if all hex chars) -> Base64.
fn decode_input(data: &str) -> Result<Vec<u8>> {
    let data = data.trim();

    if data.starts_with("-----BEGIN") {
        let lines: Vec<&str> = data.lines().collect();
        if lines.len() < 3 || !lines[lines.len() - 1].starts_with("-----END") {
            bail!("Invalid PEM format");
        }
        let b64: String = lines[1..lines.len() - 1].concat();
        return BASE64
            .decode(b64.trim())
            .context("Failed to decode PEM base64 content");
    }

    if is_hex(data) && data.len() % 2 == 0 {
        return hex::decode(data).context("Failed to decode hex");
    }

    BASE64.decode(data).context("Failed to decode base64")
}

/// Read and decode a key or signature file
fn read_encoded(path: &Path, what: &str) -> Result<Vec<u8>> {
    let text = Zeroizing::new(
        fs::read_to_string(path).with_context(|| format!("Failed to read {what} file"))?,
    );
    decode_input(&text).with_context(|| format!("Failed to decode {what}"))
}

/// Pick the parameter set for a key, preferring an explicit choice
fn resolve_level(
    explicit: Option<Algorithm>,
    key_len: usize,
    size_of: fn(SecurityLevel) -> usize,
) -> Result<SecurityLevel> {
    if let Some(algo) = explicit {
        return Ok(algo.into());
    }
    SecurityLevel::ALL
        .into_iter()
        .find(|level| size_of(*level) == key_len)
        .with_context(|| {
            let expected: Vec<String> = SecurityLevel::ALL
                .iter()
                .map(|l| size_of(*l).to_string())
                .collect();
            format!(
                "Unknown key size: {key_len} bytes. Expected one of {}.",
                expected.join("/")
            )
        })
}

fn parse_seed(hex_seed: &str) -> Result<Zeroizing<[u8; 32]>> {
    let bytes = Zeroizing::new(hex::decode(hex_seed.trim()).context("Seed must be hex")?);
    if bytes.len() != 32 {
        bail!("Seed must be exactly 32 bytes, got {}", bytes.len());
    }
    let mut seed = Zeroizing::new([0u8; 32]);
    seed.copy_from_slice(&bytes);
    Ok(seed)
}

/// Generate a key pair
fn cmd_keygen(
    algo: Algorithm,
    output: &str,
    format: OutputFormat,
    seed: Option<&str>,
) -> Result<()> {
    let level = SecurityLevel::from(algo);
    info!(%level, seeded = seed.is_some(), "generating key pair");

    let keypair = match seed {
        Some(hex_seed) => {
            let seed = parse_seed(hex_seed)?;
            api::generate_keypair_from_seed(level, &seed)
        }
        None => api::generate_keypair(level, &mut rand::rng()),
    }
    .context("Key generation failed")?;

    let pk_encoded = encode_output(&keypair.public_key, format, PUBLIC_KEY_LABEL);
    let sk_encoded = Zeroizing::new(encode_output(&keypair.secret_key, format, SECRET_KEY_LABEL));

    let pub_path = format!("{output}.pub");
    let sec_path = format!("{output}.sec");

    fs::write(&pub_path, &pk_encoded).context("Failed to write public key")?;
    fs::write(&sec_path, sk_encoded.as_bytes()).context("Failed to write secret key")?;

    debug!(
        public_key_bytes = keypair.public_key.len(),
        secret_key_bytes = keypair.secret_key.len(),
        "key pair written"
    );

    println!("Public key written to: {pub_path}");
    println!("Secret key written to: {sec_path}");

    Ok(())
}

/// Sign a file
fn cmd_sign(
    key: &Path,
    input: &Path,
    output: &Path,
    format: OutputFormat,
    context: &str,
    hedged: bool,
    explicit_algo: Option<Algorithm>,
) -> Result<()> {
    let sk_bytes = Zeroizing::new(read_encoded(key, "signing key")?);
    let level = resolve_level(explicit_algo, sk_bytes.len(), SecurityLevel::secret_key_size)?;
    api::validate_context(context.as_bytes()).context("Invalid context")?;

    let message = fs::read(input).context("Failed to read input file")?;
    info!(%level, hedged, message_bytes = message.len(), "signing");

    let signature = if hedged {
        api::sign_with_rng(
            level,
            &sk_bytes,
            &message,
            Some(context.as_bytes()),
            &mut rand::rng(),
        )
    } else {
        api::sign(level, &sk_bytes, &message, Some(context.as_bytes()), None)
    }
    .context("Signing failed")?;

    fs::write(output, encode_output(&signature, format, SIGNATURE_LABEL))
        .context("Failed to write signature")?;

    debug!(signature_bytes = signature.len(), "signature written");
    println!("Signature written to: {}", output.display());

    Ok(())
}

/// Verify a signature over a file
fn cmd_verify(
    pubkey: &Path,
    input: &Path,
    signature: &Path,
    context: &str,
    explicit_algo: Option<Algorithm>,
) -> Result<bool> {
    let pk_bytes = read_encoded(pubkey, "public key")?;
    let level = resolve_level(explicit_algo, pk_bytes.len(), SecurityLevel::public_key_size)?;
    let sig_bytes = read_encoded(signature, "signature")?;
    let message = fs::read(input).context("Failed to read input file")?;

    info!(%level, message_bytes = message.len(), "verifying");
    let valid = api::verify(
        level,
        &pk_bytes,
        &message,
        Some(context.as_bytes()),
        &sig_bytes,
    )
    .context("Verification could not be performed")?;

    if valid {
        println!("Signature is valid.");
    } else {
        println!("Signature is INVALID.");
    }
    Ok(valid)
}

fn cmd_info() {
    println!("Lattica - ML-DSA (FIPS 204)");
    println!();
    println!("Supported parameter sets:");
    let strengths = ["2 (128-bit)", "3 (192-bit)", "5 (256-bit)"];
    for (level, strength) in SecurityLevel::ALL.iter().zip(strengths) {
        println!(
            "  {:<10}  Security Level {}  PK: {}B  SK: {}B  SIG: {}B",
            level.to_string().to_lowercase(),
            strength,
            level.public_key_size(),
            level.secret_key_size(),
            level.signature_size()
        );
    }
    println!();
    println!("Output formats:");
    println!("  hex      Hexadecimal encoding (default)");
    println!("  base64   Base64 encoding");
    println!("  pem      PEM format with headers");
    println!();
    println!("Signing is deterministic unless --hedged is given.");
}

fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Keygen {
            algorithm,
            output,
            format,
            seed,
        } => cmd_keygen(algorithm, &output, format, seed.as_deref()),

        Commands::Sign {
            key,
            input,
            output,
            format,
            context,
            hedged,
            algorithm,
        } => cmd_sign(&key, &input, &output, format, &context, hedged, algorithm),

        Commands::Verify {
            pubkey,
            input,
            signature,
            context,
            algorithm,
        } => {
            if !cmd_verify(&pubkey, &input, &signature, &context, algorithm)? {
                std::process::exit(1);
            }
            Ok(())
        }

        Commands::Info => {
            cmd_info();
            Ok(())
        }

        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    }
}
