use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use tether_common::types::SecurityProfile;

#[derive(Parser, Debug)]
#[command(name = "tether", version, about = "Device credentials for IoT agents")]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "TETHER_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Increase verbosity (-v = debug, -vv = trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write logs to file (in addition to stderr)
    #[arg(long, env = "TETHER_LOG_FILE", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Config file (default: <data dir>/config.toml)
    #[arg(long, env = "TETHER_CONFIG", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Registration file (overrides config.toml)
    #[arg(long, env = "TETHER_CREDENTIALS", value_name = "PATH", global = true)]
    pub credentials: Option<PathBuf>,

    /// Security profile: rsa_3072 or shared_secret (overrides config.toml)
    #[arg(long, env = "TETHER_PROFILE", global = true)]
    pub profile: Option<SecurityProfile>,

    /// Output JSON instead of human-readable text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show configuration, storage capability and onboarding state
    Status,
    /// Generate an RSA-3072 key pair
    Keygen {
        /// Write public.pem and private.pem into this directory instead of stdout
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Sign a payload with RSA-SHA256 (prints Base64)
    Sign {
        /// PKCS#1 private key PEM
        #[arg(long, value_name = "PATH")]
        key: PathBuf,
        /// Payload file, or - for stdin
        input: PathBuf,
    },
    /// Verify an RSA-SHA256 signature
    Verify {
        /// SubjectPublicKeyInfo public key PEM
        #[arg(long, value_name = "PATH")]
        key: PathBuf,
        /// Base64 signature
        #[arg(long)]
        signature: String,
        /// Payload file, or - for stdin
        input: PathBuf,
    },
    /// SHA-256 digest of a payload (hex)
    Hash {
        /// Payload file, or - for stdin
        input: PathBuf,
    },
    /// Base64-encode a payload
    Encode {
        /// Use the URL-safe alphabet
        #[arg(long)]
        url_safe: bool,
        /// Payload file, or - for stdin
        input: PathBuf,
    },
    /// Decode Base64 text to stdout
    Decode {
        /// Use the URL-safe alphabet
        #[arg(long)]
        url_safe: bool,
        /// Padded Base64 text
        text: String,
    },
    /// Print the JWK form of a public key
    Jwk {
        /// SubjectPublicKeyInfo public key PEM
        #[arg(long, value_name = "PATH")]
        key: PathBuf,
        /// Key identifier
        #[arg(long)]
        kid: Option<String>,
    },
    /// Registration credentials
    Credentials(CredentialsCommand),
    /// Sign a client assertion JWT with the stored credentials
    Assertion {
        /// Audience claim (overrides config.toml)
        #[arg(long)]
        audience: Option<String>,
        /// Tenant claim
        #[arg(long)]
        tenant: Option<String>,
        /// Lifetime in seconds (overrides config.toml)
        #[arg(long, value_name = "SECONDS")]
        lifetime: Option<u64>,
    },
}

#[derive(Args, Debug)]
pub struct CredentialsCommand {
    #[command(subcommand)]
    pub command: CredentialsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CredentialsSubcommand {
    /// Show the stored registration (secrets omitted)
    Show,
    /// Store a registration record
    Save(SaveArgs),
    /// Replace the stored RSA keys with a fresh pair
    Rotate,
}

#[derive(Args, Debug)]
pub struct SaveArgs {
    #[arg(long)]
    pub client_id: String,
    #[arg(long)]
    pub registration_access_token: String,
    #[arg(long)]
    pub registration_uri: String,
    /// Client secret (shared_secret profile)
    #[arg(long, env = "TETHER_CLIENT_SECRET", conflicts_with_all = ["public_key", "private_key"])]
    pub client_secret: Option<String>,
    /// Public key PEM file (rsa_3072 profile; generated when omitted)
    #[arg(long, value_name = "PATH", requires = "private_key")]
    pub public_key: Option<PathBuf>,
    /// Private key PEM file (rsa_3072 profile)
    #[arg(long, value_name = "PATH", requires = "public_key")]
    pub private_key: Option<PathBuf>,
}
