//! Ring signature CLI - generate key rings, sign anonymously on behalf of a
//! ring, and verify signatures against the ring's public keys.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ring_sig::glue::primitive::HashChoice;
use ring_sig::keypair::DEFAULT_MODULUS_BITS;

use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "ringsig")]
#[command(about = "RST ring signatures over RSA trapdoor permutations", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a ring of fresh RSA keys
    Keygen {
        /// Number of ring members
        #[arg(short = 'n', long, default_value_t = 4)]
        count: usize,

        /// Modulus bit width L shared by the ring
        #[arg(short, long, default_value_t = DEFAULT_MODULUS_BITS)]
        bits: usize,

        /// Hash primitive: sha1 or sha3_256
        #[arg(long, default_value_t = HashChoice::Sha3_256)]
        hash: HashChoice,

        /// Output file (defaults to a timestamped name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a copy of a ring without private exponents
    Public {
        /// Ring export to read
        #[arg(short, long)]
        ring: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Sign a message as one ring member
    Sign {
        /// Ring export holding the signer's private exponent
        #[arg(short, long)]
        ring: PathBuf,

        /// Signer position in the ring
        #[arg(short, long)]
        index: usize,

        /// Message text
        #[arg(short, long)]
        message: String,

        /// Emit base64 instead of JSON
        #[arg(long)]
        compact: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Verify a signature against a ring
    Verify {
        /// Ring export (public keys suffice)
        #[arg(short, long)]
        ring: PathBuf,

        /// Signature file, JSON or base64
        #[arg(short, long)]
        signature: PathBuf,

        /// Message text
        #[arg(short, long)]
        message: String,
    },

    /// Run the sign/verify scenario for both hash primitives
    Selftest {
        /// Number of ring members
        #[arg(short = 'n', long, default_value_t = 4)]
        size: usize,

        /// Modulus bit width
        #[arg(short, long, default_value_t = 1024)]
        bits: usize,
    },
}

fn main() -> Result<ExitCode> {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Keygen {
            count,
            bits,
            hash,
            output,
        } => commands::keygen(count, bits, hash, output)?,
        Commands::Public { ring, output } => commands::export_public(&ring, &output)?,
        Commands::Sign {
            ring,
            index,
            message,
            compact,
            output,
        } => commands::sign(&ring, index, &message, compact, output.as_deref())?,
        Commands::Verify {
            ring,
            signature,
            message,
        } => {
            let valid = commands::verify(&ring, &signature, &message)?;
            println!("{}", if valid { "valid" } else { "invalid" });
            if !valid {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Selftest { size, bits } => {
            if !commands::selftest(size, bits)? {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
