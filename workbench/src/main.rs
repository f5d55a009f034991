//! Command-line front end for the cipher engine.
//!
//! `RUST_LOG=debug workbench ...` shows engine logging.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cipher_engine::cipher::CipherKind;
use cipher_engine::config::EngineConfig;

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "workbench")]
#[command(about = "Classical ciphers and the Rabin cryptosystem")]
#[command(version)]
struct Cli {
    /// JSON engine configuration (normalization policy, Rabin settings)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt text with a classical cipher
    Encrypt(ClassicalArgs),

    /// Decrypt text with a classical cipher
    Decrypt(ClassicalArgs),

    /// Rabin public-key operations
    Rabin {
        #[command(subcommand)]
        command: RabinCommands,
    },
}

#[derive(clap::Args)]
struct ClassicalArgs {
    #[arg(long, value_enum)]
    cipher: CipherArg,

    /// Key text: `3`, `5,8`, `7`, a cipher mapping, `(3, 1, 2)` or a keyword
    #[arg(long, default_value = "")]
    key: String,

    /// Alphabet characters; defaults to A..Z
    #[arg(long)]
    alphabet: Option<String>,

    text: String,
}

#[derive(Subcommand)]
enum RabinCommands {
    /// Generate a key pair
    Keygen {
        /// Bits per prime; overrides the configuration file
        #[arg(long)]
        bits: Option<u64>,
    },

    /// Encrypt text under a public key
    Encrypt {
        /// Public modulus n in decimal
        #[arg(long)]
        public: String,

        text: String,
    },

    /// Decrypt a ciphertext and print all four candidates
    Decrypt {
        #[arg(long)]
        public: String,

        /// Private key as `p,q`
        #[arg(long)]
        private: String,

        ciphertext: String,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
enum CipherArg {
    Shift,
    Affine,
    Multiplicative,
    Substitution,
    Permutation,
    Vigenere,
}

impl From<CipherArg> for CipherKind {
    fn from(arg: CipherArg) -> Self {
        match arg {
            CipherArg::Shift => CipherKind::Shift,
            CipherArg::Affine => CipherKind::Affine,
            CipherArg::Multiplicative => CipherKind::Multiplicative,
            CipherArg::Substitution => CipherKind::Substitution,
            CipherArg::Permutation => CipherKind::Permutation,
            CipherArg::Vigenere => CipherKind::Vigenere,
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    EngineConfig::from_json_str(&json)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Encrypt(args) => {
            let output = commands::run_classical(
                args.cipher.into(),
                &args.key,
                args.alphabet.as_deref(),
                &args.text,
                &config,
                commands::Direction::Encrypt,
            )?;
            println!("{}", output);
        }
        Commands::Decrypt(args) => {
            let output = commands::run_classical(
                args.cipher.into(),
                &args.key,
                args.alphabet.as_deref(),
                &args.text,
                &config,
                commands::Direction::Decrypt,
            )?;
            println!("{}", output);
        }
        Commands::Rabin { command } => match command {
            RabinCommands::Keygen { bits } => {
                let mut rabin = config.rabin;
                if let Some(bits) = bits {
                    rabin.prime_bits = bits;
                }
                let pair = commands::rabin_keygen(rabin)?;
                println!("public:  {}", pair.public_key());
                println!("private: {}", pair.private_key());
            }
            RabinCommands::Encrypt { public, text } => {
                println!("{}", commands::rabin_encrypt(&public, &text)?);
            }
            RabinCommands::Decrypt {
                public,
                private,
                ciphertext,
            } => {
                for (slot, text) in commands::rabin_decrypt(&public, &private, &ciphertext)?
                    .iter()
                    .enumerate()
                {
                    println!("[{}] {}", slot + 1, text);
                }
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_classical() -> Result<()> {
        let cli = Cli::try_parse_from([
            "workbench",
            "encrypt",
            "--cipher",
            "affine",
            "--key",
            "5,8",
            "HELLO",
        ])?;

        match cli.command {
            Commands::Encrypt(args) => {
                assert_eq!(args.cipher, CipherArg::Affine);
                assert_eq!(args.key, "5,8");
                assert_eq!(args.text, "HELLO");
                assert!(args.alphabet.is_none());
            }
            _ => panic!("expected encrypt"),
        }
        Ok(())
    }

    #[test]
    fn test_parse_rabin_decrypt_with_global_config() -> Result<()> {
        let cli = Cli::try_parse_from([
            "workbench",
            "rabin",
            "decrypt",
            "--public",
            "77",
            "--private",
            "7,11",
            "--config",
            "engine.json",
            "15",
        ])?;

        assert_eq!(cli.config, Some(PathBuf::from("engine.json")));
        assert!(matches!(
            cli.command,
            Commands::Rabin {
                command: RabinCommands::Decrypt { .. }
            }
        ));
        Ok(())
    }

    #[test]
    fn test_missing_config_is_default() -> Result<()> {
        assert_eq!(load_config(None)?, EngineConfig::default());
        Ok(())
    }
}
