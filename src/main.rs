use anyhow::Result;
use clap::{Parser, Subcommand};

use keyring::cli::{
    handle_register_command, handle_vault_command, CredentialArgs, VaultCommands,
};
use keyring::config::{KeyringPaths, Settings};

#[derive(Parser)]
#[command(
    name = "keyring",
    version,
    about = "Client-side encrypted key/value vault",
    long_about = "KeyRing keeps groups of secrets in a vault that is encrypted \
                  on this machine with a key derived from your account \
                  credentials. Only ciphertext is ever written to storage."
)]
struct Cli {
    #[command(flatten)]
    credentials: CredentialArgs,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new account
    Register,

    #[command(flatten)]
    Vault(VaultCommands),

    /// Show configuration paths and settings
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = KeyringPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    keyring::logging::init(cli.verbose, &settings.log_level);

    match cli.command {
        Some(Commands::Register) => {
            handle_register_command(&paths, &settings, &cli.credentials)?;
        }
        Some(Commands::Vault(cmd)) => {
            handle_vault_command(&paths, &settings, &cli.credentials, cmd)?;
        }
        Some(Commands::Config) => {
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
            }

            println!("KeyRing Configuration");
            println!("=====================");
            println!("Config file:       {}", paths.settings_file().display());
            println!("Accounts file:     {}", paths.accounts_file().display());
            println!("Records directory: {}", paths.records_dir().display());
            println!();
            println!("Settings:");
            println!("  Wire format:         {}", settings.wire_format);
            println!("  Nonce length:        {} bytes", settings.nonce_length.size());
            println!("  Min password length: {}", settings.min_password_length);
            println!("  Log level:           {}", settings.log_level);
        }
        None => {
            println!("KeyRing - encrypted key/value vault");
            println!();
            println!("Run 'keyring --help' for usage information.");
            println!("Run 'keyring register' to create an account.");
        }
    }

    Ok(())
}
