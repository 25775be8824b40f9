//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::core::config::{path_display, ChatSettings, Config, SettingsOverrides};
use crate::core::transcript::TranscriptStore;
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::init_tracing;

#[derive(Parser, Debug)]
#[command(name = "palaver", version)]
#[command(about = "A terminal chat client for a local Ollama model")]
#[command(
    long_about = "Palaver is a full-screen terminal chat interface for a language model served \
by a local Ollama instance. The conversation is kept in a JSON transcript file and sent \
in full with every prompt, so the model always sees the whole history.\n\n\
Controls:\n\
  Enter             Send the prompt\n\
  PageUp/PageDown   Scroll the output pane (mouse wheel too, with --mouse)\n\
  F12 or Ctrl+K     Clear the history, on screen and on disk\n\
  Ctrl+C            Quit\n\n\
Logging:\n\
  Set PALAVER_LOG (e.g. 'debug') to adjust verbosity of --log output"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Model name to chat with (e.g. llama3.1)
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Chat endpoint URL
    #[arg(short = 'e', long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Transcript file holding the conversation
    #[arg(short = 't', long, global = true, value_name = "FILE")]
    pub transcript: Option<PathBuf>,

    /// Write diagnostic logs to this file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Capture the mouse so the wheel scrolls the output pane
    #[arg(long, global = true)]
    pub mouse: bool,

    /// Use this config file instead of the platform default
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Empty the transcript file without starting the interface
    Clear,
    /// Show the current configuration
    Config,
    /// Set a configuration value
    Set {
        /// One of: endpoint, model, transcript, mouse, log-file (or log_file)
        key: String,
        /// Value to store
        value: String,
    },
    /// Remove a configuration value, restoring its default
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

impl Args {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            endpoint: self.endpoint.clone(),
            model: self.model.clone(),
            transcript: self.transcript.clone(),
            mouse: self.mouse,
            log_file: self.log.clone(),
        }
    }

    fn config_path(&self) -> Result<PathBuf, Box<dyn Error>> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::default_config_path()
                .ok_or_else(|| "Could not determine a configuration directory; use --config".into()),
        }
    }

    /// Config file values with command-line flags layered on top.
    pub fn resolve_settings(&self, config: &Config) -> ChatSettings {
        config.resolve(self.overrides())
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

fn load_config(path: &Path) -> Config {
    match Config::load_from_path(path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("❌ Error: {err}");
            std::process::exit(1);
        }
    }
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config_path = args.config_path();

    match args.command.clone().unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let config = match &config_path {
                Ok(path) => load_config(path),
                Err(_) => Config::default(),
            };
            let settings = args.resolve_settings(&config);

            if let Err(e) = init_tracing(settings.log_file.as_deref()) {
                eprintln!("❌ Error: could not open log file: {e}");
                std::process::exit(1);
            }

            if let Err(e) = run_chat(settings).await {
                eprintln!("❌ Error: {e}");
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Clear => {
            let config = match &config_path {
                Ok(path) => load_config(path),
                Err(_) => Config::default(),
            };
            let settings = args.resolve_settings(&config);
            let store = TranscriptStore::new(settings.transcript_path);
            if let Err(e) = store.clear() {
                eprintln!("❌ Error: {e}");
                std::process::exit(1);
            }
            println!("✅ Cleared transcript at {}", path_display(store.path()));
            Ok(())
        }
        Commands::Config => {
            let path = config_path?;
            let config = load_config(&path);
            println!("Config file: {}", path_display(&path));
            config.print_all();
            Ok(())
        }
        Commands::Set { key, value } => {
            let path = config_path?;
            let mut config = load_config(&path);
            if let Err(e) = config.set_value(&key, &value) {
                eprintln!("❌ {e}");
                std::process::exit(1);
            }
            config.save_to_path(&path)?;
            println!("✅ Set {key} to: {}", value.trim());
            Ok(())
        }
        Commands::Unset { key } => {
            let path = config_path?;
            let mut config = load_config(&path);
            if let Err(e) = config.unset_value(&key) {
                eprintln!("❌ {e}");
                std::process::exit(1);
            }
            config.save_to_path(&path)?;
            println!("✅ Unset {key}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
