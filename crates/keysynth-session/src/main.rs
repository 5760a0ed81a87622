//! keysynth: command-line front end for the remote input synthesizer.
//!
//! There is no remote desktop behind this binary: the "session" is standard
//! output, and every key event that would be sent is printed as one JSON
//! object per line.  This makes paste batching, chord handling and keysym
//! mapping easy to inspect and to script against.
//!
//! # Usage
//!
//! ```text
//! keysynth [--config <PATH>] <COMMAND>
//!
//! Commands:
//!   paste   [--file <PATH>] [--batch-size <N>] [--delay-ms <MS>]
//!           Type clipboard text (a file, or stdin) into the session
//!   keys    <down:KEYSYM|up:KEYSYM>...
//!           Replay local key events through the chord detector
//!   keysym  <TEXT>
//!           Print the keysym of every character of TEXT
//!   config  Print the effective configuration as TOML
//! ```
//!
//! # Environment variable overrides
//!
//! CLI args take precedence when both are present.
//!
//! | Variable              | Description                          |
//! |-----------------------|--------------------------------------|
//! | `KEYSYNTH_CONFIG`     | Config file path                     |
//! | `KEYSYNTH_BATCH_SIZE` | Paste events per batch               |
//! | `KEYSYNTH_DELAY_MS`   | Pause between paste batches (ms)     |
//! | `RUST_LOG`            | Log filter; overrides `log_level`    |
//!
//! Logs go to stderr so stdout carries only JSON lines.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use keysynth_core::{ChordKeys, Keysym, KeysymParseError};
use keysynth_session::application::dispatch_keys::DispatchConfig;
use keysynth_session::application::paste_clipboard::{
    ClipboardProvider, PasteClipboardUseCase, PasteOutcome,
};
use keysynth_session::application::session::RemoteSession;
use keysynth_session::application::synthesize_input::InputSynthesizer;
use keysynth_session::infrastructure::clipboard::ReaderClipboard;
use keysynth_session::infrastructure::key_sink::json_lines::JsonLinesSink;
use keysynth_session::infrastructure::storage::config::{load_config, render_config, AppConfig};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Remote input event synthesizer.
#[derive(Debug, Parser)]
#[command(
    name = "keysynth",
    about = "Synthesise remote key events from pastes and chords",
    version
)]
struct Cli {
    /// TOML config file.  Defaults to the platform config directory.
    #[arg(long, global = true, env = "KEYSYNTH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Type clipboard text into the session.
    Paste {
        /// Read the clipboard from this file instead of stdin.
        #[arg(long)]
        file: Option<PathBuf>,

        /// Key events per batch (overrides `[paste] batch_size`).
        #[arg(long, env = "KEYSYNTH_BATCH_SIZE")]
        batch_size: Option<usize>,

        /// Pause between batches in milliseconds (overrides `[paste] batch_delay_ms`).
        #[arg(long, env = "KEYSYNTH_DELAY_MS")]
        delay_ms: Option<u64>,
    },

    /// Replay local key events, e.g. `down:Control_L down:0xffe9 up:65507`.
    Keys {
        #[arg(required = true)]
        events: Vec<KeyAction>,
    },

    /// Print the keysym of every character of TEXT.
    Keysym { text: String },

    /// Print the effective configuration.
    Config,
}

/// One local key transition given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct KeyAction {
    pressed: bool,
    code: Keysym,
}

#[derive(Debug, Error)]
enum KeyActionParseError {
    #[error("expected `down:<keysym>` or `up:<keysym>`, got '{0}'")]
    Format(String),
    #[error(transparent)]
    Keysym(#[from] KeysymParseError),
}

impl FromStr for KeyAction {
    type Err = KeyActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (direction, key) = s
            .split_once(':')
            .ok_or_else(|| KeyActionParseError::Format(s.to_string()))?;
        let pressed = match direction.to_ascii_lowercase().as_str() {
            "down" | "press" => true,
            "up" | "release" => false,
            _ => return Err(KeyActionParseError::Format(s.to_string())),
        };
        Ok(Self {
            pressed,
            code: key.parse()?,
        })
    }
}

/// Applies CLI overrides on top of the file configuration.
fn paste_dispatch_config(
    config: &AppConfig,
    batch_size: Option<usize>,
    delay_ms: Option<u64>,
) -> DispatchConfig {
    let mut dispatch = config.paste.dispatch_config();
    if let Some(n) = batch_size {
        dispatch.batch_size = n;
    }
    if let Some(ms) = delay_ms {
        dispatch.batch_delay = Duration::from_millis(ms);
    }
    dispatch
}

// ── Output lines ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct MenuLine {
    menu: &'static str,
}

#[derive(Debug, Serialize)]
struct KeysymLine {
    character: char,
    code_point: u32,
    keysym: Option<Keysym>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'static str>,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

// ── Commands ──────────────────────────────────────────────────────────────────

async fn run_paste(
    config: &AppConfig,
    file: Option<PathBuf>,
    batch_size: Option<usize>,
    delay_ms: Option<u64>,
) -> anyhow::Result<()> {
    let dispatch = paste_dispatch_config(config, batch_size, delay_ms);
    let clipboard: Arc<dyn ClipboardProvider> = Arc::new(match file {
        Some(path) => ReaderClipboard::from_file(path),
        None => ReaderClipboard::stdin(),
    });

    let id = Uuid::new_v4();
    let sink = Arc::new(JsonLinesSink::new(std::io::stdout()).with_session(id));
    let session = RemoteSession::with_id(id, sink, dispatch);

    let outcome = PasteClipboardUseCase::new(clipboard)
        .paste(Some(&session))
        .await;
    session
        .finish()
        .await
        .context("paste dispatch did not complete")?;

    match outcome {
        PasteOutcome::Queued { events, bracketed } => {
            info!(events, bracketed, "paste complete");
            Ok(())
        }
        PasteOutcome::Empty => Ok(()),
        other => anyhow::bail!("paste abandoned: {other:?}"),
    }
}

fn run_keys(config: &AppConfig, actions: &[KeyAction]) -> anyhow::Result<()> {
    let sink = JsonLinesSink::new(std::io::stdout());
    let mut synth = InputSynthesizer::new(ChordKeys::default(), config.gesture.thresholds());
    let mut menu_rx = synth.subscribe_menu();

    for action in actions {
        if action.pressed {
            synth.handle_key_down(Some(&sink), action.code)?;
        } else {
            synth.handle_key_up(Some(&sink), action.code)?;
        }
        report_menu(&mut menu_rx)?;
    }

    // Leave nothing substituted on the "remote" side.
    synth.reset(Some(&sink))?;
    report_menu(&mut menu_rx)
}

fn report_menu(menu_rx: &mut watch::Receiver<bool>) -> anyhow::Result<()> {
    if menu_rx.has_changed()? {
        let shown = *menu_rx.borrow_and_update();
        print_json(&MenuLine {
            menu: if shown { "shown" } else { "hidden" },
        })?;
    }
    Ok(())
}

fn run_keysym(text: &str) -> anyhow::Result<()> {
    for character in text.chars() {
        let keysym = Keysym::from_char(character);
        print_json(&KeysymLine {
            character,
            code_point: u32::from(character),
            keysym,
            name: keysym.and_then(Keysym::name),
        })?;
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging is configured before the config error (if any) is reported, so
    // fall back to `info` when the file cannot be read.
    let config = load_config(cli.config.as_deref());
    let log_level = config
        .as_ref()
        .map(|c| c.logging.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = config.context("failed to load configuration")?;

    match cli.command {
        Command::Paste {
            file,
            batch_size,
            delay_ms,
        } => run_paste(&config, file, batch_size, delay_ms).await,
        Command::Keys { events } => run_keys(&config, &events),
        Command::Keysym { text } => run_keysym(&text),
        Command::Config => {
            print!("{}", render_config(&config)?);
            Ok(())
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_action_parses_hex_decimal_and_names() {
        assert_eq!(
            "down:0xffe3".parse::<KeyAction>().unwrap(),
            KeyAction {
                pressed: true,
                code: Keysym::CONTROL_L
            }
        );
        assert_eq!(
            "up:65367".parse::<KeyAction>().unwrap(),
            KeyAction {
                pressed: false,
                code: Keysym::END
            }
        );
        assert_eq!(
            "DOWN:KP_End".parse::<KeyAction>().unwrap().code,
            Keysym::KP_END
        );
    }

    #[test]
    fn test_key_action_rejects_bad_input() {
        assert!(matches!(
            "0xffe3".parse::<KeyAction>(),
            Err(KeyActionParseError::Format(_))
        ));
        assert!(matches!(
            "sideways:0xffe3".parse::<KeyAction>(),
            Err(KeyActionParseError::Format(_))
        ));
        assert!(matches!(
            "down:".parse::<KeyAction>(),
            Err(KeyActionParseError::Keysym(KeysymParseError::Empty))
        ));
    }

    #[test]
    fn test_cli_parses_keys_command() {
        let cli = Cli::parse_from(["keysynth", "keys", "down:Control_L", "up:Control_L"]);

        match cli.command {
            Command::Keys { events } => assert_eq!(events.len(), 2),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_keys_requires_at_least_one_event() {
        assert!(Cli::try_parse_from(["keysynth", "keys"]).is_err());
    }

    #[test]
    fn test_cli_paste_overrides() {
        // Arrange
        let cli = Cli::parse_from([
            "keysynth",
            "--config",
            "/tmp/k.toml",
            "paste",
            "--file",
            "clip.txt",
            "--batch-size",
            "3",
            "--delay-ms",
            "20",
        ]);

        // Assert
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/k.toml")));
        match cli.command {
            Command::Paste {
                file,
                batch_size,
                delay_ms,
            } => {
                assert_eq!(file, Some(PathBuf::from("clip.txt")));
                assert_eq!(batch_size, Some(3));
                assert_eq!(delay_ms, Some(20));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_dispatch_config_prefers_cli_values() {
        let config = AppConfig::default();

        let from_file = paste_dispatch_config(&config, None, None);
        let overridden = paste_dispatch_config(&config, Some(50), Some(1));

        assert_eq!(from_file, DispatchConfig::default());
        assert_eq!(overridden.batch_size, 50);
        assert_eq!(overridden.batch_delay, Duration::from_millis(1));
    }
}
