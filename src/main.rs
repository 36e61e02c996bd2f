use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use aloud::voice::{VOICES, find_voice};
use aloud::{Provider, Settings, TextGenerator, TextToSpeech};

/// Aloud - read text aloud via cloud TTS, with LLM continue/summarize
#[derive(Parser)]
#[command(name = "aloud", version, about)]
struct Cli {
    /// Path to a config file (default: ~/.config/aloud/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Provider to use ("gemini" or "openai")
    #[arg(short, long, env = "ALOUD_PROVIDER")]
    provider: Option<Provider>,

    /// API key for the provider
    #[arg(short = 'k', long, env = "ALOUD_API_KEY")]
    api_key: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Synthesize text to an audio file
    Speak {
        /// Text to speak; reads stdin when omitted
        text: Option<String>,
        /// Voice to use
        #[arg(short, long)]
        voice: Option<String>,
        /// Use two-speaker synthesis (Gemini only)
        #[arg(short, long)]
        multi_speaker: bool,
        /// Output file; extension defaults to the provider's format
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Ask the LLM to continue the text
    Continue {
        /// Text to continue; reads stdin when omitted
        text: Option<String>,
    },
    /// Ask the LLM to rewrite the text as a two-speaker script
    Summarize {
        /// Text to summarize; reads stdin when omitted
        text: Option<String>,
    },
    /// List available voices
    Voices,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info,aloud=info",
        1 => "info,aloud=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if matches!(cli.command, Command::Voices) {
        for voice in VOICES {
            println!("{} ({})", voice.name, voice.description);
        }
        return Ok(());
    }

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(provider) = cli.provider {
        settings.provider = provider;
    }
    if let Some(api_key) = cli.api_key {
        settings.api_key = api_key;
    }

    match cli.command {
        Command::Speak {
            text,
            voice,
            multi_speaker,
            output,
        } => {
            if let Some(voice) = voice {
                settings.voice = resolve_voice(settings.provider, voice)?;
            }
            settings.multi_speaker |= multi_speaker;

            let text = resolve_text(text)?;
            let tts = TextToSpeech::from_settings(&settings)?;
            let synthesis = tts.synthesize(&text).await?;

            let path = output
                .unwrap_or_else(|| PathBuf::from(format!("speech.{}", synthesis.extension())));
            std::fs::write(&path, &synthesis.bytes)?;

            tracing::info!(
                path = %path.display(),
                bytes = synthesis.bytes.len(),
                mime = synthesis.mime,
                "wrote audio"
            );
        }
        Command::Continue { text } => {
            let text = resolve_text(text)?;
            let generator = TextGenerator::from_settings(&settings)?;
            println!("{}", generator.continue_text(&text).await?);
        }
        Command::Summarize { text } => {
            let text = resolve_text(text)?;
            let generator = TextGenerator::from_settings(&settings)?;
            println!("{}", generator.summarize_as_script(&text).await?);
        }
        Command::Voices => unreachable!("handled above"),
    }

    Ok(())
}

/// Check a requested voice against the catalog and normalize its casing.
///
/// Gemini voices must come from the prebuilt catalog; OpenAI voice names
/// are passed through for the API to validate.
fn resolve_voice(provider: Provider, voice: String) -> anyhow::Result<String> {
    match provider {
        Provider::Gemini => find_voice(&voice)
            .map(|v| v.name.to_string())
            .ok_or_else(|| anyhow::anyhow!("unknown voice: {voice} (run `aloud voices`)")),
        Provider::OpenAI => Ok(voice),
    }
}

/// Use the given text, or read it from stdin when omitted
fn resolve_text(text: Option<String>) -> anyhow::Result<String> {
    let text = match text {
        Some(t) => t,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let text = text.trim().to_string();
    anyhow::ensure!(!text.is_empty(), "no text given");

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gemini_voice_is_normalized_from_catalog() {
        let voice = resolve_voice(Provider::Gemini, "zephyr".to_string()).unwrap();
        assert_eq!(voice, "Zephyr");
    }

    #[test]
    fn unknown_gemini_voice_is_rejected() {
        let err = resolve_voice(Provider::Gemini, "Nonexistent".to_string()).unwrap_err();
        assert!(err.to_string().contains("unknown voice"));
    }

    #[test]
    fn openai_voice_passes_through() {
        let voice = resolve_voice(Provider::OpenAI, "nova".to_string()).unwrap();
        assert_eq!(voice, "nova");
    }
}
