use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use soundobj::{Engine, EngineConfig, Sound};
use tracing::info;

#[derive(Parser, Debug, PartialEq)]
#[command(name = "soundobj-play", about = "Play a sound file through the soundobj engine", version)]
struct Args {
    /// Sound file to play
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Engine configuration as JSON
    #[arg(long, value_name = "ENGINE_JSON")]
    config: Option<PathBuf>,

    /// Decode the whole file up front instead of streaming it
    #[arg(long)]
    decode: bool,

    /// Linear sound volume (1.0 = unchanged)
    #[arg(long)]
    volume: Option<f32>,

    /// Loop until stopped
    #[arg(long = "loop")]
    looping: bool,
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("failed to read engine config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let engine = Engine::with_config(&config).context("failed to start audio engine")?;
    let mut sound = Sound::new(&engine);
    sound
        .load_from_file(&args.file, !args.decode)
        .with_context(|| format!("failed to load {}", args.file.display()))?;

    if let Some(volume) = args.volume {
        sound.set_volume(volume);
    }
    sound.set_looping(args.looping);
    if !sound.play() {
        bail!("failed to start playback");
    }
    info!(
        "Playing {} ({:.1}s), press Enter to stop",
        args.file.display(),
        sound.length_in_seconds()
    );

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;

    sound.stop();
    drop(sound);
    drop(engine);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soundobj=debug,soundobj_play=info".into()),
        )
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("soundobj-play").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_full() {
        let args = parse(&["a.ogg", "--config", "engine.json", "--decode", "--volume", "0.5", "--loop"]).unwrap();
        assert_eq!(
            args,
            Args {
                file: PathBuf::from("a.ogg"),
                config: Some(PathBuf::from("engine.json")),
                decode: true,
                volume: Some(0.5),
                looping: true,
            }
        );
    }

    #[test]
    fn test_parse_defaults() {
        let args = parse(&["a.wav"]).unwrap();
        assert_eq!(args.config, None);
        assert!(!args.decode);
        assert_eq!(args.volume, None);
        assert!(!args.looping);
    }

    #[test]
    fn test_parse_requires_file() {
        let err = parse(&[]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        assert!(parse(&["--loop"]).is_err());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            parse(&["a.wav", "--volume", "loud"]).unwrap_err().kind(),
            clap::error::ErrorKind::ValueValidation
        );
        assert!(parse(&["a.wav", "--config"]).is_err());
        assert_eq!(
            parse(&["a.wav", "--fast"]).unwrap_err().kind(),
            clap::error::ErrorKind::UnknownArgument
        );
        assert!(parse(&["a.wav", "b.wav"]).is_err());
    }
}
