use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;
use remote_whisper::{
    credential, AudioSource, Component, ComponentConfig, Error, RemoteWhisperTranscriber,
};
use secrecy::SecretString;
use serde_json::{Map, Value};

/// Transcribe audio files with the OpenAI Whisper API and print the documents as JSON
#[derive(Debug, Parser)]
#[command(name = "remote-whisper", version)]
struct Cli {
    /// Audio files to transcribe, in order
    files: Vec<PathBuf>,

    /// Component config previously written with --dump-config
    #[arg(long)]
    config: Option<PathBuf>,

    /// API key; falls back to OPENAI_API_KEY
    #[arg(long)]
    api_key: Option<String>,

    #[arg(long)]
    model: Option<String>,

    #[arg(long)]
    organization: Option<String>,

    #[arg(long)]
    api_base_url: Option<String>,

    /// Extra request parameter, e.g. --param language=en
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    params: Vec<(String, String)>,

    /// Print the component config instead of transcribing
    #[arg(long)]
    dump_config: bool,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

fn load_transcriber(cli: &Cli) -> Result<RemoteWhisperTranscriber, Error> {
    // An explicit key behaves like one passed to the builder
    if let Some(api_key) = cli.api_key.as_deref().filter(|key| !key.is_empty()) {
        credential::set_api_key(SecretString::from(api_key.to_string()));
    }

    let mut config: ComponentConfig = match &cli.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => ComponentConfig::new(RemoteWhisperTranscriber::TYPE_NAME, Map::new()),
    };

    let overrides = [
        ("model_name", &cli.model),
        ("organization", &cli.organization),
        ("api_base_url", &cli.api_base_url),
    ];
    for (key, value) in overrides {
        if let Some(value) = value {
            config
                .init_parameters
                .insert(key.to_string(), Value::String(value.clone()));
        }
    }
    for (key, value) in &cli.params {
        config
            .init_parameters
            .insert(key.clone(), Value::String(value.clone()));
    }

    Ok(RemoteWhisperTranscriber::from_config(config)?)
}

fn run(cli: Cli) -> Result<(), Error> {
    let transcriber = load_transcriber(&cli)?;

    if cli.dump_config {
        println!("{}", serde_json::to_string_pretty(&transcriber.to_config())?);
        return Ok(());
    }

    let sources = cli.files.into_iter().map(AudioSource::Path);
    let output = transcriber.run(sources)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        let test_cases = vec![
            ("language=en", Ok(("language".to_string(), "en".to_string()))),
            ("prompt=a=b", Ok(("prompt".to_string(), "a=b".to_string()))),
            ("temperature=", Ok(("temperature".to_string(), String::new()))),
        ];

        for (raw, expected) in test_cases {
            assert_eq!(parse_param(raw), expected, "Unexpected result for '{}'", raw);
        }

        for raw in ["language", "=en", ""] {
            assert!(parse_param(raw).is_err(), "'{}' should be rejected", raw);
        }
    }

    #[test]
    fn test_cli_parses_params_and_files() {
        let cli = Cli::try_parse_from([
            "remote-whisper",
            "--model",
            "whisper-1",
            "--param",
            "language=en",
            "--param",
            "temperature=0.5",
            "a.wav",
            "b.mp3",
        ])
        .expect("Should parse");

        assert_eq!(cli.model.as_deref(), Some("whisper-1"));
        assert_eq!(
            cli.params,
            vec![
                ("language".to_string(), "en".to_string()),
                ("temperature".to_string(), "0.5".to_string()),
            ]
        );
        assert_eq!(cli.files, vec![PathBuf::from("a.wav"), PathBuf::from("b.mp3")]);
        assert!(!cli.dump_config);
    }
}
