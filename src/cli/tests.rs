use super::*;
use crate::core::constants::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use std::path::PathBuf;

fn parse_args(argv: &[&str]) -> Args {
    Args::try_parse_from(argv)
        .unwrap_or_else(|err| panic!("argv={argv:?} should parse successfully: {err}"))
}

#[test]
fn no_subcommand_means_chat_with_defaults() {
    let args = parse_args(&["palaver"]);

    assert_eq!(args.command, None);
    let settings = args.resolve_settings(&Config::default());
    assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(settings.model, DEFAULT_MODEL);
    assert!(!settings.mouse_enabled);
}

#[test]
fn flags_override_config_values() {
    let argv = [
        "palaver",
        "-m",
        "mistral",
        "--endpoint",
        "http://gpu-box:11434/api/chat",
        "-t",
        "work.json",
        "--mouse",
    ];
    let args = parse_args(&argv);
    let config = Config {
        model: Some("phi3".to_string()),
        transcript: Some(PathBuf::from("home.json")),
        ..Default::default()
    };

    let settings = args.resolve_settings(&config);

    assert_eq!(settings.model, "mistral");
    assert_eq!(settings.endpoint, "http://gpu-box:11434/api/chat");
    assert_eq!(settings.transcript_path, PathBuf::from("work.json"));
    assert!(settings.mouse_enabled);
}

#[test]
fn global_flags_work_after_subcommand() {
    let args = parse_args(&["palaver", "chat", "--model", "qwen2.5", "-l", "palaver.log"]);

    assert_eq!(args.command, Some(Commands::Chat));
    assert_eq!(args.model.as_deref(), Some("qwen2.5"));
    assert_eq!(args.log, Some(PathBuf::from("palaver.log")));
}

#[test]
fn parses_config_subcommands() {
    let args = parse_args(&["palaver", "set", "model", "mistral"]);
    assert_eq!(
        args.command,
        Some(Commands::Set {
            key: "model".to_string(),
            value: "mistral".to_string(),
        })
    );

    let args = parse_args(&["palaver", "unset", "mouse"]);
    assert_eq!(
        args.command,
        Some(Commands::Unset {
            key: "mouse".to_string()
        })
    );

    assert_eq!(parse_args(&["palaver", "clear"]).command, Some(Commands::Clear));
    assert_eq!(parse_args(&["palaver", "config"]).command, Some(Commands::Config));
}

#[test]
fn explicit_config_path_is_used() {
    let args = parse_args(&["palaver", "--config", "/tmp/palaver-test.toml", "config"]);

    let path = args.config_path().expect("explicit path");

    assert_eq!(path, PathBuf::from("/tmp/palaver-test.toml"));
}

#[test]
fn set_requires_a_value() {
    assert!(Args::try_parse_from(["palaver", "set", "model"]).is_err());
}
