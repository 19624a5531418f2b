use clap::CommandFactory;

use super::*;

#[test]
fn cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn ws_url_maps_scheme() {
    assert_eq!(ws_url("http://127.0.0.1:3000").unwrap(), "ws://127.0.0.1:3000/api/ws");
    assert_eq!(ws_url("https://gist.example").unwrap(), "wss://gist.example/api/ws");
}

#[test]
fn ws_url_rejects_other_schemes() {
    assert!(matches!(ws_url("ftp://host"), Err(CliError::InvalidBaseUrl(_))));
}

#[test]
fn parses_edit_arguments() {
    let cli = Cli::try_parse_from(["gistdesk-cli", "edit", "abc", "foo"]).unwrap();
    match cli.command {
        CliCommand::Edit { gist_id, gist_name } => {
            assert_eq!(gist_id, "abc");
            assert_eq!(gist_name, "foo");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn edit_requires_both_coordinates() {
    assert!(Cli::try_parse_from(["gistdesk-cli", "edit", "abc"]).is_err());
}

#[test]
fn base_url_flag_overrides_default() {
    let cli = Cli::try_parse_from(["gistdesk-cli", "--base-url", "http://10.0.0.2:4000", "create"]).unwrap();
    assert_eq!(cli.base_url, "http://10.0.0.2:4000");
    assert!(matches!(cli.command, CliCommand::Create));
}

#[test]
fn watch_count_is_optional() {
    let cli = Cli::try_parse_from(["gistdesk-cli", "watch", "--count", "3", "--timeout-secs", "5"]).unwrap();
    assert!(matches!(cli.command, CliCommand::Watch { count: Some(3), timeout_secs: Some(5) }));
    let cli = Cli::try_parse_from(["gistdesk-cli", "watch"]).unwrap();
    assert!(matches!(cli.command, CliCommand::Watch { count: None, timeout_secs: None }));
}
