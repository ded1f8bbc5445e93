use clap::Parser;
use cottonaid_client::app::{
    Cli, Command, Config, ConfigError, HistoryCommand, LogFormat, LogLevel, resolve_config,
};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::NamedTempFile;

const CONFIG_VARS: [&str; 10] = [
    "COTTONAID_API_URL",
    "USE_JSON_API",
    "MAX_FILE_SIZE_MB",
    "CONNECT_TIMEOUT_SECS",
    "REQUEST_TIMEOUT_SECS",
    "HISTORY_DIR",
    "EPHEMERAL_HISTORY",
    "LOG_LEVEL",
    "LOG_FORMAT",
    "CONFIG_FILE",
];

/// Runs `f` with every configuration variable removed from the environment.
fn with_clean_env<R>(f: impl FnOnce() -> R) -> R {
    temp_env::with_vars_unset(CONFIG_VARS, f)
}

#[test]
fn test_from_env_defaults() {
    let config = with_clean_env(|| Config::from_env().unwrap());

    assert_eq!(config.api_url, "https://cottonaid.onrender.com");
    assert!(!config.use_json_api);
    assert_eq!(config.max_file_size_mb, 16);
    assert_eq!(config.connect_timeout, Duration::from_secs(10));
    assert_eq!(config.request_timeout, None);
    assert_eq!(config.history_dir, PathBuf::from(".cottonaid"));
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.log_format, LogFormat::Pretty);
}

#[test]
fn test_from_env_overrides() {
    let config = with_clean_env(|| {
        temp_env::with_vars(
            [
                ("COTTONAID_API_URL", Some("http://localhost:5000")),
                ("USE_JSON_API", Some("yes")),
                ("MAX_FILE_SIZE_MB", Some("8")),
                ("REQUEST_TIMEOUT_SECS", Some("45")),
                ("HISTORY_DIR", Some("/var/lib/cottonaid")),
                ("LOG_LEVEL", Some("DEBUG")),
                ("LOG_FORMAT", Some("json")),
            ],
            || Config::from_env().unwrap(),
        )
    });

    assert_eq!(config.api_url, "http://localhost:5000");
    assert!(config.use_json_api);
    assert_eq!(config.max_file_size_mb, 8);
    assert_eq!(config.request_timeout, Some(Duration::from_secs(45)));
    assert_eq!(config.history_dir, PathBuf::from("/var/lib/cottonaid"));
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.log_format, LogFormat::Json);

    let client = config.client_config();
    assert!(client.prefer_json);
    assert_eq!(client.max_upload_bytes(), 8 * 1024 * 1024);
}

#[test]
fn test_from_env_rejects_bad_values() {
    let result = with_clean_env(|| {
        temp_env::with_var("MAX_FILE_SIZE_MB", Some("sixteen"), Config::from_env)
    });
    assert!(matches!(result, Err(ConfigError::EnvError(_))));

    let result = with_clean_env(|| {
        temp_env::with_var("USE_JSON_API", Some("maybe"), Config::from_env)
    });
    assert!(matches!(result, Err(ConfigError::EnvError(_))));

    let result = with_clean_env(|| {
        temp_env::with_var("COTTONAID_API_URL", Some("not a url"), Config::from_env)
    });
    assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));

    let result = with_clean_env(|| {
        temp_env::with_var("MAX_FILE_SIZE_MB", Some("0"), Config::from_env)
    });
    assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
}

#[test]
fn test_cli_flags_and_subcommands() {
    let cli = with_clean_env(|| {
        Cli::try_parse_from([
            "cottonaid",
            "--api-url",
            "http://localhost:5000",
            "--use-json-api",
            "--max-file-size-mb",
            "4",
            "--ephemeral",
            "--log-level",
            "warn",
            "predict",
            "leaf.jpg",
        ])
        .unwrap()
    });

    assert_eq!(cli.config.api_url, "http://localhost:5000");
    assert!(cli.config.use_json_api);
    assert_eq!(cli.config.max_file_size_mb, 4);
    assert!(cli.config.ephemeral);
    assert_eq!(cli.config.log_level, LogLevel::Warn);
    assert_eq!(
        cli.command,
        Command::Predict {
            path: PathBuf::from("leaf.jpg")
        }
    );

    let cli = with_clean_env(|| {
        Cli::try_parse_from(["cottonaid", "history", "remove", "1717230000000"]).unwrap()
    });
    assert_eq!(
        cli.command,
        Command::History(HistoryCommand::Remove { id: 1717230000000 })
    );
}

#[test]
fn test_cli_reads_boolean_env_like_from_env() {
    let cases = [
        ("1", true),
        ("yes", true),
        ("on", true),
        ("0", false),
        ("false", false),
    ];

    for (value, expected) in cases {
        let (cli, config) = with_clean_env(|| {
            temp_env::with_vars(
                [
                    ("USE_JSON_API", Some(value)),
                    ("EPHEMERAL_HISTORY", Some(value)),
                ],
                || {
                    (
                        Cli::try_parse_from(["cottonaid", "health"]).unwrap(),
                        Config::from_env().unwrap(),
                    )
                },
            )
        });

        assert_eq!(cli.config.use_json_api, expected, "USE_JSON_API={value}");
        assert_eq!(cli.config.ephemeral, expected, "EPHEMERAL_HISTORY={value}");
        assert_eq!(config.use_json_api, expected);
        assert_eq!(config.ephemeral, expected);
    }
}

#[test]
fn test_cli_rejects_non_boolean_env() {
    let result = with_clean_env(|| {
        temp_env::with_var("USE_JSON_API", Some("maybe"), || {
            Cli::try_parse_from(["cottonaid", "health"])
        })
    });
    assert!(result.is_err());
}

#[test]
fn test_cli_requires_a_command() {
    let result = with_clean_env(|| Cli::try_parse_from(["cottonaid"]));
    assert!(result.is_err());
}

#[test]
fn test_resolve_config_from_flags_derives_durations() {
    let cli = with_clean_env(|| {
        Cli::try_parse_from([
            "cottonaid",
            "--connect-timeout-secs",
            "3",
            "--request-timeout-secs",
            "20",
            "health",
        ])
        .unwrap()
    });

    let config = resolve_config(cli.config).unwrap();
    assert_eq!(config.connect_timeout, Duration::from_secs(3));
    assert_eq!(config.request_timeout, Some(Duration::from_secs(20)));
}

#[test]
fn test_resolve_config_rejects_invalid_flags() {
    let cli = with_clean_env(|| {
        Cli::try_parse_from(["cottonaid", "--api-url", "ftp://example.com", "health"]).unwrap()
    });

    assert!(matches!(
        resolve_config(cli.config),
        Err(ConfigError::InvalidUrl(_))
    ));
}

#[test]
fn test_resolve_config_prefers_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
api_url = "https://cotton.example.org"
use_json_api = true
max_file_size_mb = 2
history_dir = "/tmp/cotton-history"
log_level = "trace"
"#
    )
    .unwrap();

    let path = file.path().to_string_lossy().into_owned();
    let cli = with_clean_env(|| {
        Cli::try_parse_from([
            "cottonaid",
            "--api-url",
            "http://ignored.local",
            "--config-file",
            path.as_str(),
            "metadata",
        ])
        .unwrap()
    });

    let config = resolve_config(cli.config).unwrap();
    assert_eq!(config.api_url, "https://cotton.example.org");
    assert!(config.use_json_api);
    assert_eq!(config.max_file_size_mb, 2);
    assert_eq!(config.history_dir, PathBuf::from("/tmp/cotton-history"));
    assert_eq!(config.log_level, LogLevel::Trace);
    assert_eq!(config.connect_timeout, Duration::from_secs(10));
}

#[test]
fn test_resolve_config_missing_file() {
    let config = Config {
        config_file: Some(PathBuf::from("/nonexistent/cottonaid.toml")),
        ..Config::default()
    };

    assert!(matches!(
        resolve_config(config),
        Err(ConfigError::FileError(_))
    ));
}
