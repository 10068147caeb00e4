use crate::config::{
    ConfigError, ConfigLoader, LogFormat, LogLevels, LoggingConfig, WebPortalConfig, WebhookConfig,
};
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;

fn load(yaml: &str) -> Result<WebhookConfig, ConfigError> {
    ConfigLoader::new().load_yaml_str(yaml).extract()
}

fn validation_message(yaml: &str) -> String {
    match load(yaml) {
        Err(ConfigError::ValidationError(message)) => message,
        other => panic!("expected a validation error, got {:?}", other),
    }
}

const MINIMAL: &str = r#"
http:
  port: 8081
hooks:
  - name: deploy
    requirements:
      event: push
    action:
      command: echo hi
"#;

#[test]
fn test_minimal_config() {
    let config = load(MINIMAL).unwrap();

    assert_eq!(config.http.port, 8081);
    assert_eq!(config.http.host, "0.0.0.0");
    assert_eq!(config.hooks.len(), 1);
    assert_eq!(config.hooks[0].name.as_deref(), Some("deploy"));
    assert_eq!(config.hooks[0].requirements, json!({"event": "push"}));
    assert_eq!(config.hooks[0].action.command.as_deref(), Some("echo hi"));
    assert_eq!(config.hooks[0].action.cwd, None);
    assert_eq!(config.log, LoggingConfig::default());
}

#[test]
fn test_default_logging_config() {
    let log = LoggingConfig::default();
    assert_eq!(log.levels, LogLevels::default());
    assert!(log.levels.critical);
    assert!(!log.levels.info);
    assert_eq!(log.web_portal, WebPortalConfig { enabled: false, count: 20 });
    assert_eq!(log.format, LogFormat::Compact);
    assert_eq!(log.file, None);
}

#[test]
fn test_full_config() {
    let config = load(
        r#"
http:
  port: 9000
  host: 127.0.0.1
hooks:
  - requirements: {}
    action:
      command: ./deploy.sh
      cwd: /srv/app
    message:
      markdown: "*deployed*"
  - name: second
    requirements:
      repository:
        name: app
log:
  file: /tmp/tiny-webhook.log
  format: json
  levels:
    errors: true
    warnings: true
    info: true
  web-portal:
    enabled: true
    count: 5
"#,
    )
    .unwrap();

    assert_eq!(config.http.host, "127.0.0.1");
    assert_eq!(config.hooks[0].name, None);
    assert_eq!(config.hooks[0].action.cwd, Some(PathBuf::from("/srv/app")));
    assert_eq!(
        config.hooks[0].message.as_ref().and_then(|m| m.body()),
        Some("*deployed*")
    );
    assert_eq!(config.hooks[1].action.command, None);
    assert!(config.log.levels.info);
    assert!(!config.log.levels.debug);
    assert_eq!(config.log.format, LogFormat::Json);
    assert_eq!(config.log.file, Some(PathBuf::from("/tmp/tiny-webhook.log")));
    assert_eq!(config.log.web_portal, WebPortalConfig { enabled: true, count: 5 });
}

#[test]
fn test_missing_http_is_fatal() {
    let message = validation_message("hooks:\n  - requirements: {}\n");
    assert!(message.contains("does not have data for 'http'"), "{}", message);
}

#[test]
fn test_missing_port_is_fatal() {
    let message = validation_message("http:\n  host: localhost\nhooks:\n  - requirements: {}\n");
    assert!(message.contains("'http.port'"), "{}", message);
}

#[test]
fn test_non_numeric_port_is_fatal() {
    let message = validation_message("http:\n  port: \"8081\"\nhooks:\n  - requirements: {}\n");
    assert!(message.contains("is not a number"), "{}", message);
}

#[test]
fn test_out_of_range_port_is_fatal() {
    for port in ["0", "70000", "-1", "80.5"] {
        let message = validation_message(&format!(
            "http:\n  port: {}\nhooks:\n  - requirements: {{}}\n",
            port
        ));
        assert!(message.contains("not a valid port"), "{}", message);
    }
}

#[test]
fn test_missing_hooks_is_fatal() {
    let message = validation_message("http:\n  port: 8081\n");
    assert!(message.contains("does not have any hooks"), "{}", message);
}

#[test]
fn test_hooks_must_be_a_non_empty_list() {
    let message = validation_message("http:\n  port: 8081\nhooks:\n  name: x\n");
    assert!(message.contains("is not a list"), "{}", message);

    let message = validation_message("http:\n  port: 8081\nhooks: []\n");
    assert!(message.contains("is empty"), "{}", message);
}

#[test]
fn test_malformed_hooks_are_rejected() {
    let message = validation_message("http:\n  port: 8081\nhooks:\n  - just a string\n");
    assert!(message.contains("Hook #0"), "{}", message);

    let message = validation_message(
        "http:\n  port: 8081\nhooks:\n  - requirements: {}\n  - name: nope\n",
    );
    assert!(message.contains("Hook #1") && message.contains("'requirements'"), "{}", message);

    let message = validation_message(
        "http:\n  port: 8081\nhooks:\n  - requirements: {}\n    action:\n      command: [1, 2]\n",
    );
    assert!(message.contains("malformed"), "{}", message);
}

#[test]
fn test_null_action_means_no_action() {
    let config = load("http:\n  port: 8081\nhooks:\n  - requirements: {}\n    action: ~\n").unwrap();
    assert_eq!(config.hooks[0].action.command, None);
}

#[test]
fn test_load_json_file_names_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tiny-webhook.json");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, r#"{{"http": {{"port": "x"}}, "hooks": [{{"requirements": {{}}}}]}}"#).unwrap();

    let err = ConfigLoader::new()
        .load_file(&path)
        .unwrap()
        .extract()
        .unwrap_err();
    assert!(err.to_string().contains(&path.display().to_string()));
}

#[test]
fn test_missing_and_unsupported_files() {
    let dir = tempfile::tempdir().unwrap();

    let mut loader = ConfigLoader::new();

    let missing = loader.load_file(dir.path().join("nope.yaml"));
    assert!(matches!(missing, Err(ConfigError::FileLoadError(_))));

    let ini = dir.path().join("config.ini");
    std::fs::write(&ini, "port=1").unwrap();
    let unsupported = loader.load_file(&ini);
    assert!(matches!(unsupported, Err(ConfigError::FileLoadError(_))));
}

#[test]
fn test_config_serialization() {
    let config = load(MINIMAL).unwrap();

    let json = serde_json::to_string(&config).unwrap();
    let deserialized: WebhookConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(config.http, deserialized.http);
    assert_eq!(config.hooks, deserialized.hooks);
    assert!(json.contains("web-portal"));
}

#[test]
fn test_log_format_parsing() {
    assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
    assert_eq!("pretty".parse::<LogFormat>(), Ok(LogFormat::Pretty));
    assert!("fancy".parse::<LogFormat>().is_err());
    assert_eq!(LogFormat::Compact.to_string(), "compact");
}
