use clap::{Arg, ArgAction, Command, ValueHint};
use std::path::PathBuf;

/// CLI arguments for tiny-webhook
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config_file: Option<PathBuf>,
    pub host: Option<String>,
    pub max_request_size: Option<usize>,
    pub log_level: Option<String>,
    pub check: bool,
}

impl CliArgs {
    /// Parse command line arguments
    pub fn parse() -> Self {
        let matches = Command::new("tiny-webhook")
            .version(tiny_webhook::VERSION)
            .about("Run shell commands when matching webhook payloads arrive")
            .long_about(
                r#"tiny-webhook listens for JSON payloads over HTTP POST and compares each one
against the hooks declared in its configuration file. The first hook whose
requirements are all present in the payload has its shell command started.

The server can be configured through command line arguments or environment
variables. Command line arguments take precedence over environment variables.

Examples:
  tiny-webhook --config /etc/tiny-webhook/config.yaml
  tiny-webhook --config hooks.json --log-level debug
  tiny-webhook --config config.yaml --check"#,
            )
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path")
                    .long_help(
                        "Path to the configuration file (YAML, JSON or TOML). Values from
TINY_WEBHOOK_* environment variables are merged on top of it.
Environment variable: TINY_WEBHOOK_CONFIG",
                    )
                    .value_hint(ValueHint::FilePath)
                    .value_parser(clap::value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("host")
                    .long("host")
                    .value_name("ADDRESS")
                    .help("Address to bind")
                    .long_help(
                        "Address the HTTP listener binds to. Overrides 'http.host' from
the configuration file. The port always comes from 'http.port'.
Environment variable: TINY_WEBHOOK_HOST",
                    )
                    .value_hint(ValueHint::Hostname),
            )
            .arg(
                Arg::new("max_request_size")
                    .long("max-request-size")
                    .value_name("BYTES")
                    .help("Maximum request body size in bytes")
                    .long_help(
                        "Maximum size allowed for HTTP request bodies.
Larger requests will be rejected.
Environment variable: TINY_WEBHOOK_MAX_REQUEST_SIZE",
                    )
                    .value_parser(clap::value_parser!(usize)),
            )
            .arg(
                Arg::new("log_level")
                    .long("log-level")
                    .value_name("DIRECTIVE")
                    .help("Console filter directive")
                    .long_help(
                        "Set the console filter. Accepts a level (error, warn, info, debug, trace)
or a full directive such as tiny_webhook=trace,tower_http=warn.
Defaults to debug when 'log.levels.debug' is on, info otherwise.
Environment variable: RUST_LOG",
                    ),
            )
            .arg(
                Arg::new("check")
                    .long("check")
                    .help("Validate the configuration and exit")
                    .long_help(
                        "Load and validate the configuration file, report the hooks it
declares, and exit without starting the HTTP listener.",
                    )
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("help_env")
                    .long("help-env")
                    .help("Show all environment variables")
                    .long_help(
                        "Display a comprehensive list of all environment variables
that can be used to configure the server.",
                    )
                    .action(ArgAction::SetTrue),
            )
            .get_matches();

        if matches.get_flag("help_env") {
            Self::print_env_help();
            std::process::exit(0);
        }

        Self {
            config_file: matches.get_one::<PathBuf>("config").cloned(),
            host: matches.get_one::<String>("host").cloned(),
            max_request_size: matches.get_one::<usize>("max_request_size").copied(),
            log_level: matches.get_one::<String>("log_level").cloned(),
            check: matches.get_flag("check"),
        }
    }

    /// Print comprehensive environment variable help
    fn print_env_help() {
        println!("tiny-webhook Environment Variables");
        println!("==================================");
        println!();
        println!("Server:");
        println!("  TINY_WEBHOOK_CONFIG               - Path to config file (default: config.yaml)");
        println!("  TINY_WEBHOOK_HOST                 - Address to bind (default: http.host)");
        println!(
            "  TINY_WEBHOOK_MAX_REQUEST_SIZE     - Max request body size in bytes (default: 16MB)"
        );
        println!();
        println!("Configuration overrides (merged over the config file):");
        println!("  TINY_WEBHOOK_HTTP__PORT           - Listening port");
        println!("  TINY_WEBHOOK_HTTP__HOST           - Address to bind");
        println!("  TINY_WEBHOOK_LOG__FILE            - File receiving every recorded log line");
        println!("  TINY_WEBHOOK_LOG__LEVELS__DEBUG   - Record debug lines (true/false)");
        println!("  TINY_WEBHOOK_LOG__FORMAT          - Console format (pretty, compact, json)");
        println!();
        println!("Logging:");
        println!(
            "  RUST_LOG                          - Console filter directive (eg: debug, tiny_webhook=trace)"
        );
        println!();
        println!("Note: Command line arguments take precedence over environment variables.");
        println!("Use --help for CLI argument documentation.");
    }
}
