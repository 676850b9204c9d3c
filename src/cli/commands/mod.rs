use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("atrium")
        .about("Web session gateway")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("ATRIUM_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("auth-url")
                .short('a')
                .long("auth-url")
                .help("Base URL of the authentication API, example: https://api.tld")
                .env("ATRIUM_AUTH_URL")
                .required(true),
        )
        .arg(
            Arg::new("secure-cookies")
                .long("secure-cookies")
                .help("Mark session cookies Secure (HTTPS-only), enable in production")
                .env("ATRIUM_SECURE_COOKIES")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .help("Timeout in seconds for requests against the authentication API")
                .default_value("30")
                .env("ATRIUM_TIMEOUT")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("ATRIUM_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "atrium");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            "Web session gateway"
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_check_port_and_auth_url() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "atrium",
            "--port",
            "8080",
            "--auth-url",
            "https://api.tld",
            "--timeout",
            "15",
        ]);

        assert_eq!(matches.get_one::<u16>("port").map(|s| *s), Some(8080));
        assert_eq!(
            matches.get_one::<String>("auth-url").map(|s| s.to_string()),
            Some("https://api.tld".to_string())
        );
        assert_eq!(matches.get_one::<u64>("timeout").map(|s| *s), Some(15));
        assert!(!matches.get_flag("secure-cookies"));
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("ATRIUM_AUTH_URL", Some("https://api.tld")),
                ("ATRIUM_PORT", Some("443")),
                ("ATRIUM_SECURE_COOKIES", Some("true")),
                ("ATRIUM_TIMEOUT", Some("5")),
                ("ATRIUM_LOG_LEVEL", Some("info")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["atrium"]);
                assert_eq!(matches.get_one::<u16>("port").map(|s| *s), Some(443));
                assert_eq!(
                    matches.get_one::<String>("auth-url").map(|s| s.to_string()),
                    Some("https://api.tld".to_string())
                );
                assert!(matches.get_flag("secure-cookies"));
                assert_eq!(matches.get_one::<u64>("timeout").map(|s| *s), Some(5));
                assert_eq!(matches.get_one::<u8>("verbosity").map(|s| *s), Some(2));
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars(
                [
                    ("ATRIUM_LOG_LEVEL", Some(level)),
                    ("ATRIUM_AUTH_URL", Some("https://api.tld")),
                ],
                || {
                    let command = new();
                    let matches = command.get_matches_from(vec!["atrium"]);
                    assert_eq!(
                        matches.get_one::<u8>("verbosity").map(|s| *s),
                        Some(index as u8)
                    );
                },
            );
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("ATRIUM_LOG_LEVEL", None::<String>)], || {
                let mut args = vec![
                    "atrium".to_string(),
                    "--auth-url".to_string(),
                    "https://api.tld".to_string(),
                ];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    let v = format!("-{}", "v".repeat(index));
                    args.push(v);
                }

                let command = new();

                let matches = command.get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>("verbosity").map(|s| *s),
                    Some(index as u8)
                );
            });
        }
    }
}
