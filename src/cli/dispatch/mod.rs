use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::Result;

pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let auth_url = matches
        .get_one("auth-url")
        .map(|s: &String| s.to_string())
        .ok_or_else(|| anyhow::anyhow!("missing required argument: --auth-url"))?;

    let mut globals = GlobalArgs::new(auth_url);
    globals.secure_cookies = matches.get_flag("secure-cookies");
    globals.request_timeout = matches.get_one::<u64>("timeout").copied().unwrap_or(30);

    Ok((
        Action::Server {
            port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        },
        globals,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    #[test]
    fn test_handler_defaults() {
        temp_env::with_vars(
            [
                ("ATRIUM_AUTH_URL", Some("https://api.tld")),
                ("ATRIUM_PORT", None::<&str>),
                ("ATRIUM_SECURE_COOKIES", None::<&str>),
                ("ATRIUM_TIMEOUT", None::<&str>),
            ],
            || {
                let matches = commands::new().get_matches_from(vec!["atrium"]);
                let (action, globals) = handler(&matches).unwrap();

                let Action::Server { port } = action;
                assert_eq!(port, 8080);
                assert_eq!(globals.auth_url, "https://api.tld");
                assert!(!globals.secure_cookies);
                assert_eq!(globals.request_timeout, 30);
            },
        );
    }

    #[test]
    fn test_handler_flags() {
        temp_env::with_vars([("ATRIUM_AUTH_URL", None::<&str>)], || {
            let matches = commands::new().get_matches_from(vec![
                "atrium",
                "--auth-url",
                "http://127.0.0.1:9000",
                "--port",
                "3000",
                "--secure-cookies",
                "--timeout",
                "10",
            ]);
            let (action, globals) = handler(&matches).unwrap();

            let Action::Server { port } = action;
            assert_eq!(port, 3000);
            assert_eq!(globals.auth_url, "http://127.0.0.1:9000");
            assert!(globals.secure_cookies);
            assert_eq!(globals.request_timeout, 10);
        });
    }
}
