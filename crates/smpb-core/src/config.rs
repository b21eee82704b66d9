use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, Result};

pub const DEFAULT_SITE_BASE_URL: &str = "https://pocket.shonenmagazine.com";

/// Source-site login credentials. Loaded once at startup, never mutated.
///
/// Both fields must be present for the scraper to attempt a login; a lone
/// email or password is treated as anonymous access.
#[derive(Clone, Debug, Default)]
pub struct Credentials {
    pub email_address: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn pair(&self) -> Option<(&str, &str)> {
        match (&self.email_address, &self.password) {
            (Some(e), Some(p)) => Some((e.as_str(), p.as_str())),
            _ => None,
        }
    }
}

/// Typed configuration, built once at startup and shared read-only.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,
    pub credentials: Credentials,
    pub site_base_url: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let telegram_bot_token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let credentials = Credentials {
            email_address: env_str("EMAIL_ADDRESS").and_then(non_empty),
            password: env_str("PASSWORD").and_then(non_empty),
        };

        let site_base_url = env_str("SITE_BASE_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_SITE_BASE_URL.to_string());
        let site_base_url = site_base_url.trim_end_matches('/').to_string();

        let request_timeout =
            Duration::from_millis(env_u64("REQUEST_TIMEOUT_MS").unwrap_or(30_000));

        Ok(Self {
            telegram_bot_token,
            credentials,
            site_base_url,
            request_timeout,
        })
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_pair_requires_both_fields() {
        let none = Credentials::default();
        assert!(none.pair().is_none());

        let half = Credentials {
            email_address: Some("a@b.c".to_string()),
            password: None,
        };
        assert!(half.pair().is_none());

        let full = Credentials {
            email_address: Some("a@b.c".to_string()),
            password: Some("hunter2".to_string()),
        };
        assert_eq!(full.pair(), Some(("a@b.c", "hunter2")));
    }
}
