// src/config.rs

use std::env;
use std::str::FromStr;

use dotenvy::dotenv;

use crate::engine::resolver::{DanglingPolicy, MAX_RESOLVE_DEPTH, ResolveOptions};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://quizmaster.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_JWT_EXPIRATION: u64 = 3600;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Shared secret of the admin gate.
    pub admin_password: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_expiration: u64,
    pub rust_log: String,
    pub resolve: ResolveOptions,
    pub seed_demo: bool,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let admin_password = env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD must be set");

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let jwt_expiration = parse_or("JWT_EXPIRATION", DEFAULT_JWT_EXPIRATION);

        let rust_log = log_filter();

        let resolve = ResolveOptions {
            max_depth: parse_or("MAX_RESOLVE_DEPTH", MAX_RESOLVE_DEPTH),
            on_dangling: parse_or("ON_DANGLING_REFERENCE", DanglingPolicy::default()),
        };

        let seed_demo = parse_or("SEED_DEMO", true);

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Self {
            database_url,
            admin_password,
            jwt_secret,
            jwt_expiration,
            rust_log,
            resolve,
            seed_demo,
            bind_addr,
        }
    }
}

/// `RUST_LOG`, or the default filter. Readable before the rest of the config,
/// so the subscriber can be installed first.
pub fn log_filter() -> String {
    env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
}

/// Reads `key` and parses it, keeping `default` when unset or malformed.
fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    parse_value(key, env::var(key).ok().as_deref(), default)
}

fn parse_value<T: FromStr>(key: &str, raw: Option<&str>, default: T) -> T {
    match raw {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Ignoring invalid value {:?} for {}", raw, key);
                default
            }
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_accepts_valid_input() {
        assert_eq!(parse_value("MAX_RESOLVE_DEPTH", Some(" 8 "), MAX_RESOLVE_DEPTH), 8);
        assert_eq!(
            parse_value("ON_DANGLING_REFERENCE", Some("fail"), DanglingPolicy::Skip),
            DanglingPolicy::Fail
        );
        assert!(!parse_value("SEED_DEMO", Some("false"), true));
    }

    #[test]
    fn test_parse_value_falls_back_on_missing_or_malformed() {
        assert_eq!(parse_value("JWT_EXPIRATION", None, DEFAULT_JWT_EXPIRATION), 3600);
        assert_eq!(parse_value("JWT_EXPIRATION", Some("soon"), DEFAULT_JWT_EXPIRATION), 3600);
        assert_eq!(
            parse_value("ON_DANGLING_REFERENCE", Some("ignore"), DanglingPolicy::Skip),
            DanglingPolicy::Skip
        );
    }
}
