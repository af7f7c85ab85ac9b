// src/config.rs

use std::{env, str::FromStr, time::Duration};

use dotenvy::dotenv;
use jsonwebtoken::Algorithm;
use secrecy::SecretString;

const DEFAULT_EXPIRE_MINUTES: u64 = 30;
const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8000";

/// Process-wide configuration. Loaded once at startup and never mutated.
#[derive(Debug)]
pub struct Config {
    pub database_url: String,
    /// HMAC key used to sign and verify access tokens.
    pub secret_key: SecretString,
    pub algorithm: Algorithm,
    /// Lifetime applied to tokens when the caller does not pick one.
    pub token_ttl: Duration,
    pub rust_log: String,
    pub server_addr: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let secret_key = env::var("SECRET_KEY").expect("SECRET_KEY must be set");

        let algorithm = env::var("ALGORITHM").unwrap_or_else(|_| "HS256".to_string());
        let algorithm = parse_algorithm(&algorithm)
            .unwrap_or_else(|msg| panic!("Invalid ALGORITHM: {}", msg));

        let token_ttl = match env::var("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Ok(v) => parse_expire_minutes(&v)
                .expect("ACCESS_TOKEN_EXPIRE_MINUTES must be a positive integer"),
            Err(_) => Duration::from_secs(DEFAULT_EXPIRE_MINUTES * 60),
        };

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let server_addr =
            env::var("SERVER_ADDR").unwrap_or_else(|_| DEFAULT_SERVER_ADDR.to_string());

        Self {
            database_url,
            secret_key: SecretString::from(secret_key),
            algorithm,
            token_ttl,
            rust_log,
            server_addr,
        }
    }
}

/// Token lifetime in whole minutes; zero and values that overflow seconds are rejected.
pub fn parse_expire_minutes(value: &str) -> Option<Duration> {
    let minutes = value.trim().parse::<u64>().ok().filter(|m| *m > 0)?;
    minutes.checked_mul(60).map(Duration::from_secs)
}

/// Only the HMAC family works with a shared secret.
pub fn parse_algorithm(name: &str) -> Result<Algorithm, String> {
    let algorithm = Algorithm::from_str(name).map_err(|e| e.to_string())?;
    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        other => Err(format!("{:?} requires a key pair, use HS256/HS384/HS512", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_hmac_algorithms() {
        assert_eq!(parse_algorithm("HS256"), Ok(Algorithm::HS256));
        assert_eq!(parse_algorithm("HS512"), Ok(Algorithm::HS512));
    }

    #[test]
    fn parses_expire_minutes() {
        assert_eq!(parse_expire_minutes("30"), Some(Duration::from_secs(1800)));
        assert_eq!(parse_expire_minutes(" 1 "), Some(Duration::from_secs(60)));
    }

    #[test]
    fn rejects_zero_negative_and_overflowing_minutes() {
        assert_eq!(parse_expire_minutes("0"), None);
        assert_eq!(parse_expire_minutes("-5"), None);
        assert_eq!(parse_expire_minutes("abc"), None);
        assert_eq!(parse_expire_minutes(&u64::MAX.to_string()), None);
        assert_eq!(parse_expire_minutes(&(u64::MAX / 60 + 1).to_string()), None);
    }

    #[test]
    fn rejects_asymmetric_and_unknown_algorithms() {
        assert!(parse_algorithm("RS256").is_err());
        assert!(parse_algorithm("none").is_err());
    }
}
