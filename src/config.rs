use std::{fmt::Display, ops::RangeInclusive, str::FromStr};

use tracing::warn;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BCRYPT_COST: u32 = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub bcrypt_cost: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parse_or("PORT", std::env::var("PORT").ok(), DEFAULT_PORT),
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            db_max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                std::env::var("DB_MAX_CONNECTIONS").ok(),
                10,
            ),
            bcrypt_cost: bcrypt_cost(std::env::var("BCRYPT_COST").ok()),
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            database_url: None,
            db_max_connections: 1,
            // lowest cost bcrypt accepts
            bcrypt_cost: 4,
        }
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match raw {
        None => default,
        Some(v) => v.trim().parse().unwrap_or_else(|e| {
            warn!("invalid {key} value {v:?} ({e}); using default {default}");
            default
        }),
    }
}

/// bcrypt rejects costs outside this range at hash time.
const BCRYPT_COST_RANGE: RangeInclusive<u32> = 4..=31;

fn bcrypt_cost(raw: Option<String>) -> u32 {
    let cost = parse_or("BCRYPT_COST", raw, DEFAULT_BCRYPT_COST);
    if BCRYPT_COST_RANGE.contains(&cost) {
        return cost;
    }
    warn!(
        "BCRYPT_COST {cost} outside {}..={}; using default {DEFAULT_BCRYPT_COST}",
        BCRYPT_COST_RANGE.start(),
        BCRYPT_COST_RANGE.end()
    );
    DEFAULT_BCRYPT_COST
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_uses_value_when_valid() {
        assert_eq!(parse_or("PORT", Some("8081".into()), DEFAULT_PORT), 8081);
        assert_eq!(parse_or("PORT", Some(" 9000 ".into()), DEFAULT_PORT), 9000);
    }

    #[test]
    fn parse_or_falls_back_on_missing_or_garbage() {
        assert_eq!(parse_or("PORT", None, DEFAULT_PORT), 3000);
        assert_eq!(parse_or("PORT", Some("not-a-port".into()), DEFAULT_PORT), 3000);
        assert_eq!(parse_or("BCRYPT_COST", Some("-1".into()), DEFAULT_BCRYPT_COST), 10);
    }

    #[test]
    fn bcrypt_cost_out_of_range_falls_back() {
        for raw in ["0", "3", "32", "40"] {
            assert_eq!(bcrypt_cost(Some(raw.into())), DEFAULT_BCRYPT_COST, "cost {raw}");
        }
        assert_eq!(bcrypt_cost(Some("4".into())), 4);
        assert_eq!(bcrypt_cost(Some("12".into())), 12);
        assert_eq!(bcrypt_cost(Some("31".into())), 31);
        assert_eq!(bcrypt_cost(None), DEFAULT_BCRYPT_COST);
    }
}
