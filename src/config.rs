use dotenvy::dotenv;
use eyre::Result;
use std::env;
use tracing::info;

use crate::client::DEFAULT_API_URL;
use crate::layout::LayoutConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub port: u16,
    pub layout: LayoutConfig,
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

pub fn load() -> Result<Config> {
    dotenv().ok();

    // Ledger address-lookup endpoint (alias: BLOCKCHAIN_API)
    let api_url = env::var("LEDGER_API_URL")
        .or_else(|_| env::var("BLOCKCHAIN_API"))
        .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

    let port = parse_or("PORT", 8080);

    let defaults = LayoutConfig::default();
    let layout = LayoutConfig {
        seed: parse_or("LAYOUT_SEED", defaults.seed),
        iterations: parse_or("LAYOUT_ITERATIONS", defaults.iterations),
    };

    let cfg = Config { api_url, port, layout };

    info!("Loaded config: {:?}", cfg);

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global, so everything touching them lives in one test.
    #[test]
    fn env_overrides_and_fallbacks() {
        env::remove_var("LEDGER_API_URL");
        env::set_var("BLOCKCHAIN_API", "http://localhost:9000/rawaddr");
        env::set_var("PORT", "not-a-port");
        env::set_var("LAYOUT_SEED", "99");
        env::remove_var("LAYOUT_ITERATIONS");

        let cfg = load().unwrap();
        assert_eq!(cfg.api_url, "http://localhost:9000/rawaddr");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.layout.seed, 99);
        assert_eq!(cfg.layout.iterations, 50);

        env::set_var("LEDGER_API_URL", "http://primary/rawaddr");
        assert_eq!(load().unwrap().api_url, "http://primary/rawaddr");

        for key in ["LEDGER_API_URL", "BLOCKCHAIN_API", "PORT", "LAYOUT_SEED"] {
            env::remove_var(key);
        }
    }
}
