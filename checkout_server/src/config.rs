use std::env;

use checkout_common::Secret;
use log::*;
use rand::{distributions::Alphanumeric, Rng};
use razorpay_tools::RazorpayConfig;

const DEFAULT_CHECKOUT_HOST: &str = "127.0.0.1";
const DEFAULT_CHECKOUT_PORT: u16 = 4000;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub auth: AuthConfig,
    /// Razorpay API configuration for the online payment flow.
    pub razorpay: RazorpayConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_CHECKOUT_HOST.to_string(),
            port: DEFAULT_CHECKOUT_PORT,
            database_url: String::default(),
            auth: AuthConfig::default(),
            razorpay: RazorpayConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("CHECKOUT_HOST").ok().unwrap_or_else(|| DEFAULT_CHECKOUT_HOST.into());
        let port = env::var("CHECKOUT_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for CHECKOUT_PORT. {e} Using the default, \
                         {DEFAULT_CHECKOUT_PORT}, instead."
                    );
                    DEFAULT_CHECKOUT_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_CHECKOUT_PORT);
        let database_url = env::var("CHECKOUT_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ CHECKOUT_DATABASE_URL is not set. Please set it to the URL for the checkout database.");
            String::default()
        });
        let auth = AuthConfig::from_env_or_default();
        let razorpay = RazorpayConfig::new_from_env_or_default();
        Self { host, port, database_url, auth, razorpay }
    }
}

/// JWT signing configuration. Tokens are signed and verified with the same HS256 secret.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: Secret<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        warn!(
            "🪛️ Generating a random JWT secret. Tokens will not survive a restart. Set CHECKOUT_JWT_SECRET to fix \
             this."
        );
        let secret: String = rand::thread_rng().sample_iter(&Alphanumeric).take(48).map(char::from).collect();
        Self { jwt_secret: Secret::new(secret) }
    }
}

impl AuthConfig {
    pub fn from_env_or_default() -> Self {
        env::var("CHECKOUT_JWT_SECRET").map(|s| Self { jwt_secret: Secret::new(s) }).unwrap_or_default()
    }
}
