use anyhow::Context;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Where one token class gets its signing and verification material.
#[derive(Clone)]
pub enum KeyMaterial {
    /// PEM encoded RSA pair, tokens are signed with RS256.
    Rsa {
        private_pem: Vec<u8>,
        public_pem: Vec<u8>,
    },
    /// Shared HS256 secret for simpler deployments.
    Secret(Vec<u8>),
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyMaterial::Rsa { .. } => f.write_str("KeyMaterial::Rsa(..)"),
            KeyMaterial::Secret(_) => f.write_str("KeyMaterial::Secret(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub issuer: String,
    pub access_ttl_minutes: i64,
    pub refresh_ttl_days: i64,
    pub access: KeyMaterial,
    pub refresh: KeyMaterial,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
    pub cookie_secure: bool,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let port = match std::env::var("APP_PORT") {
            Ok(v) => v.parse::<u16>().context("APP_PORT must be a port number")?,
            Err(_) => 5000,
        };

        let jwt_secret = std::env::var("JWT_SECRET").ok();
        let refresh_secret = std::env::var("REFRESH_SECRET").ok().or_else(|| jwt_secret.clone());

        let jwt = JwtConfig {
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "budgetto".into()),
            access_ttl_minutes: env_ttl("ACCESS_TTL_MINUTES", 60, MAX_ACCESS_TTL_MINUTES)?,
            refresh_ttl_days: env_ttl("REFRESH_TTL_DAYS", 90, MAX_REFRESH_TTL_DAYS)?,
            access: key_material("ACCESS", jwt_secret.as_deref())?,
            refresh: key_material("REFRESH", refresh_secret.as_deref())?,
        };

        Ok(Self {
            database_url,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
            jwt,
            cookie_secure: std::env::var("COOKIE_SECURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            cors_allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .map(|v| split_origins(&v))
                .unwrap_or_default(),
        })
    }
}

// One week of access, ten years of refresh.
const MAX_ACCESS_TTL_MINUTES: i64 = 7 * 24 * 60;
const MAX_REFRESH_TTL_DAYS: i64 = 3650;

fn env_ttl(name: &str, default: i64, max: i64) -> anyhow::Result<i64> {
    match std::env::var(name) {
        Ok(raw) => parse_ttl(name, &raw, max),
        Err(_) => Ok(default),
    }
}

fn parse_ttl(name: &str, raw: &str, max: i64) -> anyhow::Result<i64> {
    let value = raw
        .trim()
        .parse::<i64>()
        .with_context(|| format!("{name} must be a whole number"))?;
    if !(1..=max).contains(&value) {
        anyhow::bail!("{name} must be between 1 and {max}, got {value}");
    }
    Ok(value)
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Reads `<PREFIX>_PRIVATE_KEY` / `<PREFIX>_PUBLIC_KEY` (base64 of the PEM text),
/// falling back to the shared secret when neither is present.
fn key_material(prefix: &str, secret: Option<&str>) -> anyhow::Result<KeyMaterial> {
    let private = std::env::var(format!("{prefix}_PRIVATE_KEY")).ok();
    let public = std::env::var(format!("{prefix}_PUBLIC_KEY")).ok();

    match (private, public, secret) {
        (Some(private), Some(public), _) => Ok(KeyMaterial::Rsa {
            private_pem: decode_pem(&private).with_context(|| format!("{prefix}_PRIVATE_KEY"))?,
            public_pem: decode_pem(&public).with_context(|| format!("{prefix}_PUBLIC_KEY"))?,
        }),
        (Some(_), None, _) | (None, Some(_), _) => {
            anyhow::bail!("{prefix}_PRIVATE_KEY and {prefix}_PUBLIC_KEY must be set together")
        }
        (None, None, Some(secret)) if !secret.is_empty() => {
            Ok(KeyMaterial::Secret(secret.as_bytes().to_vec()))
        }
        _ => anyhow::bail!("no signing key configured for {prefix} tokens"),
    }
}

fn decode_pem(encoded: &str) -> anyhow::Result<Vec<u8>> {
    STANDARD
        .decode(encoded.trim())
        .context("key is not valid base64")
}
