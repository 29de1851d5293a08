use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use crate::adapters::DEFAULT_JPEG_QUALITY;
use crate::auth::hash_api_key;

/// Per-IP rate limit for generation routes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimit {
    /// Seconds until one spent request is replenished
    pub per_second: u64,
    /// Requests allowed back to back before limiting starts
    pub burst: u32,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: IpAddr,
    pub port: u16,
    /// Maximum request body size (multipart forms included)
    pub max_upload_bytes: usize,
    /// Maximum size of a single uploaded image
    pub max_image_bytes: usize,
    pub jpeg_quality: u8,
    /// Drafts kept in memory before the oldest is evicted
    pub max_drafts: usize,
    /// `None` disables rate limiting
    pub rate_limit: Option<RateLimit>,
    /// SHA-256 of the API key guarding `/api`; `None` leaves it open
    pub api_key_hash: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let per_second: u64 = parse_var("RATE_LIMIT_PER_SECOND", 2);
        let burst: u32 = parse_var("RATE_LIMIT_BURST", 10);

        Self {
            bind_address: parse_var("BIND_ADDRESS", IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            port: parse_var("PORT", 8501),
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", 20 * 1024 * 1024),
            max_image_bytes: parse_var("MAX_IMAGE_BYTES", 10 * 1024 * 1024),
            jpeg_quality: parse_var::<u8>("JPEG_QUALITY", DEFAULT_JPEG_QUALITY).clamp(1, 100),
            max_drafts: parse_var::<usize>("MAX_DRAFTS", 100).max(1),
            rate_limit: (per_second > 0).then_some(RateLimit {
                per_second,
                burst: burst.max(1),
            }),
            api_key_hash: env::var("API_KEY")
                .ok()
                .filter(|key| !key.is_empty())
                .map(|key| hash_api_key(&key)),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    /// Check if the JSON API requires a bearer key
    pub fn api_key_required(&self) -> bool {
        self.api_key_hash.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8501,
            max_upload_bytes: 20 * 1024 * 1024,
            max_image_bytes: 10 * 1024 * 1024,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            max_drafts: 100,
            rate_limit: None,
            api_key_hash: None,
        }
    }
}

/// Read and parse an env var, falling back to `default` when unset or invalid
fn parse_var<T>(name: &str, default: T) -> T
where
    T: FromStr,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(var = name, value = %raw, "Ignoring unparseable value");
            default
        }),
        Err(_) => default,
    }
}
