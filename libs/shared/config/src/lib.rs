use std::env;
use tracing::warn;

pub const DEFAULT_SLOT_DURATION_MINUTES: u32 = 30;
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// Slot length used when a service row carries no usable duration.
    pub default_slot_duration_minutes: u32,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            default_slot_duration_minutes: parse_slot_duration(
                env::var("DEFAULT_SLOT_DURATION_MINUTES").ok().as_deref(),
            ),
            port: env::var("PORT")
                .ok()
                .and_then(|raw| match raw.parse::<u16>() {
                    Ok(port) => Some(port),
                    Err(_) => {
                        warn!("PORT is not a valid port number ({}), using default", raw);
                        None
                    }
                })
                .unwrap_or(DEFAULT_PORT),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty() && !self.supabase_anon_key.is_empty()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            default_slot_duration_minutes: DEFAULT_SLOT_DURATION_MINUTES,
            port: DEFAULT_PORT,
        }
    }
}

fn parse_slot_duration(raw: Option<&str>) -> u32 {
    match raw.map(str::trim) {
        None | Some("") => DEFAULT_SLOT_DURATION_MINUTES,
        Some(value) => match value.parse::<u32>() {
            Ok(minutes) if minutes > 0 => minutes,
            _ => {
                warn!(
                    "DEFAULT_SLOT_DURATION_MINUTES must be a positive integer (got {}), using {}",
                    value, DEFAULT_SLOT_DURATION_MINUTES
                );
                DEFAULT_SLOT_DURATION_MINUTES
            }
        },
    }
}
