use std::{env, fmt, fmt::Display, fs::read_to_string, str::FromStr};

use tracing::{info, warn};

/// Server configuration read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub db_pool_size: u32,
    pub admin: Option<AdminAccount>,
}

/// Administrator account created or promoted at startup, from
/// `LARDER_ADMIN_USERNAME`, `LARDER_ADMIN_EMAIL` and `LARDER_ADMIN_PASSWORD`
/// (or `LARDER_ADMIN_PASSWORD_FILE`).
#[derive(Clone, PartialEq, Eq)]
pub struct AdminAccount {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminAccount")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            database_url,
            bind_addr: try_load("LARDER_BIND", "0.0.0.0:3000"),
            db_pool_size: try_load("LARDER_DB_POOL_SIZE", "10"),
            admin: admin_account(|key| env::var(key).ok(), read_secret),
        })
    }
}

/// All three admin settings, or none. A partial set is ignored with a
/// warning so a typo can't silently create a half-configured account.
fn admin_account(
    var: impl Fn(&str) -> Option<String>,
    read_file: impl Fn(&str) -> Option<String>,
) -> Option<AdminAccount> {
    let username = var("LARDER_ADMIN_USERNAME");
    let email = var("LARDER_ADMIN_EMAIL");
    let password = var("LARDER_ADMIN_PASSWORD").or_else(|| {
        var("LARDER_ADMIN_PASSWORD_FILE").and_then(|path| read_file(&path))
    });

    match (username, email, password) {
        (Some(username), Some(email), Some(password)) => Some(AdminAccount {
            username,
            email,
            password,
        }),
        (None, None, None) => None,
        _ => {
            warn!(
                "LARDER_ADMIN_USERNAME, LARDER_ADMIN_EMAIL and LARDER_ADMIN_PASSWORD must all be set, \
                 skipping administrator setup"
            );
            None
        }
    }
}

fn read_secret(path: &str) -> Option<String> {
    read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            warn!("Failed to read secret from {path}: {e}");
        })
        .ok()
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        parse_default(default)
    })
}

fn parse_default<T: FromStr>(default: &str) -> T
where
    T::Err: Display,
{
    match default.parse() {
        Ok(value) => value,
        Err(e) => unreachable!("built-in default {default:?} does not parse: {e}"),
    }
}
