use std::env;

const DEFAULT_JWT_SECRET: &str = "development-secret-change-me";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_port: u16,
    /// Development mode. Gates direct media serving and permissive CORS.
    pub debug: bool,
    pub frontend_url: Option<String>,
    pub jwt_secret: String,
    pub access_token_secs: i64,
    pub refresh_token_secs: i64,
    pub admin_username: String,
    pub admin_password_hash: Option<String>,
    pub media_url: String,
    pub media_root: String,
    pub index_file: String,
    pub site_name: String,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8000);
        let is_production = matches!(
            env::var("RUST_ENV").ok().as_deref(),
            Some("production") | Some("prod")
        );
        let frontend_url = env::var("FRONTEND_URL").ok();
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.into());
        let access_token_secs = env::var("ACCESS_TOKEN_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(60 * 60);
        let refresh_token_secs = env::var("REFRESH_TOKEN_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(7 * 24 * 60 * 60);
        let admin_username = env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into());
        let admin_password_hash = env::var("ADMIN_PASSWORD_HASH").ok().and_then(|v| {
            let trimmed = v.trim().to_string();
            if trimmed.is_empty() { None } else { Some(trimmed) }
        });
        let media_url =
            normalize_media_url(&env::var("MEDIA_URL").unwrap_or_else(|_| "/media".into()))?;
        let media_root = env::var("MEDIA_ROOT").unwrap_or_else(|_| "./media".into());
        let index_file = env::var("INDEX_FILE").unwrap_or_else(|_| "./dist/index.html".into());
        let site_name = env::var("SITE_NAME").unwrap_or_else(|_| "personalsite".into());
        let owner_name = env::var("OWNER_NAME").ok();
        let owner_email = env::var("OWNER_EMAIL").ok();

        let cfg = Self {
            api_port,
            debug: !is_production,
            frontend_url,
            jwt_secret,
            access_token_secs,
            refresh_token_secs,
            admin_username,
            admin_password_hash,
            media_url,
            media_root,
            index_file,
            site_name,
            owner_name,
            owner_email,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    // Production hardening: misconfiguration must fail before the server binds.
    fn validate(&self) -> anyhow::Result<()> {
        if self.debug {
            return Ok(());
        }
        if !self
            .frontend_url
            .as_deref()
            .map(|u| u.starts_with("http"))
            .unwrap_or(false)
        {
            anyhow::bail!(
                "FRONTEND_URL must be set to a full origin in production (e.g., https://example.com)"
            );
        }
        if self.jwt_secret == DEFAULT_JWT_SECRET || self.jwt_secret.len() < 16 {
            anyhow::bail!("JWT_SECRET must be set to a strong secret in production");
        }
        if self.admin_password_hash.is_none() {
            anyhow::bail!("ADMIN_PASSWORD_HASH must be set in production");
        }
        Ok(())
    }
}

/// Normalize the media prefix to `/segment` form: leading slash, no trailing
/// slash. The root path is rejected so the media mount can never shadow the
/// SPA shell.
fn normalize_media_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let prefixed = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };
    if prefixed.len() < 2 {
        anyhow::bail!("MEDIA_URL must name a non-root path prefix");
    }
    Ok(prefixed)
}
