use std::collections::HashMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::utils::{data_dir_path, get_data_dir, trim_line};

pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

const AUTH_FILE_NAME: &str = "auth.json";
const GEMINI_PROVIDER: &str = "gemini";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    Environment,
    AuthFile,
}

impl ApiKeySource {
    pub fn description(&self) -> &'static str {
        match self {
            ApiKeySource::Environment => "environment variable",
            ApiKeySource::AuthFile => "local auth file",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct AuthFile {
    #[serde(flatten)]
    providers: HashMap<String, ProviderAuth>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProviderAuth {
    key: String,
}

#[derive(Debug, Default)]
pub struct ApiKeyLookup {
    pub api_key: Option<String>,
    pub source: Option<ApiKeySource>,
}

pub fn store_api_key(api_key: &str) -> Result<()> {
    let auth_path = get_data_dir()?.join(AUTH_FILE_NAME);
    store_api_key_at(&auth_path, api_key)
}

pub fn clear_api_key() -> Result<bool> {
    clear_api_key_at(&auth_file_path()?)
}

/// Environment first, then the auth file. The data directory is only
/// looked up when the environment has no key, and is never created here.
pub fn get_api_key_from_sources() -> Result<ApiKeyLookup> {
    lookup_api_key(env::var(API_KEY_ENV).ok(), auth_file_path)
}

fn store_api_key_at(auth_path: &Path, api_key: &str) -> Result<()> {
    let trimmed = trim_line(api_key).with_context(|| "Cannot store an empty API key")?;

    let mut auth = read_auth_file(auth_path)?.unwrap_or_default();
    auth.providers.insert(
        GEMINI_PROVIDER.to_string(),
        ProviderAuth {
            key: trimmed.to_string(),
        },
    );

    write_auth_file(auth_path, &auth)
}

fn clear_api_key_at(auth_path: &Path) -> Result<bool> {
    let Some(mut auth) = read_auth_file(auth_path)? else {
        return Ok(false);
    };

    if auth.providers.remove(GEMINI_PROVIDER).is_none() {
        return Ok(false);
    }

    if auth.providers.is_empty() {
        fs::remove_file(auth_path).with_context(|| {
            format!(
                "Failed to remove empty auth file at {}",
                auth_path.display()
            )
        })?;
        return Ok(true);
    }

    write_auth_file(auth_path, &auth)?;
    Ok(true)
}

fn lookup_api_key<F>(env_value: Option<String>, auth_path: F) -> Result<ApiKeyLookup>
where
    F: FnOnce() -> Result<PathBuf>,
{
    if let Some(value) = env_value.as_deref().and_then(trim_line) {
        debug!("using API key from {}", API_KEY_ENV);
        return Ok(ApiKeyLookup {
            api_key: Some(value.to_string()),
            source: Some(ApiKeySource::Environment),
        });
    }

    let auth_path = match auth_path() {
        Ok(path) => path,
        Err(err) => {
            debug!(error = %err, "no data directory; skipping auth file");
            return Ok(ApiKeyLookup::default());
        }
    };
    let Some(auth) = read_auth_file(&auth_path)? else {
        return Ok(ApiKeyLookup::default());
    };

    let key = auth
        .providers
        .get(GEMINI_PROVIDER)
        .and_then(|entry| trim_line(&entry.key))
        .map(str::to_string);

    match key {
        Some(api_key) => {
            debug!(path = %auth_path.display(), "using API key from auth file");
            Ok(ApiKeyLookup {
                api_key: Some(api_key),
                source: Some(ApiKeySource::AuthFile),
            })
        }
        None => Ok(ApiKeyLookup::default()),
    }
}

fn auth_file_path() -> Result<PathBuf> {
    Ok(data_dir_path()?.join(AUTH_FILE_NAME))
}

fn read_auth_file(path: &Path) -> Result<Option<AuthFile>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(parse_auth_contents(&contents, path)?),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => {
            Err(err).with_context(|| format!("Failed to read auth file at {}", path.display()))
        }
    }
}

fn write_auth_file(path: &Path, value: &AuthFile) -> Result<()> {
    let contents = serialize_auth(value)?;
    fs::write(path, contents)
        .with_context(|| format!("Failed to write auth file at {}", path.display()))?;
    Ok(())
}

fn parse_auth_contents(contents: &str, path: &Path) -> Result<Option<AuthFile>> {
    if contents.trim().is_empty() {
        return Ok(Some(AuthFile::default()));
    }

    let parsed: AuthFile = serde_json::from_str(contents)
        .with_context(|| format!("Failed to parse auth file at {}", path.display()))?;
    Ok(Some(parsed))
}

fn serialize_auth(value: &AuthFile) -> Result<String> {
    let contents = serde_json::to_string_pretty(value)?;
    Ok(format!("{}\n", contents))
}
