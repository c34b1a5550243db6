use std::fmt;
use std::fs;
use std::path::Path;

use reqwest::header::HeaderValue;

use crate::error::ConfigError;

/// The cookie header of one logged-in account. Opaque; compared by its literal text.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(cookie: impl Into<String>) -> Self {
        Self(cookie.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Cookies are secrets, keep them out of debug output.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({} chars)", self.0.len())
    }
}

/// Reads the accounts file, one cookie per line.
pub fn load_accounts(path: &Path) -> Result<Vec<Credential>, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadAccounts {
        path: path.to_path_buf(),
        source,
    })?;
    parse_accounts(&text, path)
}

/// Trims every line, drops the blank ones and keeps file order. Fails when nothing is left
/// or when a line could never be sent as a header.
pub fn parse_accounts(text: &str, path: &Path) -> Result<Vec<Credential>, ConfigError> {
    let mut accounts = Vec::new();

    for (number, line) in text.lines().enumerate() {
        let cookie = line.trim();
        if cookie.is_empty() {
            continue;
        }
        if HeaderValue::from_str(cookie).is_err() {
            return Err(ConfigError::InvalidCredential {
                path: path.to_path_buf(),
                line: number + 1,
            });
        }
        accounts.push(Credential::new(cookie));
    }

    if accounts.is_empty() {
        return Err(ConfigError::NoAccounts(path.to_path_buf()));
    }

    Ok(accounts)
}
