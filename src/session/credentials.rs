use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CREDENTIAL_EMAIL_KEY, CREDENTIAL_USERNAME_KEY};

/// Flat `KEY=VALUE` mapping, insertion order preserved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    entries: Vec<(String, String)>,
}

impl Credentials {
    /// Parse newline-separated `KEY=VALUE` pairs; lines without `=` are ignored
    pub fn parse(text: &str) -> Self {
        let mut credentials = Self::default();
        for line in text.lines() {
            if let Some((key, value)) = line.trim_end_matches('\r').split_once('=') {
                credentials.set(key, value);
            }
        }
        credentials
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace an existing key in place or append a new one
    pub fn set(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The git identity, when both keys are present
    pub fn identity(&self) -> Option<Identity> {
        Some(Identity {
            name: self.get(CREDENTIAL_USERNAME_KEY)?.to_string(),
            email: self.get(CREDENTIAL_EMAIL_KEY)?.to_string(),
        })
    }

    pub fn set_identity(&mut self, identity: &Identity) {
        self.set(CREDENTIAL_USERNAME_KEY, &identity.name);
        self.set(CREDENTIAL_EMAIL_KEY, &identity.email);
    }
}

/// Name and email applied to the global git configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

/// The credential file on disk
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file; a missing file is an empty mapping
    pub fn load(&self) -> Result<Credentials> {
        if !self.path.exists() {
            return Ok(Credentials::default());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read credentials from {}", self.path.display()))?;
        Ok(Credentials::parse(&content))
    }

    /// Rewrite the whole file
    pub fn save(&self, credentials: &Credentials) -> Result<()> {
        fs::write(&self.path, credentials.render())
            .with_context(|| format!("Failed to write credentials to {}", self.path.display()))
    }
}
