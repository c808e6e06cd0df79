//! Wallet connector deciding which address the storefront mints to.
//!
//! The storefront signs through the gateway's backend wallet, so "connecting"
//! means activating the configured address for this server session.

use std::sync::Mutex;

use tracing::info;

use crate::error::ErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("no wallet address configured")]
    NotConfigured,
}

impl ErrorCode for WalletError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotConfigured => "E_WALLET_NOT_CONFIGURED",
        }
    }
}

/// Connect/disconnect seam. Enables mocking in tests.
#[async_trait::async_trait]
pub trait WalletConnector: Send + Sync {
    /// Connect and return the now-active address.
    async fn connect(&self) -> Result<String, WalletError>;

    async fn disconnect(&self);

    fn current_address(&self) -> Option<String>;
}

/// Backend wallet with an optional configured address.
pub struct BackendWallet {
    configured: Option<String>,
    current: Mutex<Option<String>>,
}

impl BackendWallet {
    #[must_use]
    pub fn new(configured: Option<String>) -> Self {
        Self { configured, current: Mutex::new(None) }
    }

    fn set_current(&self, address: Option<String>) {
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *current = address;
    }
}

#[async_trait::async_trait]
impl WalletConnector for BackendWallet {
    async fn connect(&self) -> Result<String, WalletError> {
        let address = self.configured.clone().ok_or(WalletError::NotConfigured)?;
        self.set_current(Some(address.clone()));
        info!(address = %short_address(&address), "wallet: connected");
        Ok(address)
    }

    async fn disconnect(&self) {
        self.set_current(None);
        info!("wallet: disconnected");
    }

    fn current_address(&self) -> Option<String> {
        self.current
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

/// `0xABCDEF...56789` style abbreviation: first and last five characters.
#[must_use]
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_owned();
    }
    let head: String = chars[..5].iter().collect();
    let tail: String = chars[chars.len() - 5..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
#[path = "wallet_test.rs"]
mod tests;
