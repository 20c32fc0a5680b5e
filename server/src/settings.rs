//! # Application Settings
//!
//! Bridges the CLI/environment layer to the core library: credentials
//! arrive here as plain optionals (clap fills them from `PAYPAL_*`
//! variables), and this module decides whether they are complete enough
//! to build an [`NvpClient`]. The core library itself never reads the
//! environment.

use paylens_nvp::{Credentials, Mode, NvpClient, NvpError};
use thiserror::Error;

use crate::cli::CredentialArgs;

/// Why a client could not be constructed from the current settings.
///
/// Distinct variants so callers can tell "you forgot to configure
/// credentials" apart from "your mode string is wrong."
#[derive(Debug, Error)]
pub enum SettingsError {
    /// One or more of user/password/signature is missing.
    #[error("missing PayPal API credentials: set PAYPAL_USER, PAYPAL_PWD, and PAYPAL_SIGNATURE")]
    MissingCredentials,

    /// The credentials are present but invalid (bad mode).
    #[error(transparent)]
    Nvp(#[from] NvpError),
}

/// Resolved provider settings for one process.
#[derive(Debug, Clone)]
pub struct Settings {
    /// NVP API username, if configured.
    pub user: Option<String>,
    /// NVP API password, if configured.
    pub password: Option<String>,
    /// NVP API signature, if configured.
    pub signature: Option<String>,
    /// Mode string as supplied; validated when a client is built.
    pub mode: String,
    /// NVP API version string.
    pub version: String,
}

impl Settings {
    /// Builds settings from parsed CLI arguments.
    pub fn from_args(args: &CredentialArgs) -> Self {
        Self {
            user: args.user.clone(),
            password: args.password.clone(),
            signature: args.signature.clone(),
            mode: args.mode.clone(),
            version: args.api_version.clone(),
        }
    }

    /// True when all three credential strings are present and non-empty.
    pub fn has_credentials(&self) -> bool {
        [&self.user, &self.password, &self.signature]
            .iter()
            .all(|field| field.as_deref().is_some_and(|v| !v.is_empty()))
    }

    /// The mode parsed into the core library's enum.
    pub fn parsed_mode(&self) -> Result<Mode, NvpError> {
        self.mode.parse()
    }

    /// Constructs an [`NvpClient`] from these settings.
    pub fn client(&self) -> Result<NvpClient, SettingsError> {
        if !self.has_credentials() {
            return Err(SettingsError::MissingCredentials);
        }
        let mode = self.parsed_mode()?;
        let credentials = Credentials::new(
            self.user.clone().unwrap_or_default(),
            self.password.clone().unwrap_or_default(),
            self.signature.clone().unwrap_or_default(),
            mode,
        )
        .with_version(self.version.clone());
        Ok(NvpClient::new(credentials)?)
    }
}
