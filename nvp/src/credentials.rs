//! # API Credentials & Environment Mode
//!
//! Signature-based NVP authentication: an API username, password, and
//! signature string, plus the sandbox/live switch that selects which of
//! the two fixed endpoints a client talks to.
//!
//! Credentials are plain data handed in by the caller. This module never
//! reads the environment — sourcing values from `PAYPAL_USER` and friends
//! is the application's job, which keeps the client testable with
//! made-up credentials and a local endpoint.

use std::fmt;
use std::str::FromStr;

use crate::config;
use crate::error::NvpError;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Which PayPal environment a client targets.
///
/// Parsing is strict: exactly `"sandbox"` or `"live"`. An unrecognized
/// mode is a configuration error, caught before any request goes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The sandbox environment. Test accounts, fake money.
    Sandbox,
    /// The live environment. Real accounts, real money.
    Live,
}

impl Mode {
    /// The NVP API endpoint for this mode.
    pub fn endpoint_url(&self) -> &'static str {
        match self {
            Mode::Sandbox => config::SANDBOX_ENDPOINT,
            Mode::Live => config::LIVE_ENDPOINT,
        }
    }

    /// The web host for browser redirects in this mode.
    pub fn web_host(&self) -> &'static str {
        match self {
            Mode::Sandbox => config::SANDBOX_WEB_HOST,
            Mode::Live => config::LIVE_WEB_HOST,
        }
    }

    /// The canonical string form, as accepted by [`Mode::from_str`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Sandbox => "sandbox",
            Mode::Live => "live",
        }
    }
}

impl FromStr for Mode {
    type Err = NvpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sandbox" => Ok(Mode::Sandbox),
            "live" => Ok(Mode::Live),
            other => Err(NvpError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Immutable NVP API credentials.
///
/// Constructed once per client and discarded with it. The `version`
/// field is the NVP API version string sent with every request.
#[derive(Clone)]
pub struct Credentials {
    /// API username (`USER`).
    pub user: String,
    /// API password (`PWD`).
    pub password: String,
    /// API signature (`SIGNATURE`).
    pub signature: String,
    /// Target environment.
    pub mode: Mode,
    /// NVP API version (`VERSION`).
    pub version: String,
}

impl Credentials {
    /// Creates credentials with the default API version.
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
        signature: impl Into<String>,
        mode: Mode,
    ) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
            signature: signature.into(),
            mode,
            version: config::DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Overrides the NVP API version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

// Manual impl: the password and signature must never end up in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("signature", &"<redacted>")
            .field("mode", &self.mode)
            .field("version", &self.version)
            .finish()
    }
}
