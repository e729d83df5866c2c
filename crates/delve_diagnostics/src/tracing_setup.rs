//! Tracing subscriber setup.
//!
//! Provides [`TracingSetup`] which configures and installs the global
//! `tracing` subscriber. Installation is process-wide and happens once;
//! later attempts either report [`TracingError::AlreadyInitialized`]
//! ([`TracingSetup::try_init`]) or are ignored ([`TracingSetup::init`]).
//!
//! # Example
//!
//! ```no_run
//! use delve_diagnostics::{TracingFormat, TracingSetup};
//! use tracing::Level;
//!
//! // Development: pretty output with solver passes and span events.
//! TracingSetup::new()
//!     .with_level(Level::DEBUG)
//!     .with_format(TracingFormat::Pretty)
//!     .with_span_events(true)
//!     .init();
//! ```

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// ─────────────────────────────────────────────────────────────────────────────
// TracingFormat
// ─────────────────────────────────────────────────────────────────────────────

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TracingFormat {
    /// Human-readable colored output (default).
    #[default]
    Pretty,
    /// Compact single-line output.
    Compact,
    /// JSON structured output for log aggregation.
    Json,
}

// ─────────────────────────────────────────────────────────────────────────────
// TracingConfig
// ─────────────────────────────────────────────────────────────────────────────

/// The settings a subscriber was installed with.
///
/// Returned by [`TracingSetup::try_init`] so callers can adapt their own
/// logging to the configured level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracingConfig {
    /// The configured log level.
    pub level: Level,
    /// The configured output format.
    pub format: TracingFormat,
}

/// Errors raised while installing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    /// The filter directive string could not be parsed.
    #[error("invalid tracing filter {filter:?}: {source}")]
    InvalidFilter {
        /// The rejected directive string.
        filter: String,
        /// Parser error.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    /// A global subscriber is already installed.
    #[error("tracing subscriber already initialized")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

// ─────────────────────────────────────────────────────────────────────────────
// TracingSetup
// ─────────────────────────────────────────────────────────────────────────────

/// Builder for the global tracing subscriber.
///
/// Uses the [`tracing`] and [`tracing_subscriber`] crates under the hood.
///
/// # Environment Filter
///
/// Use `with_env_filter` to set target-specific log levels, e.g. to see every
/// solver pass without graph construction noise:
///
/// ```
/// use delve_diagnostics::TracingSetup;
///
/// TracingSetup::default()
///     .with_env_filter("delve_graph::solver=debug,delve_graph::graph=warn")
/// # ;
/// ```
#[derive(Debug, Clone)]
pub struct TracingSetup {
    /// Maximum log level.
    level: Level,
    /// Output format.
    format: TracingFormat,
    /// Environment filter (e.g., "`delve_graph=debug`").
    env_filter: Option<String>,
    /// Whether to include span events (enter/exit).
    span_events: bool,
}

impl Default for TracingSetup {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: TracingFormat::Pretty,
            env_filter: None,
            span_events: false,
        }
    }
}

impl TracingSetup {
    /// Creates a new `TracingSetup` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum log level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets a custom environment filter string.
    ///
    /// Format: `target=level,target=level,...`. Overrides the plain level.
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Enables span enter/exit events in output.
    #[must_use]
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    /// Returns the settings this setup will install.
    #[must_use]
    pub fn config(&self) -> TracingConfig {
        TracingConfig {
            level: self.level,
            format: self.format,
        }
    }

    /// Builds the filter from the directive string, or from the level.
    fn filter(&self) -> Result<EnvFilter, TracingError> {
        match &self.env_filter {
            Some(filter) => EnvFilter::try_new(filter).map_err(|source| TracingError::InvalidFilter {
                filter: filter.clone(),
                source,
            }),
            None => Ok(EnvFilter::new(self.level.as_str())),
        }
    }

    /// Installs the subscriber.
    ///
    /// # Errors
    ///
    /// - [`TracingError::InvalidFilter`] if the filter string does not parse
    /// - [`TracingError::AlreadyInitialized`] if a global subscriber exists
    pub fn try_init(&self) -> Result<TracingConfig, TracingError> {
        let env_filter = self.filter()?;

        let span_events = if self.span_events {
            FmtSpan::ENTER | FmtSpan::EXIT
        } else {
            FmtSpan::NONE
        };

        let registry = tracing_subscriber::registry().with(env_filter);
        match self.format {
            TracingFormat::Pretty => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_span_events(span_events),
                )
                .try_init()?,
            TracingFormat::Compact => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_span_events(span_events),
                )
                .try_init()?,
            TracingFormat::Json => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_span_events(span_events),
                )
                .try_init()?,
        }

        tracing::info!(
            level = %self.level,
            format = ?self.format,
            "tracing initialized"
        );
        Ok(self.config())
    }

    /// Installs the subscriber, falling back to the plain level when the
    /// filter string is invalid and doing nothing if one is already set.
    pub fn init(&self) {
        let result = match self.try_init() {
            Err(TracingError::InvalidFilter { filter, .. }) => {
                let fallback = Self {
                    env_filter: None,
                    ..self.clone()
                };
                let result = fallback.try_init();
                tracing::warn!(%filter, "invalid tracing filter, using level");
                result
            }
            other => other,
        };
        if let Err(error) = result {
            tracing::debug!(%error, "tracing setup skipped");
        }
    }
}
