//! ---
//! seva_section: "01-core-functionality"
//! seva_subsection: "module"
//! seva_type: "source"
//! seva_scope: "code"
//! seva_description: "Shared configuration and tracing setup."
//! seva_version: "v0.0.0-prealpha"
//! seva_owner: "tbd"
//! ---
//! Shared start-up plumbing for Apki Seva binaries: the TOML configuration
//! model and the tracing subscriber.

pub mod config;
pub mod logging;

pub use config::{AccountSeed, AuthConfig, LoadedPortalConfig, LoggingConfig, PortalConfig, ResourceSeed};
pub use logging::{init_tracing, LogFormat};
