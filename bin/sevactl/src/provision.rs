//! ---
//! seva_section: "05-external-interfaces"
//! seva_subsection: "binary"
//! seva_type: "source"
//! seva_scope: "code"
//! seva_description: "Operator shell for the Apki Seva portal core."
//! seva_version: "v0.0.0-prealpha"
//! seva_owner: "tbd"
//! ---
use anyhow::{Context, Result};
use seva_common::PortalConfig;
use seva_identity::IdentityService;
use seva_portal::Portal;

/// Build the process-wide identity service and portal from configuration.
pub fn build_portal(config: &PortalConfig) -> Result<Portal> {
    let identity = IdentityService::with_policy(config.auth.password_policy);
    for seed in &config.auth.accounts {
        identity
            .seed_account(seed.to_account())
            .with_context(|| format!("unable to provision account {}", seed.email))?;
    }
    let mut portal = Portal::new(identity);
    for seed in &config.resources {
        portal.add_resource(&seed.name, seed.kind, seed.capacity, seed.status);
    }
    Ok(portal)
}
