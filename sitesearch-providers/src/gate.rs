//! Capability gate: decides whether a provider takes part in a search.
//!
//! A provider participates only when its content module is installed and
//! its enabled option is not explicitly false. Both failing conditions are
//! a normal skip, never an error.

use crate::config::Settings;
use crate::error::Result;
use crate::registry::ModuleRegistry;
use crate::types::{Availability, UnavailableReason};

/// Check module presence, then the enabled flag (default `true`).
///
/// The registry is consulted exactly once. The enabled option is only
/// read when the module is installed.
///
/// # Errors
///
/// Returns [`crate::ProviderError::Config`] if the enabled option holds a
/// non-boolean value.
pub fn check(
    registry: &dyn ModuleRegistry,
    settings: &dyn Settings,
    module_id: &str,
    enabled_option: &str,
) -> Result<Availability> {
    if !registry.has_module(module_id) {
        tracing::debug!(module = module_id, "module not installed, skipping provider");
        return Ok(Availability::Unavailable(UnavailableReason::ModuleMissing));
    }

    if !settings.get_bool(enabled_option, true)? {
        tracing::debug!(module = module_id, option = enabled_option, "provider disabled");
        return Ok(Availability::Unavailable(UnavailableReason::Disabled));
    }

    Ok(Availability::Available)
}
