//! Stand-in provider seam
//!
//! The builder depends on a single operation for synthesizing stand-ins:
//! [`StandInProvider::create_stand_in`]. The default implementation fronts
//! the [`crate::registry::STAND_INS`] registry; any other mocking mechanism
//! plugs in behind the trait.

use crate::dependency::Dependency;
use crate::error::{Error, Result};
use crate::registry;

/// Synthesizes stand-in objects from a dependency type name
///
/// A stand-in satisfies the dependency's expected capability set but has no
/// real behavior until configured by the test.
pub trait StandInProvider: Send + Sync {
    /// Synthesize a fresh stand-in for the given dependency type
    fn create_stand_in(&self, type_name: &str) -> Result<Dependency>;

    /// Provider name for diagnostics
    fn provider_name(&self) -> &str;
}

/// Registry-backed stand-in provider
///
/// Resolves stand-ins from the factories registered in
/// [`crate::registry::STAND_INS`]. This is the provider an
/// [`crate::builder::Injector`] uses unless another one is supplied.
#[derive(Debug, Default)]
pub struct RegistryStandInProvider;

impl RegistryStandInProvider {
    /// Create a new registry-backed provider
    pub fn new() -> Self {
        Self
    }
}

impl StandInProvider for RegistryStandInProvider {
    fn create_stand_in(&self, type_name: &str) -> Result<Dependency> {
        registry::resolve_stand_in(type_name).map_err(Error::type_resolution)
    }

    fn provider_name(&self) -> &str {
        "registry"
    }
}
