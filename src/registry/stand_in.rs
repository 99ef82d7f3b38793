//! Stand-in factory registry
//!
//! Auto-registration of stand-in factories using linkme distributed slices.
//! A factory is keyed by the nominal dependency type name it synthesizes
//! stand-ins for; the default provider consults this registry whenever a
//! context slot is unset.

use crate::dependency::Dependency;

/// Registry entry for a stand-in factory
///
/// Each dependency type that can be auto-stubbed registers one entry using
/// `#[linkme::distributed_slice(STAND_INS)]`. The factory runs once per
/// synthesized stand-in, so distinct build calls get distinct instances.
///
/// # Example
///
/// ```ignore
/// #[linkme::distributed_slice(STAND_INS)]
/// static EMAIL_SERVICE_STAND_IN: StandInEntry = StandInEntry {
///     type_name: "EmailService",
///     description: "Recording stand-in for the e-mail gateway",
///     factory: || {
///         let recorder = Arc::new(RecordingEmailService::default());
///         Ok(Dependency::with_handle(
///             Arc::clone(&recorder) as Arc<dyn EmailService>,
///             recorder,
///         ))
///     },
/// };
/// ```
pub struct StandInEntry {
    /// Nominal dependency type name this factory synthesizes for
    pub type_name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function producing a fresh stand-in
    pub factory: fn() -> Result<Dependency, String>,
}

// Auto-collection via linkme distributed slices - factories submit entries at compile time
#[linkme::distributed_slice]
pub static STAND_INS: [StandInEntry] = [..];

/// Synthesize a stand-in for a dependency type from the registry
///
/// Searches the registry for a factory matching the type name and runs it.
///
/// # Arguments
/// * `type_name` - Nominal dependency type name
///
/// # Returns
/// * `Ok(Dependency)` - Freshly synthesized stand-in
/// * `Err(String)` - No factory registered, or the factory failed
pub fn resolve_stand_in(type_name: &str) -> Result<Dependency, String> {
    for entry in STAND_INS {
        if entry.type_name == type_name {
            return (entry.factory)()
                .map_err(|e| format!("stand-in factory for '{}' failed: {}", type_name, e));
        }
    }

    let available: Vec<&str> = STAND_INS.iter().map(|e| e.type_name).collect();

    Err(format!(
        "Unknown dependency type '{}'. Available stand-ins: {:?}",
        type_name, available
    ))
}

/// List all registered stand-in factories
///
/// # Returns
/// Vector of (type name, description) tuples for all registered factories
pub fn list_stand_ins() -> Vec<(&'static str, &'static str)> {
    STAND_INS.iter().map(|e| (e.type_name, e.description)).collect()
}
