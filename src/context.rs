//! Test context with named dependency slots
//!
//! The [`TestContext`] is the caller-owned object a build runs against. It
//! carries the target type name (the one configuration value of this crate)
//! and one named slot per logical binding name. Slots the test pre-populates
//! are reused as-is; slots left unset receive synthesized stand-ins during
//! resolution so the test can configure and assert on them afterwards.

use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::dependency::Dependency;

/// Caller-owned store of named dependency slots for one target type
///
/// A logical name maps to exactly one slot. Resolution never overwrites a
/// populated slot.
///
/// # Example
///
/// ```ignore
/// let mut context = TestContext::new("UserController");
/// let controller: Arc<UserController> = Injector::new().build_as(&mut context)?;
///
/// let service: Arc<RecordingEmailService> =
///     context.handle("service").expect("stand-in was stored back");
/// ```
#[derive(Clone, Default)]
pub struct TestContext {
    /// Name of the target type to build
    target: String,
    /// Named dependency slots
    slots: BTreeMap<String, Dependency>,
}

impl TestContext {
    /// Create a context for the given target type name
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            slots: BTreeMap::new(),
        }
    }

    /// Name of the target type this context builds
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Store a dependency under a logical name
    ///
    /// Pre-populating a slot before a build makes resolution reuse the
    /// stored value instead of synthesizing a stand-in.
    pub fn set(&mut self, name: impl Into<String>, dependency: Dependency) {
        self.slots.insert(name.into(), dependency);
    }

    /// Look up a slot by logical name
    pub fn get(&self, name: &str) -> Option<&Dependency> {
        self.slots.get(name)
    }

    /// Whether a slot is populated
    pub fn is_set(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Downcast a slot's constructor-facing view
    pub fn view<V: Any + Send + Sync + Clone>(&self, name: &str) -> Option<V> {
        self.slots.get(name).and_then(Dependency::view)
    }

    /// Downcast a slot's concrete handle
    ///
    /// This is how a test reaches the recorded state of an auto-synthesized
    /// stand-in after a build.
    pub fn handle<H: Any + Send + Sync>(&self, name: &str) -> Option<Arc<H>> {
        self.slots.get(name).and_then(Dependency::handle)
    }

    /// Names of the populated slots, in sorted order
    pub fn slot_names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for TestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestContext")
            .field("target", &self.target)
            .field("slots", &self.slots.keys().collect::<Vec<_>>())
            .finish()
    }
}
