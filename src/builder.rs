//! Resolver-and-builder
//!
//! Builds a subject-under-test instance in a single linear pass:
//!
//! ```text
//! Context: target = "UserController"
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────┐
//! │   derive_bindings(target)           │  ← TARGETS registry, declared order
//! └─────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────┐
//! │   resolve_dependencies(ctx, ..)     │  ← slot if set, stand-in otherwise
//! └─────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────┐
//! │   merge overrides (name wins)       │
//! └─────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────┐
//! │   construct(args in binding order)  │
//! └─────────────────────────────────────┘
//! ```
//!
//! Each build call is independent: bindings are derived per call, stand-ins
//! are synthesized at most once per unset slot, and a context whose slots
//! are all populated resolves as a pure passthrough.

use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::context::TestContext;
use crate::dependency::Dependency;
use crate::error::{Error, Result};
use crate::provider::{RegistryStandInProvider, StandInProvider};
use crate::registry::{self, Args, TargetEntry};

/// A (dependency type, logical name) pair derived from one constructor
/// parameter
///
/// Binding order equals constructor declaration order, always; it determines
/// positional argument order at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Nominal dependency type name
    pub type_name: &'static str,
    /// Logical name, also the context slot the instance lives under
    pub name: &'static str,
}

/// One resolved dependency: the binding plus the instance satisfying it
#[derive(Debug, Clone)]
pub struct ResolvedDependency {
    /// The binding this instance satisfies
    pub binding: Binding,
    /// The resolved instance, real or stand-in
    pub instance: Dependency,
}

/// Derive the ordered binding list for a target type
///
/// Reads the registered constructor parameter specs in declared order. A
/// target with no parameters yields an empty list; that is not an error.
///
/// # Arguments
/// * `target` - Target type name as registered
///
/// # Returns
/// * `Ok(Vec<Binding>)` - Bindings in constructor declaration order
/// * `Err(Error::TypeResolution)` - Unknown target, or a parameter without
///   a nominal dependency type
pub fn derive_bindings(target: &str) -> Result<Vec<Binding>> {
    let entry = registry::resolve_target(target).map_err(Error::type_resolution)?;
    bindings_of(entry)
}

fn bindings_of(entry: &'static TargetEntry) -> Result<Vec<Binding>> {
    entry
        .params
        .iter()
        .map(|param| {
            // An unnamed dependency type cannot be satisfied by stand-in
            // synthesis; skipping it would desynchronize positional order.
            if param.type_name.is_empty() {
                return Err(Error::type_resolution(format!(
                    "parameter '{}' of '{}' has no nominal dependency type",
                    param.name, entry.name
                )));
            }
            Ok(Binding {
                type_name: param.type_name,
                name: param.name,
            })
        })
        .collect()
}

/// Caller-supplied values taking precedence over resolved dependencies
///
/// Keyed by logical binding name; an override wins over the resolved value
/// for that binding. Names matching no binding are accepted and left out of
/// the positional argument list, so construction still receives exactly the
/// constructor's arity. Overrides bypass the context slots entirely.
#[derive(Clone, Default)]
pub struct Overrides {
    entries: BTreeMap<String, Dependency>,
}

impl Overrides {
    /// Create an empty override set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an override wrapping a plain value
    pub fn with<V: Any + Send + Sync>(self, name: impl Into<String>, view: V) -> Self {
        self.with_dependency(name, Dependency::new(view))
    }

    /// Add an override from an already-built dependency value
    pub fn with_dependency(mut self, name: impl Into<String>, dependency: Dependency) -> Self {
        self.entries.insert(name.into(), dependency);
        self
    }

    /// Look up an override by name
    pub fn get(&self, name: &str) -> Option<&Dependency> {
        self.entries.get(name)
    }

    /// Whether any overrides are present
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &Dependency)> {
        self.entries.iter().map(|(name, dep)| (name.as_str(), dep))
    }
}

impl std::fmt::Debug for Overrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Overrides")
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// The resolver-and-builder
///
/// Owns the stand-in provider seam. [`Injector::new`] uses the
/// registry-backed provider; [`Injector::with_provider`] substitutes any
/// other [`StandInProvider`] implementation.
///
/// # Example
///
/// ```ignore
/// let mut context = TestContext::new("UserController");
/// let controller: Arc<UserController> = Injector::new().build_as(&mut context)?;
/// ```
pub struct Injector {
    provider: Arc<dyn StandInProvider>,
}

impl Default for Injector {
    fn default() -> Self {
        Self::new()
    }
}

impl Injector {
    /// Create an injector backed by the stand-in factory registry
    pub fn new() -> Self {
        Self::with_provider(Arc::new(RegistryStandInProvider::new()))
    }

    /// Create an injector with a custom stand-in provider
    pub fn with_provider(provider: Arc<dyn StandInProvider>) -> Self {
        Self { provider }
    }

    /// Resolve every binding from the context, synthesizing missing stand-ins
    ///
    /// For each binding in declared order: a populated slot is reused
    /// unchanged; an unset slot receives a freshly synthesized stand-in,
    /// which is stored back into the context before use so the test and the
    /// constructed target share the same instance.
    ///
    /// # Returns
    /// * `Ok(Vec<ResolvedDependency>)` - One instance per binding, in order
    /// * `Err(Error::TypeResolution)` - The provider cannot synthesize a
    ///   required dependency type
    pub fn resolve_dependencies(
        &self,
        context: &mut TestContext,
        bindings: &[Binding],
    ) -> Result<Vec<ResolvedDependency>> {
        let mut resolved = Vec::with_capacity(bindings.len());

        for binding in bindings {
            let instance = match context.get(binding.name) {
                Some(existing) => {
                    trace!(slot = binding.name, "reusing populated slot");
                    existing.clone()
                }
                None => {
                    debug!(
                        slot = binding.name,
                        dependency = binding.type_name,
                        provider = self.provider.provider_name(),
                        "synthesizing stand-in"
                    );
                    let stand_in = self.provider.create_stand_in(binding.type_name)?;
                    context.set(binding.name, stand_in.clone());
                    stand_in
                }
            };

            resolved.push(ResolvedDependency {
                binding: binding.clone(),
                instance,
            });
        }

        Ok(resolved)
    }

    /// Build the context's target type with no overrides
    pub fn build(&self, context: &mut TestContext) -> Result<Arc<dyn Any + Send + Sync>> {
        self.build_with(context, &Overrides::default())
    }

    /// Build the context's target type, overriding resolved values by name
    ///
    /// Derives bindings, resolves dependencies, merges overrides (override
    /// wins on name collision), and invokes the registered construct
    /// function with the values strictly in binding order.
    ///
    /// # Returns
    /// * `Ok(instance)` - The constructed target, type-erased
    /// * `Err(Error::Construction)` - Arity mismatch, argument downcast
    ///   failure, or a failing construct function
    pub fn build_with(
        &self,
        context: &mut TestContext,
        overrides: &Overrides,
    ) -> Result<Arc<dyn Any + Send + Sync>> {
        let entry = registry::resolve_target(context.target()).map_err(Error::type_resolution)?;
        let bindings = bindings_of(entry)?;
        debug!(
            target_type = entry.name,
            bindings = bindings.len(),
            "derived bindings"
        );

        let resolved = self.resolve_dependencies(context, &bindings)?;
        let mut values: Vec<Dependency> = resolved.into_iter().map(|r| r.instance).collect();

        for (name, dependency) in overrides.iter() {
            match bindings.iter().position(|b| b.name == name) {
                Some(position) => {
                    trace!(slot = name, "override replaces resolved value");
                    values[position] = dependency.clone();
                }
                None => {
                    debug!(name = %name, "override matches no constructor binding");
                }
            }
        }

        if values.len() != entry.params.len() {
            return Err(Error::construction(format!(
                "'{}' expects {} constructor arguments, resolved {}",
                entry.name,
                entry.params.len(),
                values.len()
            )));
        }

        let mut args = Args::new(entry, &values);
        let instance = (entry.construct)(&mut args)
            .map_err(|e| Error::construction(format!("failed to construct '{}': {}", entry.name, e)))?;

        if args.consumed() != entry.params.len() {
            return Err(Error::construction(format!(
                "'{}' consumed {} of {} constructor arguments",
                entry.name,
                args.consumed(),
                entry.params.len()
            )));
        }

        debug!(target_type = entry.name, "built target instance");
        Ok(instance)
    }

    /// Build and downcast to the concrete target type
    pub fn build_as<T: Any + Send + Sync>(&self, context: &mut TestContext) -> Result<Arc<T>> {
        self.build_with_as(context, &Overrides::default())
    }

    /// Build with overrides and downcast to the concrete target type
    pub fn build_with_as<T: Any + Send + Sync>(
        &self,
        context: &mut TestContext,
        overrides: &Overrides,
    ) -> Result<Arc<T>> {
        let target = context.target().to_string();
        self.build_with(context, overrides)?
            .downcast::<T>()
            .map_err(|_| {
                Error::construction(format!(
                    "built instance of '{}' is not a {}",
                    target,
                    std::any::type_name::<T>()
                ))
            })
    }
}

impl std::fmt::Debug for Injector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Injector")
            .field("provider", &self.provider.provider_name())
            .finish()
    }
}

/// List all registered targets and stand-in factories
///
/// Useful for diagnosing an unknown-name failure in a test run.
///
/// # Returns
/// Struct containing the entries of both registries
pub fn available_entries() -> AvailableEntries {
    AvailableEntries {
        targets: registry::list_targets(),
        stand_ins: registry::list_stand_ins(),
    }
}

/// Registered entries by registry
#[derive(Debug, Clone)]
pub struct AvailableEntries {
    /// Registered target types (name, description)
    pub targets: Vec<(&'static str, &'static str)>,
    /// Registered stand-in factories (type name, description)
    pub stand_ins: Vec<(&'static str, &'static str)>,
}

impl std::fmt::Display for AvailableEntries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Registered Entries:")?;
        writeln!(f)?;

        writeln!(f, "Targets:")?;
        for (name, desc) in &self.targets {
            writeln!(f, "  - {}: {}", name, desc)?;
        }
        writeln!(f)?;

        writeln!(f, "Stand-ins:")?;
        for (name, desc) in &self.stand_ins {
            writeln!(f, "  - {}: {}", name, desc)?;
        }

        Ok(())
    }
}
