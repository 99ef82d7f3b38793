//! Target type registry
//!
//! Auto-registration of buildable target types using linkme distributed
//! slices. A target registers its name, the ordered constructor parameter
//! specs, and a construct function that consumes the ordered argument list.
//! Rust has no runtime reflection, so this registry is the constructor
//! metadata API: parameter order in `params` *is* declaration order.

use std::any::Any;
use std::sync::Arc;

use crate::dependency::Dependency;

/// One constructor parameter: nominal dependency type plus declared name
///
/// The logical `name` doubles as the context slot the resolved instance is
/// stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    /// Nominal dependency type name (e.g. "EmailService")
    pub type_name: &'static str,
    /// Declared parameter name (e.g. "service")
    pub name: &'static str,
}

/// Registry entry for a buildable target type
///
/// Each target type registers itself with this entry using
/// `#[linkme::distributed_slice(TARGETS)]`. The entry carries the
/// constructor metadata and a construct function.
///
/// # Example
///
/// ```ignore
/// #[linkme::distributed_slice(TARGETS)]
/// static USER_CONTROLLER: TargetEntry = TargetEntry {
///     name: "UserController",
///     description: "Sign-up controller over the e-mail gateway",
///     params: &[ParamSpec { type_name: "EmailService", name: "service" }],
///     construct: |args| {
///         let service: Arc<dyn EmailService> = args.take()?;
///         Ok(Arc::new(UserController::new(service)))
///     },
/// };
/// ```
#[derive(Debug)]
pub struct TargetEntry {
    /// Unique target type name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Constructor parameters, in declaration order
    pub params: &'static [ParamSpec],
    /// Construct function: consumes the ordered argument list
    pub construct: fn(&mut Args<'_>) -> Result<Arc<dyn Any + Send + Sync>, String>,
}

// Auto-collection via linkme distributed slices - targets submit entries at compile time
#[linkme::distributed_slice]
pub static TARGETS: [TargetEntry] = [..];

/// Resolve a target entry by name from the registry
///
/// # Arguments
/// * `name` - Target type name as registered
///
/// # Returns
/// * `Ok(&TargetEntry)` - The registered entry
/// * `Err(String)` - Error message listing the known targets
pub fn resolve_target(name: &str) -> Result<&'static TargetEntry, String> {
    for entry in TARGETS {
        if entry.name == name {
            return Ok(entry);
        }
    }

    let available: Vec<&str> = TARGETS.iter().map(|e| e.name).collect();

    Err(format!(
        "Unknown target type '{}'. Available targets: {:?}",
        name, available
    ))
}

/// List all registered target types
///
/// # Returns
/// Vector of (name, description) tuples for all registered targets
pub fn list_targets() -> Vec<(&'static str, &'static str)> {
    TARGETS.iter().map(|e| (e.name, e.description)).collect()
}

/// Ordered argument list handed to a construct function
///
/// Positional cursor over the resolved dependency values. [`Args::take`]
/// yields the next argument downcast to the requested type; taking past the
/// declared arity or requesting the wrong type fails, and the builder treats
/// either as a construction error.
pub struct Args<'a> {
    target: &'static str,
    params: &'static [ParamSpec],
    values: &'a [Dependency],
    next: usize,
}

impl<'a> Args<'a> {
    pub(crate) fn new(entry: &'static TargetEntry, values: &'a [Dependency]) -> Self {
        Self {
            target: entry.name,
            params: entry.params,
            values,
            next: 0,
        }
    }

    /// Take the next positional argument, downcast to `V`
    ///
    /// `V` is the constructor-facing view type, conventionally an
    /// `Arc<dyn Trait>`.
    pub fn take<V: Any + Send + Sync + Clone>(&mut self) -> Result<V, String> {
        let index = self.next;
        let Some(value) = self.values.get(index) else {
            return Err(format!(
                "'{}' received {} constructor arguments but asked for more",
                self.target,
                self.values.len()
            ));
        };
        self.next += 1;

        value.view::<V>().ok_or_else(|| {
            let param = self
                .params
                .get(index)
                .map(|p| p.name)
                .unwrap_or("<unknown>");
            format!(
                "argument '{}' of '{}' is not a {}",
                param,
                self.target,
                std::any::type_name::<V>()
            )
        })
    }

    /// Number of arguments consumed so far
    pub(crate) fn consumed(&self) -> usize {
        self.next
    }
}
