//! Auto-stubbing subject-under-test builder
//!
//! Builds an instance of a registered target type for a test, resolving each
//! constructor dependency from a named slot on the test context when one is
//! populated and synthesizing a stand-in otherwise. Newly synthesized
//! stand-ins are stored back onto the context, so the test and the subject
//! under test share the same instance.
//!
//! ## Architecture
//!
//! ```text
//! Context: target = "UserController", slots = {}
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────┐
//! │     Injector::build(&mut context)   │
//! └─────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────┐
//! │   TARGETS / STAND_INS registries    │  ← linkme distributed slices
//! └─────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────┐
//! │   context.slots = { service: ⬚ }    │  ← stand-ins written back
//! │   Arc<UserController>               │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut context = TestContext::new("UserController");
//! let controller: Arc<UserController> = Injector::new().build_as(&mut context)?;
//!
//! controller.sign_up("email@test.me");
//!
//! let service: Arc<RecordingEmailService> = context.handle("service").unwrap();
//! assert_eq!(service.calls().len(), 1);
//! ```
//!
//! This is deliberately not a dependency-injection container: no caching, no
//! lifecycle management, no cycle detection - flat, single-level constructor
//! injection for test code.

pub mod builder;
pub mod context;
pub mod dependency;
pub mod error;
pub mod logging;
pub mod provider;
pub mod registry;

// Re-export the public surface
pub use builder::{
    AvailableEntries, Binding, Injector, Overrides, ResolvedDependency, available_entries,
    derive_bindings,
};
pub use context::TestContext;
pub use dependency::Dependency;
pub use error::{Error, Result};
pub use provider::{RegistryStandInProvider, StandInProvider};
pub use registry::{Args, ParamSpec, STAND_INS, StandInEntry, TARGETS, TargetEntry};
