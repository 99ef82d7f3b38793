//! Target and stand-in registries
//!
//! Defines the auto-registration infrastructure for buildable targets and
//! stand-in factories. Uses the `linkme` crate for compile-time registration
//! of entries that are discovered and instantiated at runtime.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                     Registration Flow                          │
//! ├────────────────────────────────────────────────────────────────┤
//! │                                                                │
//! │  1. Target defines:    #[linkme::distributed_slice(TARGETS)]   │
//! │                        static ENTRY: TargetEntry = ...         │
//! │                              ↓                                 │
//! │  2. Stand-in defines:  #[linkme::distributed_slice(STAND_INS)] │
//! │                        static ENTRY: StandInEntry = ...        │
//! │                              ↓                                 │
//! │  3. Builder queries:   resolve_target(name).params             │
//! │                              ↓                                 │
//! │  4. Unset slots:       resolve_stand_in(type_name) → slot      │
//! │                                                                │
//! └────────────────────────────────────────────────────────────────┘
//! ```

pub mod stand_in;
pub mod target;

// Re-export all registry types and functions
pub use stand_in::{STAND_INS, StandInEntry, list_stand_ins, resolve_stand_in};
pub use target::{Args, ParamSpec, TARGETS, TargetEntry, list_targets, resolve_target};
