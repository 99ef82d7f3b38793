//! Tests for the resolver-and-builder
//!
//! Covers binding derivation, slot-or-synthesize resolution, override
//! merging, and construction failures. The stand-in provider seam is mocked
//! with `mockall` to verify exactly when the provider is consulted.

use std::sync::Arc;

use injected::{
    Dependency, Error, Injector, Overrides, StandInProvider, TestContext, derive_bindings,
};
use mockall::mock;
use mockall::predicate::eq;

use crate::fixtures::{AuditLog, Clock, FixedClock, Heartbeat, MemoryAuditLog, Scheduler};

mock! {
    pub Provider {}

    impl StandInProvider for Provider {
        fn create_stand_in(&self, type_name: &str) -> injected::Result<Dependency>;
        fn provider_name(&self) -> &str;
    }
}

fn clock_dependency(at: u64) -> Dependency {
    let clock = Arc::new(FixedClock { at });
    Dependency::with_handle(Arc::clone(&clock) as Arc<dyn Clock>, clock)
}

fn audit_dependency() -> Dependency {
    let log = Arc::new(MemoryAuditLog::default());
    Dependency::with_handle(Arc::clone(&log) as Arc<dyn AuditLog>, log)
}

// ============================================================================
// Binding derivation
// ============================================================================

#[test]
fn test_derive_bindings_preserves_declaration_order() {
    let bindings = derive_bindings("fixtures.Scheduler").expect("target is registered");

    assert_eq!(bindings.len(), 2);
    assert_eq!(bindings[0].type_name, "fixtures.Clock");
    assert_eq!(bindings[0].name, "clock");
    assert_eq!(bindings[1].type_name, "fixtures.AuditLog");
    assert_eq!(bindings[1].name, "audit");
}

#[test]
fn test_derive_bindings_parameterless_target_is_empty() {
    let bindings = derive_bindings("fixtures.Heartbeat").expect("target is registered");
    assert!(bindings.is_empty());
}

#[test]
fn test_derive_bindings_fails_loudly_on_missing_nominal_type() {
    let result = derive_bindings("fixtures.Misdeclared");

    match result {
        Err(Error::TypeResolution { message }) => {
            assert!(
                message.contains("'retries'"),
                "Error should name the parameter: {}",
                message
            );
        }
        other => panic!("Expected TypeResolution error, got {:?}", other),
    }
}

// ============================================================================
// Resolution - slot reuse vs stand-in synthesis
// ============================================================================

#[test]
fn test_build_synthesizes_and_writes_back_stand_ins() {
    let mut context = TestContext::new("fixtures.Scheduler");
    let injector = Injector::new();

    let scheduler: Arc<Scheduler> = injector.build_as(&mut context).expect("build should succeed");

    assert!(context.is_set("clock"));
    assert!(context.is_set("audit"));

    // The constructed target and the context share the same instances.
    scheduler.tick();
    let audit: Arc<MemoryAuditLog> = context.handle("audit").expect("stand-in stored back");
    assert_eq!(audit.lines(), vec!["tick at 0".to_string()]);
}

#[test]
fn test_pre_populated_slots_bypass_the_provider() {
    let mut provider = MockProvider::new();
    provider.expect_provider_name().return_const("mock".to_owned());
    // No create_stand_in expectation: any call would panic.

    let injector = Injector::with_provider(Arc::new(provider));

    let clock = Arc::new(FixedClock { at: 42 });
    let audit = Arc::new(MemoryAuditLog::default());
    let mut context = TestContext::new("fixtures.Scheduler");
    context.set(
        "clock",
        Dependency::with_handle(Arc::clone(&clock) as Arc<dyn Clock>, Arc::clone(&clock)),
    );
    context.set(
        "audit",
        Dependency::with_handle(Arc::clone(&audit) as Arc<dyn AuditLog>, Arc::clone(&audit)),
    );

    let bindings = derive_bindings("fixtures.Scheduler").unwrap();
    let resolved = injector
        .resolve_dependencies(&mut context, &bindings)
        .expect("resolution should succeed without the provider");

    let resolved_clock: Arc<FixedClock> = resolved[0].instance.handle().unwrap();
    assert!(Arc::ptr_eq(&resolved_clock, &clock));
    let resolved_audit: Arc<MemoryAuditLog> = resolved[1].instance.handle().unwrap();
    assert!(Arc::ptr_eq(&resolved_audit, &audit));
}

#[test]
fn test_provider_is_asked_once_per_unset_binding_only() {
    let mut provider = MockProvider::new();
    provider.expect_provider_name().return_const("mock".to_owned());
    provider
        .expect_create_stand_in()
        .with(eq("fixtures.AuditLog"))
        .times(1)
        .returning(|_| Ok(audit_dependency()));

    let injector = Injector::with_provider(Arc::new(provider));

    let mut context = TestContext::new("fixtures.Scheduler");
    context.set("clock", clock_dependency(7));

    let scheduler: Arc<Scheduler> = injector.build_as(&mut context).expect("build should succeed");
    assert_eq!(scheduler.clock.now(), 7);
    assert!(context.is_set("audit"), "new stand-in written back");
}

#[test]
fn test_resolution_is_idempotent_on_a_populated_context() {
    let mut provider = MockProvider::new();
    provider.expect_provider_name().return_const("mock".to_owned());
    provider
        .expect_create_stand_in()
        .with(eq("fixtures.Clock"))
        .times(1)
        .returning(|_| Ok(clock_dependency(0)));
    provider
        .expect_create_stand_in()
        .with(eq("fixtures.AuditLog"))
        .times(1)
        .returning(|_| Ok(audit_dependency()));

    let injector = Injector::with_provider(Arc::new(provider));
    let mut context = TestContext::new("fixtures.Scheduler");
    let bindings = derive_bindings("fixtures.Scheduler").unwrap();

    let first = injector
        .resolve_dependencies(&mut context, &bindings)
        .expect("first resolution synthesizes");
    // Every slot is now populated: a second pass is a pure passthrough.
    let second = injector
        .resolve_dependencies(&mut context, &bindings)
        .expect("second resolution reuses slots");

    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.binding, b.binding);
    }
    let first_clock: Arc<FixedClock> = first[0].instance.handle().unwrap();
    let second_clock: Arc<FixedClock> = second[0].instance.handle().unwrap();
    assert!(Arc::ptr_eq(&first_clock, &second_clock));
    // MockProvider verifies the times(1) bounds on drop.
}

#[test]
fn test_unknown_target_fails_build() {
    let injector = Injector::new();
    let mut context = TestContext::new("unit.Orphan");

    let result = injector.build(&mut context);

    match result {
        Err(Error::TypeResolution { message }) => {
            assert!(
                message.contains("Unknown target type"),
                "got: {}",
                message
            );
        }
        other => panic!("Expected TypeResolution error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_unregistered_dependency_type_fails_resolution() {
    let injector = Injector::new();
    let mut context = TestContext::new("fixtures.Unstubbed");

    let result = injector.build(&mut context);

    match result {
        Err(Error::TypeResolution { message }) => {
            assert!(
                message.contains("Unknown dependency type"),
                "got: {}",
                message
            );
        }
        other => panic!("Expected TypeResolution error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_two_fresh_contexts_get_distinct_stand_ins() {
    let injector = Injector::new();

    let mut first_context = TestContext::new("fixtures.Scheduler");
    let mut second_context = TestContext::new("fixtures.Scheduler");
    let _: Arc<Scheduler> = injector.build_as(&mut first_context).unwrap();
    let _: Arc<Scheduler> = injector.build_as(&mut second_context).unwrap();

    let first_audit: Arc<MemoryAuditLog> = first_context.handle("audit").unwrap();
    let second_audit: Arc<MemoryAuditLog> = second_context.handle("audit").unwrap();
    assert!(
        !Arc::ptr_eq(&first_audit, &second_audit),
        "stand-ins must not be shared across builds"
    );
}

// ============================================================================
// Override merging
// ============================================================================

#[test]
fn test_override_wins_and_bypasses_the_slot() {
    let injector = Injector::new();
    let mut context = TestContext::new("fixtures.Scheduler");

    let overrides = Overrides::new().with_dependency("clock", clock_dependency(99));
    let scheduler: Arc<Scheduler> = injector
        .build_with_as(&mut context, &overrides)
        .expect("build should succeed");

    assert_eq!(scheduler.clock.now(), 99, "override value constructs the target");

    // The slot still holds the synthesized stand-in, not the override.
    let slot_clock: Arc<FixedClock> = context.handle("clock").unwrap();
    assert_eq!(slot_clock.at, 0);
}

#[test]
fn test_unmatched_override_does_not_break_construction() {
    let injector = Injector::new();
    let mut context = TestContext::new("fixtures.Scheduler");

    let overrides = Overrides::new().with("extra", 5_i32);
    let scheduler: Arc<Scheduler> = injector
        .build_with_as(&mut context, &overrides)
        .expect("unmatched overrides are ignored for construction");

    assert_eq!(scheduler.clock.now(), 0);
    assert!(!context.is_set("extra"));
}

// ============================================================================
// Construction failures
// ============================================================================

#[test]
fn test_constructor_taking_too_many_arguments_fails() {
    let injector = Injector::new();
    let mut context = TestContext::new("fixtures.Greedy");

    let result = injector.build(&mut context);

    match result {
        Err(Error::Construction { message, .. }) => {
            assert!(
                message.contains("asked for more"),
                "got: {}",
                message
            );
        }
        other => panic!("Expected Construction error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_constructor_ignoring_arguments_fails() {
    let injector = Injector::new();
    let mut context = TestContext::new("fixtures.Lazy");

    let result = injector.build(&mut context);

    match result {
        Err(Error::Construction { message, .. }) => {
            assert!(
                message.contains("consumed 0 of 1"),
                "got: {}",
                message
            );
        }
        other => panic!("Expected Construction error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_build_as_with_wrong_type_fails() {
    let injector = Injector::new();
    let mut context = TestContext::new("fixtures.Heartbeat");

    let result: injected::Result<Arc<Scheduler>> = injector.build_as(&mut context);

    match result {
        Err(Error::Construction { message, .. }) => {
            assert!(message.contains("is not a"), "got: {}", message);
        }
        other => panic!("Expected Construction error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_parameterless_target_builds_with_zero_arguments() {
    let injector = Injector::new();
    let mut context = TestContext::new("fixtures.Heartbeat");
    // Unrelated slot contents do not disturb a parameterless build.
    context.set("noise", Dependency::new("ignored".to_string()));

    let _heartbeat: Arc<Heartbeat> = injector.build_as(&mut context).expect("build should succeed");
}
