//! Type-erased dependency values
//!
//! A context slot holds a [`Dependency`]: two erased payloads over the same
//! underlying object. The *view* is what a construct function downcasts,
//! conventionally an `Arc<dyn Trait>`. The *handle* is the concrete stand-in
//! type, kept so the test can reach recorded state after an auto-synthesis.

use std::any::Any;
use std::sync::Arc;

/// A resolved dependency instance stored in a context slot
///
/// The constructor-facing view and the test-facing handle share the same
/// underlying object, so calls made by the subject under test are observable
/// through the handle retrieved from the context.
///
/// # Example
///
/// ```ignore
/// let recorder = Arc::new(RecordingEmailService::default());
/// let dep = Dependency::with_handle(
///     Arc::clone(&recorder) as Arc<dyn EmailService>,
///     recorder,
/// );
///
/// let service: Arc<dyn EmailService> = dep.view().unwrap();
/// let handle: Arc<RecordingEmailService> = dep.handle().unwrap();
/// ```
#[derive(Clone)]
pub struct Dependency {
    /// Erased view passed positionally to the target constructor
    view: Arc<dyn Any + Send + Sync>,
    /// Erased concrete stand-in, inspectable by test code
    handle: Arc<dyn Any + Send + Sync>,
}

impl Dependency {
    /// Create a dependency whose view and handle are the same value
    ///
    /// Use this for plain values and for hand-built fakes the test already
    /// holds a reference to.
    pub fn new<V: Any + Send + Sync>(view: V) -> Self {
        let payload: Arc<dyn Any + Send + Sync> = Arc::new(view);
        Self {
            view: Arc::clone(&payload),
            handle: payload,
        }
    }

    /// Create a dependency with a distinct concrete handle
    ///
    /// `view` is what the constructor receives (conventionally
    /// `Arc<dyn Trait>`); `handle` is the concrete stand-in behind it. Both
    /// must point at the same object for recorded calls to be shared.
    pub fn with_handle<V, H>(view: V, handle: Arc<H>) -> Self
    where
        V: Any + Send + Sync,
        H: Any + Send + Sync,
    {
        Self {
            view: Arc::new(view),
            handle,
        }
    }

    /// Downcast the constructor-facing view
    ///
    /// Returns `None` if the stored view is not a `V`.
    pub fn view<V: Any + Send + Sync + Clone>(&self) -> Option<V> {
        self.view.downcast_ref::<V>().cloned()
    }

    /// Downcast the concrete handle
    ///
    /// Returns `None` if the stored handle is not an `H`.
    pub fn handle<H: Any + Send + Sync>(&self) -> Option<Arc<H>> {
        Arc::clone(&self.handle).downcast::<H>().ok()
    }
}

impl std::fmt::Debug for Dependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dependency").finish_non_exhaustive()
    }
}
