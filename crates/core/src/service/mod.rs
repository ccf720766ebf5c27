/// Construction shim for externally implemented services
///
/// The service itself lives in a separately built component. Callers only
/// get a handle or nothing: a failed construction is logged and turned into
/// `None` so an optional subsystem cannot break resolution paths.

use onionalias_common::ServiceError;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Status code a raw constructor returns on success
pub const STATUS_OK: u32 = 0;

/// FFI-style constructor: writes the handle into `out` and returns a status
pub type RawConstructor<S> = fn(out: &mut Option<Arc<S>>) -> u32;

/// Something that can build a service handle
pub trait ServiceFactory {
    type Service: ?Sized;

    /// Name used in log messages
    fn name(&self) -> &str;

    fn create(&self) -> Result<Arc<Self::Service>, ServiceError>;
}

type Constructor<S> = Box<dyn Fn() -> Result<Arc<S>, ServiceError> + Send + Sync>;

/// Factory wrapping a plain constructor function
pub struct ConstructorFactory<S: ?Sized> {
    name: String,
    constructor: Constructor<S>,
}

impl<S: ?Sized + 'static> ConstructorFactory<S> {
    pub fn new<F>(name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn() -> Result<Arc<S>, ServiceError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            constructor: Box::new(constructor),
        }
    }

    /// Adapt a status-code constructor
    ///
    /// A non-zero status, or a zero status with no handle written, counts as
    /// a failed construction.
    pub fn from_raw(name: impl Into<String>, constructor: RawConstructor<S>) -> Self {
        Self::new(name, move || {
            let mut out = None;
            let status = constructor(&mut out);
            if status != STATUS_OK {
                return Err(ServiceError::construction_failed(format!(
                    "status {:#x}",
                    status
                )));
            }
            out.ok_or(ServiceError::Unavailable)
        })
    }
}

impl<S: ?Sized> ServiceFactory for ConstructorFactory<S> {
    type Service = S;

    fn name(&self) -> &str {
        &self.name
    }

    fn create(&self) -> Result<Arc<S>, ServiceError> {
        (self.constructor)()
    }
}

impl<S: ?Sized> fmt::Debug for ConstructorFactory<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorFactory")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Build a service, degrading to `None` on failure
pub fn new_service<F>(factory: &F) -> Option<Arc<F::Service>>
where
    F: ServiceFactory + ?Sized,
{
    match factory.create() {
        Ok(service) => {
            debug!("Constructed {} service", factory.name());
            Some(service)
        }
        Err(e) => {
            warn!("Failed to construct {} service: {}", factory.name(), e);
            None
        }
    }
}
