pub mod registry;
pub mod resolver;
pub mod service;

pub use registry::{get_singleton, AliasRegistry};
pub use resolver::AliasResolver;
pub use service::{new_service, ConstructorFactory, RawConstructor, ServiceFactory, STATUS_OK};

pub use onionalias_common::{Alias, AliasError, OnionAddress, ServiceError};
