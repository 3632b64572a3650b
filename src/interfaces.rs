pub mod registry;
pub mod resolver;

pub use registry::{InterfaceRegistry, NetInterface};
pub use resolver::AliasResolver;
