/// Core functionality modules
///
/// Contains the bookmark resolver, navigation on top of it, and the path
/// validation both rely on.

pub mod navigator;
pub mod paths;
pub mod resolver;

pub use resolver::Resolver;
