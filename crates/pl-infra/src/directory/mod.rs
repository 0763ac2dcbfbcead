//! Principal directory adapters implementing the lookup port.

mod static_directory;

pub use static_directory::StaticPrincipalDirectory;
