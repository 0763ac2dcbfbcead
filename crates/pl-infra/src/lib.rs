pub mod bootstrap;
pub mod config;
pub mod directory;
pub mod error_surface;
pub mod events;
pub mod favorites;

pub use directory::StaticPrincipalDirectory;
pub use error_surface::TracingErrorSurface;
pub use events::LoggingFieldEvents;
pub use favorites::InMemoryFavoriteUsers;
