pub mod error;
pub mod platform;
pub mod settings;

pub use platform::Platform;
pub use settings::Settings;
