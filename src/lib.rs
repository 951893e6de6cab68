mod extensions;
pub mod handlers;
mod imaging;
mod model;
mod settings;
mod status;
mod storage;

pub use extensions::Handles;
pub use settings::Settings;
