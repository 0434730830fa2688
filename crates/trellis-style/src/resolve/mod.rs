//! Style resolution: the style manager and the cascade.

mod cascade;
mod config;
mod manager;
mod shared;

pub use cascade::StyleContext;
pub use config::StyleManagerConfig;
pub use manager::{GLOBAL_SELECTOR, StyleManager};
pub use shared::SharedStyleManager;
