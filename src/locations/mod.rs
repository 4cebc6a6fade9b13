// src/locations/mod.rs

// --- Core (pure, no Bevy) ---
pub mod definitions;
pub mod normalizer;
pub mod search_index;
pub mod sort_engine;
pub mod view_state;

// --- Upstream client ---
pub mod fetch;

// --- Bevy integration ---
pub mod events;
pub mod plugin;
pub mod resources;
pub(crate) mod systems;

pub use definitions::ColumnKey;
pub use plugin::LocationsPlugin;
pub use resources::LocationsTable;
pub use view_state::{DisplayMode, ViewState};
