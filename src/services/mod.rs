pub mod browser;
pub use browser::{
    Browser, Controller, ControllerOptions, Effect, Rejected, Screen, StartMode,
};

pub mod cache;
pub use cache::EpisodeCache;

pub mod filter;
pub use filter::{SearchIndex, Searchable, filter};

pub mod listing;
pub use listing::Listing;

pub mod render;
pub use render::{Card, Listable, RenderOptions, RenderedView, StatusStyle};

pub mod selection;
pub use selection::{SelectOption, SelectionKey};
