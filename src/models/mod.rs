pub mod episode;
pub mod media;
pub mod show;

pub use episode::Episode;
pub use media::{ImageLinks, Rating};
pub use show::Show;
