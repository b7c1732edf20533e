pub const TVMAZE_API: &str = "https://api.tvmaze.com";

pub const PLACEHOLDER_IMAGE: &str = "levels/example-screenshots/placeholder.png";

pub mod messages {

    pub const LOADING_SHOWS: &str = "Loading shows...";

    pub const LOADING_EPISODES: &str = "Loading episodes...";

    pub const SHOWS_FAILED: &str = "Failed to load shows. Please try again later.";

    pub const EPISODES_FAILED: &str = "Failed to load episodes. Please try again later.";

    pub const SELECT_SHOW: &str = "Please select a show.";
}

pub mod limits {

    pub const MIN_SUMMARY_WIDTH: usize = 20;

    pub const DEFAULT_SUMMARY_WIDTH: usize = 80;
}
