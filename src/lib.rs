pub mod config;
pub mod display;
pub mod loader;
pub mod locator;
pub mod normalize;
pub mod paginator;
pub mod search;
pub mod session;
pub mod state;

// Re-export the pure paging core for convenient access
pub use normalize::{normalize, normalize_into, NormalizedText};
pub use paginator::{
    build_boundaries, paginate, paginate_text,
    Page, PageBoundary, PageSize, Pagination
};
pub use locator::page_for_position;
pub use search::{search, search_boundaries, SearchMatch, Searcher, SearchOptions};

// Re-export the reading layer built on top of it
pub use config::ReaderConfig;
pub use display::{render_status_line, truncate_for_display, StatusLineOptions};
pub use session::ReadingSession;
pub use state::{ReadingState, ReadingStateStore};
