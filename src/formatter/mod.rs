//! Message formatting — turns catalog and user data into LINE messages and
//! the HTML job detail page.

pub mod carousel;
pub mod detail;
pub mod menu;
pub mod table;

pub use carousel::job_carousel;
pub use detail::{FixedScore, NOTHING_TO_SEE, RandomScore, ScoreSource, job_detail, render_detail};
pub use menu::menu;
pub use table::job_table;

/// Alt text for both listing layouts (shown in notifications).
pub const LISTINGS_ALT_TEXT: &str = "Job Listings";

/// Sent instead of an empty carousel.
pub const NO_JOBS: &str = "There are no job listings right now.";
