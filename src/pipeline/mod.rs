//! Pipeline stages and entry points.
//!
//! - `overlay::merge`: apply config overrides to the catalog
//! - `fusion::fuse`: reconcile scraped and manual status
//! - `assemble_states`: build per-resort state from all sources
//! - `run_recommend`: load, assemble, score and rank
//! - `run_scrape`: scrape resort sites into the status file

pub mod assemble;
pub mod fusion;
pub mod overlay;
pub mod recommend;
pub mod scrape;

pub use assemble::{assemble_states, select_forecast};
pub use fusion::fuse;
pub use overlay::merge;
pub use recommend::{load_states, run_recommend};
pub use scrape::run_scrape;
