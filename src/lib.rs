//! # League Manager
//!
//! Scheduling and standings for a home-and-away league.
//!
//! ## Architecture
//!
//! - **models**: Participants, fixtures, results and standings rows
//! - **schedule**: Double round-robin generation (circle method, byes for odd rosters)
//! - **standings**: Aggregation and the layered tie-break ranking
//! - **config**: Configuration loading and validation
//! - **storage**: JSON snapshot used by the `league` binary
//!
//! Both engines are pure: they read the roster and fixture list and return
//! fresh output, so they can be called as often as the host likes.
//!
//! ```
//! use league_manager::models::{MatchResult, Participant};
//! use league_manager::schedule::{ScheduleGenerator, Seeding};
//! use league_manager::standings;
//!
//! let teams = Participant::roster(&["Lions", "Tigers", "Bears", "Wolves"]);
//! let mut fixtures = ScheduleGenerator::new(Seeding::Seeded(1))
//!     .generate(&teams)
//!     .unwrap();
//! assert_eq!(fixtures.len(), 12);
//!
//! fixtures[0].record(MatchResult::score(2, 0));
//! let table = standings::rank(&teams, &fixtures);
//! assert_eq!(table[0].points, 3);
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod schedule;
pub mod standings;
pub mod storage;

pub use error::LeagueError;
pub use models::*;
pub use schedule::{ScheduleGenerator, Seeding};
pub use standings::{StandingsEngine, TieBreakMode};
