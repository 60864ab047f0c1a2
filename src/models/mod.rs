//! Core data models for the league.

mod fixture;
mod ids;
mod participant;
mod standings;

pub use fixture::*;
pub use ids::*;
pub use participant::*;
pub use standings::*;
