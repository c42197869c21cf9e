//! Ports - Interfaces for external collaborators.
//!
//! The analysis core is pure; the only thing it asks the outside world for
//! is a theme label per factor.
//!
//! - `NarrativeLookup` - Factor id to theme label

mod narrative_lookup;

pub use narrative_lookup::{FnNarrative, NarrativeLookup, NoNarrative};
