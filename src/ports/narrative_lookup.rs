//! NarrativeLookup port - Interface for factor theme labels.
//!
//! Theme labels come from whoever interprets the factors (a researcher, a
//! narrative store). The analysis core only asks for them by factor id.

use std::collections::{BTreeMap, HashMap};

use crate::domain::foundation::FactorId;

/// Port for looking up a human-readable theme for a factor.
///
/// Returning `None` lets the caller synthesize a label from factor ids.
pub trait NarrativeLookup: Send + Sync {
    /// Returns the theme label for a factor, if one is known.
    fn theme_for(&self, factor: FactorId) -> Option<String>;
}

impl NarrativeLookup for HashMap<FactorId, String> {
    fn theme_for(&self, factor: FactorId) -> Option<String> {
        self.get(&factor).cloned()
    }
}

impl NarrativeLookup for BTreeMap<FactorId, String> {
    fn theme_for(&self, factor: FactorId) -> Option<String> {
        self.get(&factor).cloned()
    }
}

/// Adapts a closure into a lookup.
pub struct FnNarrative<F>(pub F);

impl<F> NarrativeLookup for FnNarrative<F>
where
    F: Fn(FactorId) -> Option<String> + Send + Sync,
{
    fn theme_for(&self, factor: FactorId) -> Option<String> {
        (self.0)(factor)
    }
}

/// Lookup that never knows a theme.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNarrative;

impl NarrativeLookup for NoNarrative {
    fn theme_for(&self, _factor: FactorId) -> Option<String> {
        None
    }
}
