//! Roster reconciliation: drives snapshot lookups for an externally
//! supplied friend roster, classifies each result as a new identity, an
//! unambiguous continuation, or an ambiguous merge needing a caller
//! decision, and applies whichever resolution the caller chooses.

mod tracker;

pub use tracker::{RefreshOutcome, RosterEntry, Tracker};

#[cfg(test)]
mod tests;
