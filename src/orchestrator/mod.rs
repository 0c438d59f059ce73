//! Discovery orchestrator: concurrent source queries, merge, enrichment,
//! distance backfill, radius filter, curation.
//!
//! The stages live in their own modules so each can be exercised alone;
//! [`discover::Discovery`] runs them in order.

pub mod discover;
pub mod distance;
pub mod merge;
pub mod scoring;
