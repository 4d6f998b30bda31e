//! mastery-report: report rendering for mastery analyses.

pub mod html;
