//! Partner Insight - partner scoring analysis & AI-assisted report generation
//!
//! Core: loads a merged partner scoring CSV into process-wide state, derives
//! a KPI view, a question view and a question-label map, and renders
//! per-partner summary and population-comparison text. Glue: an HTTP
//! surface over the core and a conversational-agent pipeline that turns the
//! texts into a multi-section written assessment.

pub mod agent;
pub mod data;
pub mod report;
pub mod server;
