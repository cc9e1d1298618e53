//! cms-workflow - Submission phase workflow for the Cannabis Management System
//!
//! Library half of the `cms` binary. It owns the phase workflow model (phase
//! ordering, role-gated permissions, progress), a typed client for the remote
//! case-tracking API, and the plan/execute engine that issues phase changes.

pub mod api;
pub mod config;
pub mod error;
pub mod session;
pub mod transition;
pub mod types;
pub mod workflow;
