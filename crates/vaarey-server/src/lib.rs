//! HTTP API for the Vaarey rainfall dashboard.
//!
//! Three GET routes: `/api/forecast` (verbatim pass-through to the upstream
//! provider), `/api/stats` (fetch + derive + local time), and `/api/cities`
//! (the Maldivian city catalog).

pub mod routes;
pub mod startup;
pub mod state;

pub use startup::app;
pub use state::AppState;
