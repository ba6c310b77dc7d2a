//! JSON API for triage from another device on the same network.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8501
//! pet-triage serve
//!
//! # Reachable from phones on the LAN
//! pet-triage serve --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `POST /api/evaluate` - Evaluate a case `{species, symptoms, emergency_flags}`
//! - `GET /api/reference` - Species tables with every condition signature
//! - `GET /api/vocabulary` - Species, symptom labels and emergency signs for a form

pub mod server;
