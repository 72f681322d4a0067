//! # Core Application Logic
//!
//! This module contains Postpilot's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Dispatcher (jobs)    │
//!                    │  • Navigation (select)  │
//!                    │  • State + update()     │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Headless  │      │   Plugin   │
//!     │  Adapter   │      │    CLI     │      │   client   │
//!     │ (ratatui)  │      │  (main.rs) │      │ (reqwest)  │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`model`]: target post, summary descriptor, menu actions
//! - [`dispatcher`]: runs menu actions against the client
//! - [`navigation`]: the shared selection record
//! - [`viewport`] / [`notify`]: collaborator seams the adapters implement
//! - [`state`] / [`action`]: screen state and its reducer
//! - [`config`]: settings and their override order

pub mod action;
pub mod config;
pub mod dispatcher;
pub mod model;
pub mod navigation;
pub mod notify;
pub mod state;
pub mod viewport;
