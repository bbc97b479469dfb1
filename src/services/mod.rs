//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the classification, dispatch, adapter, and persistence
//! logic so route handlers stay focused on protocol translation. Every
//! adapter is a stateless boundary call configured through `AppState`.

pub mod advice;
pub mod chat;
pub mod classify;
pub mod history;
pub mod market;
pub mod seasonal;
pub mod speech;
pub mod translate;
pub mod vision;
pub mod weather;
