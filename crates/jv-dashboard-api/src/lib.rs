//! Jarvis dashboard service library.
//!
//! Exposes filter inference, chat command dispatch and user preferences over
//! HTTP. Re-exports every module so the binary (`main.rs`) and external crates
//! (e.g. `jv-e2e-tests`) can reach `AppState`, `build_router` and the backends.

pub mod backend;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;
