//! End-to-end tests for the Jarvis dashboard service live in `tests/`.
//!
//! They drive the Axum router with `tower::ServiceExt::oneshot` against a
//! scripted backend, a `wiremock` upstream, or a real preferences file.
