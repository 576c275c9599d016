//! This crate has no library code. It exists solely to host the
//! cross-crate integration tests under `tests/`.
