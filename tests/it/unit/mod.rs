//! Unit tests for flowcanvas.

mod config_tests;
mod perf_tests;
mod viewport_tests;
