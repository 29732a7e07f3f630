//! Integration test entry point.

mod helpers;

mod health_test;
mod share_test;
