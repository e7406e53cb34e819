//! Shared test utilities for harbor-db tests.
