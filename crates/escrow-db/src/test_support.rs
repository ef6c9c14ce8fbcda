//! Shared test utilities for escrow-db unit tests.
