//! Property-based tests for row operations and reduction.
