//! snapline - in-source expect testing with literal block promotion
//!
//! Tests print into an [`harness::ExpectScope`], then assert the buffered
//! output against a raw string literal written next to the call. With
//! promotion enabled the literal is rewritten in place to match the actual
//! output instead of failing.

pub mod diff;
pub mod harness;
pub mod observability;
pub mod offsets;
pub mod promote;
pub mod scan;
