//! Integration test suite for the paycheck engine.
//!
//! Exercises the engine through the public host traits exactly as a game
//! server would: a mock host, a config store, sweeps, and the scheduler.

pub mod helpers;
