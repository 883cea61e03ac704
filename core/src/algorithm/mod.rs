//! Tributary algorithm framework
//!
//! Flow algorithms and the shared trait vocabulary they implement.
//!
//! Copyright (c) 2026 Tributary contributors

pub mod traits;
pub mod graph;

pub use self::traits::*;
pub use self::graph::*;
