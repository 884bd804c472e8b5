//! macOS integration layer for framesnap
//!
//! These modules define the capabilities the resize engine consumes (windows,
//! screens, permissions) as traits. System-backed implementations talk to the
//! platform; the in-memory ones back the tests and the offline simulator.

pub mod accessibility;
pub mod core_graphics;
pub mod permissions;

pub use accessibility::*;
pub use core_graphics::*;
pub use permissions::*;
