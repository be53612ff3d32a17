//! Cache wiring
//!
//! Background maintenance for the coordinator. The coordinator itself lives
//! in `tiercache-application`; store providers in `tiercache-providers`.

pub mod cleanup;

pub use cleanup::CleanupScheduler;
