//! Command interface for the telemetry link
//!
//! The link layer decodes configuration commands from the ground station and
//! hands them to [`CommandHandler`]. The outcome is reported back as a
//! [`CommandResult`].

pub mod command;

pub use command::{Command, CommandHandler};

/// Outcome reported back to the ground station
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandResult {
    Success,
    Failed,
}
