//! Studio Booking - Booking and notification engine for photography studios
//!
//! This crate books sessions against photographer availability, guards
//! cancellations and reschedules with a versioned cancellation policy, and
//! notifies participants through preference-gated push and in-app channels,
//! including timed reminders ahead of each session.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
