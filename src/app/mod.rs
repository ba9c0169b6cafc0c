//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the RoomSense controller:
//! cycle orchestration and the outbound event surface.  All interaction
//! with the board happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
