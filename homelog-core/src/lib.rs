//! Board-agnostic core for the HomeLog station firmware
//!
//! This crate holds the station configuration: the WiFi networks to join,
//! the endpoints readings are reported to, the alert tone, and the display
//! panel geometry. It is shared by the firmware and by its build script,
//! which validates `station.toml` before anything is flashed.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
