//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined in
//! homelog-display for the hardware fitted to the station:
//!
//! - SSD1306 monochrome OLED over I2C

#![no_std]
#![deny(unsafe_code)]

pub mod display;
