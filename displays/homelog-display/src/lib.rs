//! Display session and driver abstraction for HomeLog
//!
//! This crate provides:
//! - `DisplayDriver` trait: the capability every panel driver exposes
//! - `DisplaySession`: ordered text output (begin, print, clear, banner)
//! - `TextCursor` / `TextGrid`: character-cell layout shared by drivers
//! - `HeadlessDriver`: in-memory driver for tests and host-side use
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  homelog-firmware (boot)     │
//! └──────────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────┐
//! │  DisplaySession (this crate) │
//! └──────────────────────────────┘
//!                │ &'d mut D where D: DisplayDriver
//!        ┌───────┴────────┐
//!        ▼                ▼
//! ┌─────────────┐  ┌──────────────┐
//! │ Ssd1306     │  │ Headless     │
//! │ (drivers)   │  │ (this crate) │
//! └─────────────┘  └──────────────┘
//! ```
//!
//! Calling code never touches a driver directly once the session owns the
//! borrow, so the bus and panel can be swapped without changing callers.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod banner;
pub mod grid;
pub mod headless;
pub mod session;

// Re-export key types
pub use backend::{DisplayDriver, DriverError, PanelGeometry, TextStyle};
pub use banner::Banner;
pub use grid::{TextCursor, TextGrid, CELL_HEIGHT, CELL_WIDTH, MAX_COLS, MAX_ROWS};
pub use headless::HeadlessDriver;
pub use session::{DisplaySession, SessionState, WELCOME_LINE};
