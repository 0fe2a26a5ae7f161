//! # System Interaction Layer
//!
//! Abstractions over the terminal the program runs in.
//!
//! ## Modules
//!
//! - **`console`**: line-based input and output for the interactive menu and the
//!   handlers, with a terminal implementation and a scripted one for tests.

pub mod console;
