//! CMSIS pack description (`.pdsc`) device picker.
//!
//! This crate reads a `.pdsc` package description, extracts its
//! sub-family/device hierarchy and lets a user choose a device to see its
//! description.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pdsc_picker::workspace::load_file;
//!
//! let sub_families = load_file("devices.pdsc").unwrap();
//! for sub_family in &sub_families {
//!     println!("{}", sub_family.label);
//!     for device in &sub_family.devices {
//!         println!("  {}: {}", device.label, device.description);
//!     }
//! }
//! ```
//!
//! # Interactive Selection
//!
//! ```rust,no_run
//! use pdsc_picker::flow::run_command;
//! use pdsc_picker::picker::{ConsoleNotifier, TerminalPicker};
//! use pdsc_picker::workspace::Workspace;
//! use std::io;
//!
//! let workspace = Workspace::new(vec![std::env::current_dir().unwrap()]);
//! let mut picker = TerminalPicker::new(io::stdin().lock(), io::stdout());
//! let mut notifier = ConsoleNotifier::new(io::stdout(), io::stderr());
//! run_command(&workspace, &mut picker, &mut notifier).unwrap();
//! ```
//!
//! # Module Structure
//!
//! - [`tree`] - Generic XML tree parser
//! - [`objects`] - Sub-family and device records
//! - [`extract`] - Hierarchy extraction and validation
//! - [`workspace`] - Locating and loading the description file
//! - [`picker`] - Selection prompts and message display
//! - [`flow`] - The two-step selection command
//! - [`error`] - Error types
//!
//! # Optional Features
//!
//! - `serde` - Enable serde serialization/deserialization support
//! - `cli` - Build the `pdsc_pick` binary (enabled by default)

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod error;
pub mod extract;
pub mod flow;
pub mod objects;
pub mod picker;
pub mod tree;
pub mod workspace;

// Re-export commonly used types at the crate root
pub use error::{Error, Result};
pub use extract::extract;
pub use flow::{run_command, show_sub_family_devices, Outcome, COMMAND_ID};
pub use objects::{Device, SubFamilies, SubFamily, NO_DESCRIPTION};
pub use picker::{ConsoleNotifier, Notifier, Picker, TerminalPicker};
pub use tree::{Document, Element};
pub use workspace::{load_file, Workspace, WorkspaceConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
