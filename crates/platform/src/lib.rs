//! Platform abstraction for the installer's side effects.
//!
//! Every filesystem mutation and every spawned process goes through the
//! traits in this crate:
//! - [`FilesystemOperations`]: directory creation, file and tree copies, renames
//! - [`ProcessOperations`]: running external commands such as the release build
//!
//! Each operation reports started/completed/failed [`xibao_events::PlatformEvent`]s
//! through the [`PlatformContext`] it is given.

pub mod core;
pub mod filesystem;
pub mod implementations;
pub mod process;

pub use core::{Platform, PlatformContext};
pub use implementations::native::NativePlatform;

pub use filesystem::FilesystemOperations;
pub use process::{CommandOutput, PlatformCommand, ProcessOperations};
