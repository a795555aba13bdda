#![warn(clippy::pedantic)]
#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

//! Installation of xibao-gen into a prefix
//!
//! [`Installer::install`] runs four steps strictly in order and stops at the
//! first failure, leaving whatever earlier steps wrote in place:
//!
//! 1. ensure `prefix`, `prefix/bin` and `prefix/share` exist
//! 2. run the release build of the project
//! 3. copy the built executable to `prefix/bin/<app>`
//! 4. copy the resource tree to `prefix/share/<app>`, refusing to merge into
//!    an existing directory

mod installer;
mod report;
mod steps;

pub use installer::Installer;
pub use report::InstallReport;

pub use xibao_events::EventSender;
