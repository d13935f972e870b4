// src/packages/mod.rs

//! Package discovery and header inspection
//!
//! Header readers implement the `PackageInspector` trait; the RPM reader is
//! the only one in use.

pub mod discovery;
pub mod rpm;
pub mod traits;

pub use discovery::{find_packages, find_packages_in_file};
pub use self::rpm::RpmInspector;
pub use traits::{HeaderInfo, PackageInspector};
