//! Version-aware management of firewall ethernet interfaces.
//!
//! A firewall stores each ethernet interface as an `<entry>` element whose
//! layout changed between software releases. This crate reads and writes
//! those entries through one version independent record so callers never
//! deal with the schema revision themselves.
//!
//! # Architecture
//!
//! - [`eth`]: the record ([`eth::Entry`]), the two wire revisions, the
//!   normalize/specify pair for each, and the [`eth::Eth`] manager that
//!   issues requests
//! - [`xapi`]: the transport contract ([`xapi::Xapi`]), xpath building and
//!   transport errors
//! - [`device`]: [`device::FileDevice`], a transport backed by a
//!   configuration XML file
//! - [`version`]: device software versions and their ordering
//! - [`config`]: device settings loaded from TOML
//! - [`report`]: terminal rendering of interfaces
//!
//! # Examples
//!
//! ```ignore
//! use pan_eth::device::FileDevice;
//! use pan_eth::eth::{Entry, Eth, Mode};
//!
//! let device = FileDevice::open("running-config.xml".as_ref(), None)?;
//! let mut eth = Eth::new(device);
//!
//! let mut entry = Entry::new("ethernet1/4");
//! entry.mode = Some(Mode::Layer3);
//! entry.static_ips = vec!["10.0.0.1/24".to_string()];
//! eth.set("vsys1", &[entry])?;
//!
//! println!("{:?}", eth.get_list()?);
//! ```
//!
//! # Built on xml-tree-core
//!
//! Parsing, rendering and tree manipulation come from `xml-tree-core`. All
//! firewall-specific logic is contained in this crate.

pub mod config;
pub mod device;
pub mod error;
pub mod eth;
pub mod report;
pub mod version;
pub mod xapi;

pub use error::Error;
