//! Generic XML tree primitives shared by the firewall configuration tools.
//!
//! The tree keeps element order and attributes but drops whitespace-only
//! text, comments and declarations. Two output styles exist: indented
//! documents for files on disk, and compact rendering for opaque fragments
//! that must survive a parse/render cycle unchanged.

pub mod parser;
pub mod tree;
pub mod writer;

pub use parser::{parse, parse_file, parse_fragment, ParseError};
pub use tree::XmlNode;
pub use writer::{render, render_inner, write, write_file, WriteError};
