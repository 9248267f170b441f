//! Ethernet interfaces of a firewall, independent of its schema revision.
//!
//! [`Eth`] turns list/get/show/set/edit/delete calls into requests for an
//! [`Xapi`] transport. The schema revision is picked from the device version
//! on every call through [`Schema::for_version`], so one manager can be used
//! against devices whose version is only known once they are asked.
//!
//! Write operations are two dependent steps: set/edit then vsys import, and
//! vsys unimport then delete. The second step only runs when the first one
//! succeeded and nothing is rolled back when the second one fails.

pub mod entry;
pub mod normalize;
pub mod raw;
pub mod schema;
pub mod specify;
pub mod wire;

pub use entry::{Entry, FragmentKey, Identifier, Mode};
pub use schema::Schema;

use xml_tree_core::XmlNode;

use crate::error::Error;
use crate::xapi::{as_entry_xpath, ReadVerb, TransportError, XPath, Xapi, DEVICE};

/// Path of the ethernet entries selected by `names`.
pub fn xpath<S: AsRef<str>>(names: &[S]) -> XPath {
    XPath::new([
        "config".to_string(),
        "devices".to_string(),
        as_entry_xpath(&[DEVICE]),
        "network".to_string(),
        "interface".to_string(),
        "ethernet".to_string(),
        as_entry_xpath(names),
    ])
}

/// Ethernet interface namespace bound to one transport.
#[derive(Debug)]
pub struct Eth<C> {
    con: C,
}

impl<C: Xapi> Eth<C> {
    pub fn new(con: C) -> Self {
        Self { con }
    }

    pub fn client(&self) -> &C {
        &self.con
    }

    pub fn client_mut(&mut self) -> &mut C {
        &mut self.con
    }

    pub fn into_inner(self) -> C {
        self.con
    }

    /// Names of the ethernet interfaces in the running config.
    pub fn show_list(&self) -> Result<Vec<String>, Error> {
        self.con
            .log_query(format_args!("(show) list of ethernet interfaces"));
        self.list(ReadVerb::Show)
    }

    /// Names of the ethernet interfaces in the candidate config.
    pub fn get_list(&self) -> Result<Vec<String>, Error> {
        self.con
            .log_query(format_args!("(get) list of ethernet interfaces"));
        self.list(ReadVerb::Get)
    }

    /// Read one interface from the candidate config.
    pub fn get(&self, name: &str) -> Result<Entry, Error> {
        self.con
            .log_query(format_args!("(get) ethernet interface {name:?}"));
        self.details(ReadVerb::Get, name)
    }

    /// Read one interface from the running config.
    pub fn show(&self, name: &str) -> Result<Entry, Error> {
        self.con
            .log_query(format_args!("(show) ethernet interface {name:?}"));
        self.details(ReadVerb::Show, name)
    }

    /// Create or update interfaces in one request, then import them into
    /// `vsys` (an empty vsys skips the import).
    ///
    /// A single interface is written as an `entry` under the ethernet
    /// container; several are written as one `ethernet` element under the
    /// interface collection.
    pub fn set(&mut self, vsys: &str, entries: &[Entry]) -> Result<(), Error> {
        if entries.is_empty() {
            return Ok(());
        }

        let schema = self.versioning();
        let names: Vec<String> = entries.iter().map(|e| e.name.clone()).collect();

        let mut bulk = XmlNode::new("ethernet");
        for entry in entries {
            bulk.children.push(schema.specify(entry)?);
        }
        self.con
            .log_action(format_args!("(set) ethernet interfaces: {names:?}"));

        let path = xpath(&names);
        let (path, element) = if entries.len() == 1 {
            (path.truncated(1), bulk.children.remove(0))
        } else {
            (path.truncated(2), bulk)
        };

        self.con.set(&path, &element)?;
        self.con.import_interfaces(vsys, &names)?;
        Ok(())
    }

    /// Replace one interface, then import it into `vsys`.
    pub fn edit(&mut self, vsys: &str, entry: &Entry) -> Result<(), Error> {
        let schema = self.versioning();
        self.con
            .log_action(format_args!("(edit) ethernet interface: {}", entry.name));

        let element = schema.specify(entry)?;
        let names = [entry.name.clone()];
        self.con.edit(&xpath(&names), &element)?;
        self.con.import_interfaces(vsys, &names)?;
        Ok(())
    }

    /// Remove interfaces from `vsys`, then delete them.
    ///
    /// Nothing is deleted when the unimport fails. An identifier with an
    /// empty name is rejected before any request is sent.
    pub fn delete(&mut self, vsys: &str, ids: &[Identifier]) -> Result<(), Error> {
        if ids.is_empty() {
            return Ok(());
        }
        if let Some(id) = ids.iter().find(|id| id.name().is_empty()) {
            return Err(Error::UnknownIdentifier(format!("{id:?}")));
        }

        let names: Vec<String> = ids.iter().map(|id| id.name().to_string()).collect();
        self.con
            .log_action(format_args!("(delete) ethernet interface(s): {names:?}"));

        self.con.unimport_interfaces(vsys, &names)?;
        self.con.delete(&xpath(&names))?;
        Ok(())
    }

    fn versioning(&self) -> Schema {
        Schema::for_version(&self.con.versioning())
    }

    fn list(&self, verb: ReadVerb) -> Result<Vec<String>, Error> {
        let none: [&str; 0] = [];
        let path = xpath(&none).truncated(1);
        Ok(self.con.entry_list_using(verb, &path)?)
    }

    fn details(&self, verb: ReadVerb, name: &str) -> Result<Entry, Error> {
        let path = xpath(&[name]);
        let schema = self.versioning();
        let response = self.con.read(verb, &path)?;
        let node = response
            .get_child("result")
            .and_then(|result| result.get_child("entry"))
            .ok_or_else(|| TransportError::NotFound(path.to_string()))?;
        Ok(schema.normalize(node)?)
    }
}
