use xml_tree_core::XmlNode;

use super::entry::Entry;
use super::normalize::normalize;
use super::specify::specify;
use super::wire::{EntryV1, EntryV2, TcpMssV1, TcpMssV2, WireError};
use crate::version::Version;

/// First release that nests the TCP MSS settings.
pub const V2_MIN_VERSION: Version = Version::new(7, 1, 0);

/// Schema revision of the ethernet entry, each one a bound
/// normalizer/specifier pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    V1,
    V2,
}

impl Schema {
    pub fn for_version(version: &Version) -> Self {
        if version.gte(&V2_MIN_VERSION) {
            Self::V2
        } else {
            Self::V1
        }
    }

    /// Decode an `<entry>` element in this revision and normalize it.
    pub fn normalize(self, node: &XmlNode) -> Result<Entry, WireError> {
        match self {
            Self::V1 => Ok(normalize(&EntryV1::decode(node)?)),
            Self::V2 => Ok(normalize(&EntryV2::decode(node)?)),
        }
    }

    /// Build the `<entry>` element for `entry` in this revision.
    pub fn specify(self, entry: &Entry) -> Result<XmlNode, WireError> {
        match self {
            Self::V1 => specify::<TcpMssV1>(entry).encode(),
            Self::V2 => specify::<TcpMssV2>(entry).encode(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Schema;
    use crate::eth::entry::{Entry, Mode};
    use crate::version::Version;

    #[test]
    fn versions_before_7_1_use_v1() {
        assert_eq!(Schema::for_version(&Version::new(7, 0, 9)), Schema::V1);
        assert_eq!(Schema::for_version(&Version::new(6, 1, 0)), Schema::V1);
        assert_eq!(Schema::for_version(&Version::default()), Schema::V1);
    }

    #[test]
    fn versions_from_7_1_use_v2() {
        assert_eq!(Schema::for_version(&Version::new(7, 1, 0)), Schema::V2);
        assert_eq!(Schema::for_version(&Version::new(8, 0, 0)), Schema::V2);
        assert_eq!(Schema::for_version(&Version::new(10, 2, 3)), Schema::V2);
    }

    #[test]
    fn only_v2_writes_mss_adjustments() {
        let mut entry = Entry::new("ethernet1/1");
        entry.mode = Some(Mode::Layer3);
        entry.ipv4_mss_adjust = 40;
        entry.ipv6_mss_adjust = 60;

        let v1 = Schema::V1.specify(&entry).expect("v1").to_string();
        assert!(v1.contains("<adjust-tcp-mss>no</adjust-tcp-mss>"));
        assert!(!v1.contains("mss-adjustment"));

        let v2 = Schema::V2.specify(&entry).expect("v2").to_string();
        assert!(v2.contains("<ipv4-mss-adjustment>40</ipv4-mss-adjustment>"));
        assert!(v2.contains("<ipv6-mss-adjustment>60</ipv6-mss-adjustment>"));
    }
}
