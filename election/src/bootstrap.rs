//! Bootstrap nodes and the genesis baseline.
//!
//! The very first epoch has no previous broadcast block to inherit a roster
//! from. Instead the fixed bootstrap list seeds it: the first bootstrap node
//! is the sole committee member and every other one is a miner.

use crate::{Baseline, RosterError};
use roster_types::{NodeId, NodeInfo};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

const ENODE_SCHEME: &str = "enode://";

/// A bootstrap node: identity and address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapNode {
    pub id: NodeId,
    pub ip: String,
}

impl BootstrapNode {
    pub fn new(id: NodeId, ip: impl Into<String>) -> Self {
        Self { id, ip: ip.into() }
    }

    /// Parse `enode://<hex node id>@<ip>:<port>[?discport=<port>]`.
    ///
    /// The id is normalised to lowercase hex; only the IP is kept of the address.
    pub fn parse_enode(url: &str) -> Result<Self, RosterError> {
        let invalid = |reason: &str| RosterError::InvalidBootnode {
            url: url.to_string(),
            reason: reason.to_string(),
        };

        let rest = url
            .strip_prefix(ENODE_SCHEME)
            .ok_or_else(|| invalid("missing enode:// scheme"))?;
        let (id_hex, host) = rest
            .split_once('@')
            .ok_or_else(|| invalid("missing '@' between id and address"))?;

        if id_hex.is_empty() {
            return Err(invalid("empty node id"));
        }
        let id_bytes = hex::decode(id_hex).map_err(|e| invalid(&format!("node id: {e}")))?;

        let host = host.split('?').next().unwrap_or_default();
        let addr: SocketAddr = host
            .parse()
            .map_err(|e| invalid(&format!("address: {e}")))?;

        let id = NodeId::new(hex::encode(id_bytes))?;
        Ok(Self::new(id, addr.ip().to_string()))
    }
}

/// The baseline roster for the genesis epoch.
///
/// The first node becomes the sole committee member, the rest miners; every
/// entry gets `wealth`. An empty list yields an empty baseline.
pub fn genesis_baseline(nodes: &[BootstrapNode], wealth: u64) -> Baseline {
    let entry = |node: &BootstrapNode| NodeInfo::new(node.id.clone(), node.ip.clone(), wealth);

    let Some((first, rest)) = nodes.split_first() else {
        return Baseline::default();
    };
    Baseline {
        miners: rest.iter().map(entry).collect(),
        committee: vec![entry(first)],
        both: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "a979fb575495b8d6db44f750317d0f4622bf4c2aa3365d6af7c284339968eef29b69ad0dce72a4d8db5ebb4968de0e3bec910127f134779fbcb0cb6d3331163c";

    fn node(id: &str, ip: &str) -> BootstrapNode {
        BootstrapNode::new(NodeId::new(id).unwrap(), ip)
    }

    #[test]
    fn parses_enode_url() {
        let node = BootstrapNode::parse_enode(&format!("enode://{ID}@52.16.188.185:30303")).unwrap();
        assert_eq!(node.id.as_str(), ID);
        assert_eq!(node.ip, "52.16.188.185");
    }

    #[test]
    fn normalises_id_and_ignores_query() {
        let url = format!("enode://{}@[::1]:30303?discport=30301", ID.to_uppercase());
        let node = BootstrapNode::parse_enode(&url).unwrap();
        assert_eq!(node.id.as_str(), ID);
        assert_eq!(node.ip, "::1");
    }

    #[test]
    fn rejects_malformed_enodes() {
        let bad = [
            format!("{ID}@1.2.3.4:30303"),
            format!("enode://{ID}"),
            "enode://@1.2.3.4:30303".to_string(),
            "enode://zz@1.2.3.4:30303".to_string(),
            format!("enode://{ID}@not-an-ip:30303"),
            format!("enode://{ID}@1.2.3.4"),
        ];
        for url in bad {
            assert!(
                matches!(
                    BootstrapNode::parse_enode(&url),
                    Err(RosterError::InvalidBootnode { .. })
                ),
                "{url} should be rejected"
            );
        }
    }

    #[test]
    fn genesis_first_node_is_sole_committee_member() {
        let nodes = vec![node("aa", "1.1.1.1"), node("bb", "2.2.2.2"), node("cc", "3.3.3.3")];
        let baseline = genesis_baseline(&nodes, 10_000);

        assert_eq!(baseline.committee.len(), 1);
        assert_eq!(baseline.committee[0].id.as_str(), "aa");
        assert_eq!(baseline.committee[0].ip, "1.1.1.1");

        let miners: Vec<&str> = baseline.miners.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(miners, ["bb", "cc"]);
        assert!(baseline.both.is_empty());

        for info in baseline.miners.iter().chain(&baseline.committee) {
            assert_eq!(info.wealth, 10_000);
            assert_eq!(info.account, None);
        }
    }

    #[test]
    fn single_bootstrap_node_has_no_miners() {
        let baseline = genesis_baseline(&[node("aa", "1.1.1.1")], 10_000);
        assert_eq!(baseline.committee.len(), 1);
        assert!(baseline.miners.is_empty());
    }

    #[test]
    fn empty_bootstrap_list_yields_empty_baseline() {
        let baseline = genesis_baseline(&[], 10_000);
        assert_eq!(baseline.len(), 0);
    }
}
