//! End-to-end roster derivation over an in-memory chain:
//! signed election transactions → scan → baseline merge → roster.
//!
//! Heights follow a 100-block broadcast interval throughout, so rosters are
//! computed at 98, 198, ... and recorded in broadcast blocks 100, 200, ...

use roster_chain::{BlockHeader, ChainReader};
use roster_election::scanner::BLOCKS_MISSING;
use roster_election::{BootstrapNode, EpochParams, RosterBuilder, RosterError};
use roster_nullables::{ElectionTxFactory, NullChain};
use roster_transactions::{Signer, Transaction};
use roster_types::{ChainConfig, ElectionAction, EpochRoster, NetworkId, NodeId, NodeInfo, TxHash};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const INTERVAL: u64 = 100;

fn id(s: &str) -> NodeId {
    NodeId::new(s).unwrap()
}

fn bootnodes() -> Vec<BootstrapNode> {
    vec![
        BootstrapNode::new(id("boot0"), "10.1.0.1"),
        BootstrapNode::new(id("boot1"), "10.1.0.2"),
        BootstrapNode::new(id("boot2"), "10.1.0.3"),
    ]
}

fn dev_chain() -> Arc<NullChain> {
    Arc::new(NullChain::new(ChainConfig::for_network(NetworkId::Dev)))
}

fn builder(chain: &Arc<NullChain>) -> RosterBuilder<Arc<NullChain>> {
    RosterBuilder::new(
        Arc::clone(chain),
        EpochParams::new(INTERVAL, bootnodes()).unwrap(),
    )
}

fn factory() -> ElectionTxFactory {
    ElectionTxFactory::new(Signer::ReplayProtected {
        chain_id: NetworkId::Dev.chain_id(),
    })
}

/// Append `txs` as the block at `height`, filling any gap with empty blocks.
fn put(chain: &NullChain, height: u64, txs: Vec<Transaction>) {
    if height > 0 {
        chain.extend_to(height - 1).unwrap();
    }
    assert_eq!(chain.push_block(txs).unwrap(), height, "blocks must be put in height order");
}

/// Record `roster` in a broadcast block at `height`.
fn put_broadcast(chain: &NullChain, height: u64, roster: EpochRoster) {
    chain.extend_to(height - 1).unwrap();
    let number = chain.push_header(BlockHeader::default().with_roster(roster), Vec::new()).unwrap();
    assert_eq!(number, height);
}

fn ids(list: &[NodeInfo]) -> Vec<String> {
    list.iter().map(|n| n.id.as_str().to_string()).collect()
}

// ---------------------------------------------------------------------------
// 1. Genesis epoch
// ---------------------------------------------------------------------------

#[test]
fn first_boundary_builds_from_bootstrap_nodes() {
    let chain = dev_chain();
    chain.extend_to(98).unwrap();

    let roster = builder(&chain).build_roster(98).unwrap();
    assert_eq!(ids(&roster.committee_list), ["boot0"]);
    assert_eq!(ids(&roster.miner_list), ["boot1", "boot2"]);
    assert!(roster.both.is_empty());
    assert!(roster.offline_list.is_empty());
    for (info, _) in roster.entries() {
        assert_eq!(info.wealth, 10_000);
        assert_eq!(info.account, None);
    }
}

#[test]
fn genesis_window_covers_blocks_zero_through_boundary() {
    let chain = dev_chain();
    let f = factory();
    put(&chain, 0, vec![f.declare(1, &id("first"), ElectionAction::Miner, 1).unwrap()]);
    put(&chain, 98, vec![f.declare(2, &id("last"), ElectionAction::Both, 2).unwrap()]);
    put(&chain, 99, vec![f.declare(3, &id("beyond"), ElectionAction::Miner, 3).unwrap()]);

    let roster = builder(&chain).build_roster(98).unwrap();
    assert_eq!(roster.role_of(&id("first")), Some(ElectionAction::Miner));
    assert_eq!(roster.role_of(&id("last")), Some(ElectionAction::Both));
    assert_eq!(roster.role_of(&id("beyond")), None);
}

#[test]
fn non_boundary_heights_are_rejected() {
    let chain = dev_chain();
    chain.extend_to(200).unwrap();
    let b = builder(&chain);
    for height in [0, 97, 99, 100, 150, 199] {
        assert!(matches!(
            b.build_roster(height),
            Err(RosterError::NotEpochBoundary { interval: INTERVAL, .. })
        ));
    }
}

// ---------------------------------------------------------------------------
// 2. Merge precedence
// ---------------------------------------------------------------------------

#[test]
fn committee_declaration_overrides_baseline_miner() {
    let chain = dev_chain();
    put(
        &chain,
        40,
        vec![factory().declare(7, &id("boot1"), ElectionAction::Committee, 900).unwrap()],
    );
    chain.extend_to(98).unwrap();

    let roster = builder(&chain).build_roster(98).unwrap();
    assert_eq!(ids(&roster.committee_list), ["boot0", "boot1"]);
    assert_eq!(ids(&roster.miner_list), ["boot2"]);

    let boot1 = &roster.committee_list[1];
    assert_eq!(boot1.wealth, 900);
    assert_eq!(boot1.account, Some(ElectionTxFactory::account(7)));
}

#[test]
fn miner_then_exit_lands_in_offline_list() {
    let chain = dev_chain();
    let f = factory();
    put(&chain, 10, vec![f.declare(4, &id("node"), ElectionAction::Miner, 50).unwrap()]);
    put(&chain, 20, vec![f.declare(4, &id("node"), ElectionAction::Exit, 0).unwrap()]);
    chain.extend_to(98).unwrap();

    let roster = builder(&chain).build_roster(98).unwrap();
    assert_eq!(ids(&roster.offline_list), ["node"]);
    assert_eq!(roster.role_of(&id("node")), Some(ElectionAction::Exit));
}

#[test]
fn bootstrap_node_can_exit() {
    let chain = dev_chain();
    put(
        &chain,
        5,
        vec![factory().declare(1, &id("boot0"), ElectionAction::Exit, 0).unwrap()],
    );
    chain.extend_to(98).unwrap();

    let roster = builder(&chain).build_roster(98).unwrap();
    assert!(roster.committee_list.is_empty());
    assert_eq!(ids(&roster.offline_list), ["boot0"]);
}

// ---------------------------------------------------------------------------
// 3. Later epochs
// ---------------------------------------------------------------------------

#[test]
fn second_epoch_inherits_broadcast_roster() {
    let chain = dev_chain();
    let f = factory();
    put(&chain, 30, vec![f.declare(5, &id("joiner"), ElectionAction::Miner, 10).unwrap()]);
    chain.extend_to(98).unwrap();
    let b = builder(&chain);
    let first = b.build_roster(98).unwrap();
    put_broadcast(&chain, 100, first);
    chain.extend_to(198).unwrap();

    let second = b.build_roster(198).unwrap();
    assert_eq!(ids(&second.committee_list), ["boot0"]);
    assert_eq!(ids(&second.miner_list), ["boot1", "boot2", "joiner"]);
}

#[test]
fn exited_nodes_are_not_carried_into_the_next_epoch() {
    let chain = dev_chain();
    put(
        &chain,
        50,
        vec![factory().declare(2, &id("boot2"), ElectionAction::Exit, 0).unwrap()],
    );
    chain.extend_to(98).unwrap();
    let b = builder(&chain);
    let first = b.build_roster(98).unwrap();
    assert_eq!(ids(&first.offline_list), ["boot2"]);
    put_broadcast(&chain, 100, first);
    chain.extend_to(198).unwrap();

    let second = b.build_roster(198).unwrap();
    assert_eq!(second.role_of(&id("boot2")), None);
    assert!(second.offline_list.is_empty());
}

#[test]
fn window_reaches_back_past_previous_boundary() {
    // The window for 198 is [97, 198]: declarations in 97 and 98 count again,
    // 96 does not.
    let chain = dev_chain();
    let f = factory();
    put(&chain, 96, vec![f.declare(1, &id("early"), ElectionAction::Miner, 1).unwrap()]);
    put(&chain, 97, vec![f.declare(2, &id("edge"), ElectionAction::Miner, 1).unwrap()]);
    chain.extend_to(99).unwrap();
    // An empty broadcast roster so only the window decides membership.
    put_broadcast(&chain, 100, EpochRoster::default());
    chain.extend_to(198).unwrap();

    let roster = builder(&chain).build_roster(198).unwrap();
    assert_eq!(roster.role_of(&id("early")), None);
    assert_eq!(roster.role_of(&id("edge")), Some(ElectionAction::Miner));
}

#[test]
fn missing_broadcast_block_fails() {
    let chain = dev_chain();
    chain.extend_to(198).unwrap();
    chain.remove_block(100);

    assert!(matches!(
        builder(&chain).build_roster(198),
        Err(RosterError::MissingBaselineBlock(100))
    ));
}

#[test]
fn sparse_window_is_tolerated() {
    let chain = dev_chain();
    let f = factory();
    put(&chain, 10, vec![f.declare(1, &id("a"), ElectionAction::Miner, 1).unwrap()]);
    put(&chain, 60, vec![f.declare(2, &id("b"), ElectionAction::Committee, 1).unwrap()]);
    chain.extend_to(98).unwrap();
    for height in (11..60).chain(61..98) {
        chain.remove_block(height);
    }

    let b = builder(&chain);
    let roster = b.build_roster(98).unwrap();
    assert_eq!(roster.role_of(&id("a")), Some(ElectionAction::Miner));
    assert_eq!(roster.role_of(&id("b")), Some(ElectionAction::Committee));
    assert!(b.scanner().stats().get(BLOCKS_MISSING) > 0);
}

// ---------------------------------------------------------------------------
// 4. Signer recovery
// ---------------------------------------------------------------------------

#[test]
fn forged_declaration_is_skipped() {
    let chain = dev_chain();
    let f = factory();
    let mut forged = f.declare(3, &id("boot0"), ElectionAction::Exit, 0).unwrap();
    forged.signature = roster_types::Signature([0xAB; 64]);
    forged.hash = forged.compute_hash().unwrap();
    put(&chain, 12, vec![forged]);
    chain.extend_to(98).unwrap();

    let roster = builder(&chain).build_roster(98).unwrap();
    assert_eq!(roster.role_of(&id("boot0")), Some(ElectionAction::Committee));
}

#[test]
fn roster_records_computed_transaction_hash() {
    let chain = dev_chain();
    let f = factory();
    let declared = f.declare(6, &id("m"), ElectionAction::Miner, 10).unwrap();
    let expected = declared.compute_hash().unwrap();
    let mut rewritten = f.declare(7, &id("r"), ElectionAction::Miner, 10).unwrap();
    rewritten.hash = TxHash::new([0xEE; 32]);
    put(&chain, 30, vec![declared, rewritten]);
    chain.extend_to(98).unwrap();

    let roster = builder(&chain).build_roster(98).unwrap();
    let m = roster.miner_list.iter().find(|n| n.id == id("m")).unwrap();
    assert_eq!(m.tx_hash, expected);
    assert_eq!(roster.role_of(&id("r")), None);
}

#[test]
fn signer_scheme_follows_chain_head() {
    let config = ChainConfig {
        replay_protection_height: Some(150),
        ..ChainConfig::for_network(NetworkId::Dev)
    };
    let chain = Arc::new(NullChain::new(config));
    let legacy = ElectionTxFactory::new(Signer::Legacy);
    put(&chain, 20, vec![legacy.declare(1, &id("legacy"), ElectionAction::Miner, 1).unwrap()]);
    chain.extend_to(98).unwrap();
    let b = builder(&chain);

    assert_eq!(
        b.build_roster(98).unwrap().role_of(&id("legacy")),
        Some(ElectionAction::Miner)
    );

    // Same chain data, head moved past activation: the legacy signature no
    // longer recovers and the declaration drops out.
    chain.set_head(150);
    assert_eq!(b.build_roster(98).unwrap().role_of(&id("legacy")), None);
}

// ---------------------------------------------------------------------------
// 5. Determinism
// ---------------------------------------------------------------------------

#[test]
fn identical_chains_give_identical_rosters() {
    let chain = dev_chain();
    let f = factory();
    for (height, seed) in [(3u64, 1u8), (17, 2), (42, 3), (77, 4)] {
        let node = id(&format!("node{seed}"));
        put(&chain, height, vec![f.declare(seed, &node, ElectionAction::Both, 5).unwrap()]);
    }
    chain.extend_to(98).unwrap();

    let json = serde_json::to_string(&chain.snapshot()).unwrap();
    let copy = Arc::new(NullChain::from_json_str(&json).unwrap());
    assert_eq!(copy.current_height(), 98);

    let a = builder(&chain).build_roster(98).unwrap();
    let b = builder(&copy).build_roster(98).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.digest().unwrap(), b.digest().unwrap());
    assert_eq!(a, builder(&chain).build_roster(98).unwrap());
}

#[test]
fn broadcast_block_verification_end_to_end() {
    let chain = dev_chain();
    put(
        &chain,
        8,
        vec![factory().declare(9, &id("z"), ElectionAction::Committee, 3).unwrap()],
    );
    chain.extend_to(98).unwrap();
    let b = builder(&chain);
    put_broadcast(&chain, 100, b.build_roster(98).unwrap());

    let good = chain.block_by_number(100).unwrap();
    b.verify_broadcast_block(&good).unwrap();

    let mut tampered = good.clone();
    tampered.header.committee_list.retain(|n| n.id != id("z"));
    assert!(matches!(
        b.verify_broadcast_block(&tampered),
        Err(RosterError::Mismatch { height: 98, .. })
    ));
}
