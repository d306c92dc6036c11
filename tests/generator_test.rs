//! Tests for TreeGenerator and TreeParams

use rand::rngs::StdRng;
use rand::SeedableRng;
use rstest::rstest;

use treegen::domain::{DomainError, Tree, ROOT_NODE_NAME};
use treegen::{build_tree, TreeGenerator, TreeParams};

fn generate(seed: u64, node_count: i64, min_depth: i64, min_width: i64) -> Tree {
    treegen::util::testing::init_test_setup();
    TreeGenerator::seeded(seed)
        .build_tree(&TreeParams::new(node_count, min_depth, min_width))
        .unwrap()
}

/// True if some leaf ends a run of `length` nodes where every node above the leaf has one child.
fn has_chain_of(tree: &Tree, length: usize) -> bool {
    tree.leaf_nodes().into_iter().any(|leaf| {
        let mut chain = 1;
        let mut current = leaf;
        while chain < length {
            match tree.node(current).and_then(|node| node.parent()) {
                Some(parent) if tree.children_count(parent) == 1 => {
                    chain += 1;
                    current = parent;
                }
                _ => break,
            }
        }
        chain >= length
    })
}

// ============================================================
// TreeParams
// ============================================================

#[rstest]
#[case(5, 0, 0, 4)]
#[case(4, 2, 0, 1)]
#[case(3, 0, 5, 0)]
#[case(1, 0, 0, 0)]
#[case(0, 0, 0, 0)]
#[case(-5, 0, 0, 0)]
#[case(10, -3, -2, 9)]
#[case(i64::MAX, i64::MAX, 0, 0)]
fn given_params_when_fill_count_then_matches_formula(
    #[case] node_count: i64,
    #[case] min_depth: i64,
    #[case] min_width: i64,
    #[case] expected: usize,
) {
    let params = TreeParams::new(node_count, min_depth, min_width);
    assert_eq!(params.fill_count(), expected);
}

#[test]
fn given_negative_depth_and_width_when_clamped_then_zero_and_node_count_untouched() {
    let params = TreeParams::new(-7, -1, -2).clamped();

    assert_eq!(params, TreeParams::new(-7, 0, 0));
    assert_eq!(params.depth(), 0);
    assert_eq!(params.width(), 0);
    assert_eq!(params.expected_size(), 1);
}

#[rstest]
#[case(5, 0, 0, 5)]
#[case(4, 2, 0, 4)]
#[case(3, 0, 5, 6)]
#[case(1, 0, 0, 1)]
#[case(0, 3, 3, 7)]
fn given_params_when_expected_size_then_root_fill_depth_width(
    #[case] node_count: i64,
    #[case] min_depth: i64,
    #[case] min_width: i64,
    #[case] expected: usize,
) {
    assert_eq!(
        TreeParams::new(node_count, min_depth, min_width).expected_size(),
        expected
    );
}

// ============================================================
// Scenarios
// ============================================================

#[rstest]
fn given_only_node_count_when_building_then_exact_size(#[values(1, 2, 3, 42)] seed: u64) {
    let tree = generate(seed, 5, 0, 0);

    assert_eq!(tree.size(), 5);
    assert_eq!(tree.node(tree.root()).unwrap().name(), ROOT_NODE_NAME);
}

#[rstest]
fn given_min_depth_when_building_then_chain_below_anchor(#[values(1, 2, 3, 42)] seed: u64) {
    let tree = generate(seed, 4, 2, 0);

    assert_eq!(tree.size(), 4);
    assert!(tree.depth() >= 2);
    assert!(has_chain_of(&tree, 2));
}

#[rstest]
fn given_width_exceeding_node_count_when_building_then_root_fans_out(
    #[values(1, 2, 3, 42)] seed: u64,
) {
    let tree = generate(seed, 3, 0, 5);

    // nothing but the root exists when the wide branch picks its anchor
    assert_eq!(tree.size(), 6);
    assert_eq!(tree.children_count(tree.root()), 5);
    assert_eq!(tree.depth(), 1);
}

#[test]
fn given_single_node_when_building_then_root_only_and_non_root_pick_fails() {
    let tree = generate(5, 1, 0, 0);
    let mut rng = StdRng::seed_from_u64(5);

    assert_eq!(tree.size(), 1);
    assert!(matches!(
        tree.random_node(&mut rng, false),
        Err(DomainError::NotEnoughNodes { .. })
    ));
}

#[test]
fn given_negative_depth_and_width_when_building_then_treated_as_zero() {
    let tree = generate(9, 3, -1, -4);
    assert_eq!(tree.size(), 3);
}

#[test]
fn given_negative_node_count_when_building_then_branches_only() {
    let tree = generate(9, -10, 3, 0);

    assert_eq!(tree.size(), 4);
    assert_eq!(tree.depth(), 3);
    assert!(has_chain_of(&tree, 3));
}

#[test]
fn given_depth_only_when_building_then_single_chain_from_root() {
    let tree = generate(3, 0, 4, 0);
    let names = tree.names(&tree.to_list());

    assert_eq!(
        names,
        vec!["ROOT", "ROOT-1", "ROOT-1-1", "ROOT-1-1-1", "ROOT-1-1-1-1"]
    );
}

// ============================================================
// Determinism
// ============================================================

#[test]
fn given_same_seed_when_building_twice_then_identical_trees() {
    let first = generate(1234, 40, 5, 6);
    let second = generate(1234, 40, 5, 6);

    assert_eq!(
        first.names(&first.to_list()),
        second.names(&second.to_list())
    );
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn given_injected_rng_when_building_then_same_as_seeded() {
    let params = TreeParams::new(25, 3, 3);
    let injected = TreeGenerator::new(StdRng::seed_from_u64(77))
        .build_tree(&params)
        .unwrap();
    let seeded = TreeGenerator::seeded(77).build_tree(&params).unwrap();

    assert_eq!(injected.to_string(), seeded.to_string());
}

#[test]
fn given_one_generator_when_building_repeatedly_then_rng_state_carries_over() {
    let mut generator = TreeGenerator::seeded(3);
    let params = TreeParams::new(30, 0, 0);
    let trees: Vec<Tree> = (0..5)
        .map(|_| generator.build_tree(&params).unwrap())
        .collect();

    assert!(trees.iter().all(|tree| tree.size() == 30));
    assert!(trees.windows(2).any(|w| w[0].to_string() != w[1].to_string()));
}

#[test]
fn given_entropy_when_build_tree_then_invariants_hold() {
    let tree = build_tree(12, 2, 3).unwrap();
    assert_eq!(tree.size(), 12);
}

// ============================================================
// Invariants over many shapes
// ============================================================

#[rstest]
fn given_generated_tree_when_checking_invariants_then_all_hold(
    #[values(0, 1, 17, 99, 2024)] seed: u64,
    #[values((1, 0, 0), (10, 0, 0), (10, 3, 0), (10, 0, 4), (20, 5, 5), (3, 4, 6), (50, 10, 2))]
    shape: (i64, i64, i64),
) {
    let (node_count, min_depth, min_width) = shape;
    let params = TreeParams::new(node_count, min_depth, min_width);
    let tree = generate(seed, node_count, min_depth, min_width);
    let nodes = tree.to_list();

    // size formula, root first
    assert_eq!(tree.size(), params.expected_size());
    assert_eq!(nodes[0], tree.root());

    for (idx, node) in tree.iter() {
        // levels and naming
        if let Some(parent_idx) = node.parent() {
            let parent = tree.node(parent_idx).unwrap();
            assert_eq!(node.level(), parent.level() + 1);
            let position = parent.children().iter().position(|&c| c == idx).unwrap();
            assert_eq!(node.name(), format!("{}-{}", parent.name(), position + 1));
            assert_eq!(
                parent.children().iter().filter(|&&c| c == idx).count(),
                1,
                "listed exactly once under its parent"
            );
        } else {
            assert_eq!(idx, tree.root());
        }

        // path and subtree shape
        let path = tree.path(idx);
        assert_eq!(path.len(), node.level());
        if !path.is_empty() {
            assert_eq!(path.last(), Some(&tree.root()));
        }
        let subtree = tree.subtree(idx);
        let unique: std::collections::HashSet<_> = subtree.iter().collect();
        assert_eq!(unique.len(), subtree.len());
        assert_eq!(subtree.len(), tree.to_list_from(idx).len() - 1);
    }

    // depth and width guarantees
    let deepest_level = tree.node(tree.deepest_node()).unwrap().level();
    assert!(tree.iter().all(|(_, node)| node.level() <= deepest_level));
    assert!(deepest_level >= params.depth());
    if params.width() > 0 {
        assert!(nodes
            .iter()
            .any(|&idx| tree.children_count(idx) >= params.width()));
    }
}
