//! Structural properties of the forest: create, delete, move, list

use rstest::{fixture, rstest};

use vdirs::domain::{DirPath, DomainError, Forest};
use vdirs::util::testing::{self, forest_from_paths, listing};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn segments(path: &str) -> Vec<String> {
    DirPath::parse(path).unwrap().segments().to_vec()
}

/// Every child sits exactly one level below its parent.
fn assert_depths_consistent(forest: &Forest) {
    let mut stack: Vec<_> = forest.roots().to_vec();
    for &root in forest.roots() {
        assert_eq!(forest.get(root).unwrap().depth, 0);
    }
    while let Some(idx) = stack.pop() {
        let node = forest.get(idx).unwrap();
        for &child in &node.children {
            let child_node = forest.get(child).unwrap();
            assert_eq!(child_node.depth, node.depth + 1, "depth of {}", child_node);
            assert_eq!(child_node.parent, Some(idx));
            stack.push(child);
        }
    }
}

#[fixture]
fn produce() -> Forest {
    forest_from_paths(&[
        "fruits/apples/fuji",
        "fruits/apples/gala",
        "fruits/pears",
        "vegetables/root/carrot",
    ])
}

// ============================================================
// Create
// ============================================================

#[rstest]
fn given_existing_path_when_creating_again_then_tree_unchanged(mut produce: Forest) {
    let before = listing(&produce);
    let count = produce.len();

    produce.create_path(&segments("fruits/apples/fuji")).unwrap();
    produce.create_path(&segments("fruits/apples")).unwrap();

    assert_eq!(listing(&produce), before);
    assert_eq!(produce.len(), count);
}

#[rstest]
fn given_partial_path_when_creating_then_only_missing_part_added(mut produce: Forest) {
    produce
        .create_path(&segments("fruits/apples/honeycrisp/organic"))
        .unwrap();

    assert_eq!(produce.len(), 10);
    let idx = produce
        .resolve(&segments("fruits/apples/honeycrisp/organic"))
        .unwrap();
    assert_eq!(produce.get(idx).unwrap().depth, 3);
    assert_depths_consistent(&produce);
}

// ============================================================
// Delete
// ============================================================

#[rstest]
fn given_subtree_when_deleting_then_removes_descendants_only(mut produce: Forest) {
    let removed = produce.delete_path(&segments("fruits/apples")).unwrap();

    assert_eq!(removed, 3);
    assert_eq!(
        listing(&produce),
        vec!["fruits", "  pears", "vegetables", "  root", "    carrot"]
    );
    assert!(produce.resolve(&segments("fruits/apples/fuji")).is_none());
}

#[rstest]
fn given_root_when_deleting_then_leaves_root_set(mut produce: Forest) {
    produce.delete_path(&segments("vegetables")).unwrap();

    assert_eq!(produce.roots().len(), 1);
    assert!(produce.find_root_by_name("vegetables").is_none());
    assert_eq!(produce.len(), 5);
}

#[rstest]
fn given_missing_path_when_deleting_then_path_not_found_and_unchanged(mut produce: Forest) {
    let before = listing(&produce);

    let err = produce
        .delete_path(&segments("fruits/kiwis/gold"))
        .unwrap_err();

    assert!(err.is_warning());
    assert!(matches!(
        err,
        DomainError::PathNotFound { ref segment, position: 2, .. } if segment == "kiwis"
    ));
    assert_eq!(listing(&produce), before);
}

#[test]
fn given_deleted_then_recreated_when_listing_then_fresh_empty_directory() {
    let mut forest = forest_from_paths(&["a/b/c"]);
    forest.delete_path(&segments("a/b")).unwrap();
    forest.create_path(&segments("a/b")).unwrap();

    assert_eq!(listing(&forest), vec!["a", "  b"]);
}

#[test]
fn given_very_deep_chain_when_deleting_root_then_forest_empty() {
    let mut forest = Forest::new();
    let chain = vec!["d"; 100_000];
    forest.create_path(&chain).unwrap();
    assert_eq!(forest.len(), chain.len());

    let removed = forest.delete_path(&["d"]).unwrap();

    assert_eq!(removed, chain.len());
    assert_eq!(forest.len(), 0);
    assert!(forest.is_empty());
    assert_eq!(forest.list_all().count(), 0);
}

// ============================================================
// Move
// ============================================================

#[rstest]
fn given_nested_subtree_when_moving_to_root_then_depths_updated(mut produce: Forest) {
    produce
        .move_path(&segments("vegetables/root"), &segments("fruits"))
        .unwrap();

    assert_eq!(
        listing(&produce),
        vec![
            "fruits",
            "  apples",
            "    fuji",
            "    gala",
            "  pears",
            "  root",
            "    carrot",
            "vegetables",
        ]
    );
    assert_depths_consistent(&produce);
}

#[rstest]
fn given_root_when_moving_under_other_root_then_leaves_root_set(mut produce: Forest) {
    produce
        .move_path(&segments("vegetables"), &segments("fruits/pears"))
        .unwrap();

    assert_eq!(produce.roots().len(), 1);
    let carrot = produce
        .resolve(&segments("fruits/pears/vegetables/root/carrot"))
        .unwrap();
    assert_eq!(produce.get(carrot).unwrap().depth, 4);
    assert_depths_consistent(&produce);
}

#[rstest]
#[case("fruits", "fruits")]
#[case("fruits", "fruits/apples")]
#[case("fruits", "fruits/apples/fuji")]
#[case("fruits/apples", "fruits/apples/gala")]
fn given_destination_inside_source_when_moving_then_rejected(
    mut produce: Forest,
    #[case] source: &str,
    #[case] destination: &str,
) {
    let before = listing(&produce);

    let err = produce
        .move_path(&segments(source), &segments(destination))
        .unwrap_err();

    assert!(matches!(err, DomainError::MoveIntoSubtree { .. }));
    assert!(err.is_warning());
    assert_eq!(listing(&produce), before);
}

#[test]
fn given_sibling_sharing_name_prefix_when_moving_then_allowed() {
    let mut forest = forest_from_paths(&["a/b", "a/bc"]);

    forest.move_path(&segments("a/b"), &segments("a/bc")).unwrap();

    assert_eq!(listing(&forest), vec!["a", "  bc", "    b"]);
}

#[rstest]
#[case("nowhere", "fruits")]
#[case("fruits/pears", "nowhere/else")]
fn given_unresolvable_path_when_moving_then_path_not_found(
    mut produce: Forest,
    #[case] source: &str,
    #[case] destination: &str,
) {
    let before = listing(&produce);

    let err = produce
        .move_path(&segments(source), &segments(destination))
        .unwrap_err();

    assert!(matches!(err, DomainError::PathNotFound { .. }));
    assert_eq!(listing(&produce), before);
}

#[test]
fn given_name_taken_at_destination_when_moving_root_then_unchanged() {
    let mut forest = forest_from_paths(&["x", "y/x"]);
    let before = listing(&forest);

    let err = forest
        .move_path(&segments("x"), &segments("y"))
        .unwrap_err();

    assert_eq!(
        err,
        DomainError::DuplicateName {
            name: "x".to_string()
        }
    );
    assert_eq!(listing(&forest), before);
    assert!(forest.find_root_by_name("x").is_some());
}

// ============================================================
// List
// ============================================================

#[test]
fn given_reverse_insertion_order_when_listing_then_lexicographic_everywhere() {
    let forest = forest_from_paths(&["c/z", "c/y", "c/x/2", "c/x/1", "b", "a"]);

    assert_eq!(
        listing(&forest),
        vec!["a", "b", "c", "  x", "    1", "    2", "  y", "  z"]
    );
}

#[test]
fn given_forest_when_listing_twice_then_same_output() {
    let forest = forest_from_paths(&["b/a", "a/b"]);
    let first: Vec<String> = listing(&forest);
    let second: Vec<String> = listing(&forest);
    assert_eq!(first, second);
}

#[test]
fn given_uppercase_names_when_listing_then_byte_order() {
    let forest = forest_from_paths(&["beta", "Alpha", "alpha"]);
    assert_eq!(listing(&forest), vec!["Alpha", "alpha", "beta"]);
}
