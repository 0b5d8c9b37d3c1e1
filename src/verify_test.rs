use super::*;

use crate::node::{Color, NodeId};

fn fatal(res: Result<Stats>) -> String {
    match res {
        Err(Error::Fatal(_, msg)) => msg,
        Err(err) => panic!("unexpected err {}", err),
        Ok(ss) => panic!("unexpected ok {:?}", ss),
    }
}

fn sample() -> RBTree<u32, u32> {
    // 15 entries, perfect tree, leaves are red.
    RBTree::from_sorted((0..15).map(|i| (i * 10, i))).unwrap()
}

#[test]
fn test_validate_ok() {
    let index = sample();
    let ss = index.validate().unwrap();
    assert_eq!(
        ss,
        Stats {
            n_count: 15,
            blacks: 3,
            depth: 4
        }
    );
    assert_eq!(index.verify(), (true, 4));

    let index: RBTree<u32, u32> = RBTree::new();
    assert_eq!(index.validate().unwrap(), Stats::default());
    assert_eq!(index.max_depth(), 0);
}

#[test]
fn test_validate_red_root() {
    let mut index = sample();
    let root = index.root;
    index.set_color(root, Color::Red);
    assert!(fatal(index.validate()).contains("root"));
    assert_eq!(index.verify(), (false, 4));
}

#[test]
fn test_validate_consecutive_reds() {
    let mut index = sample();
    let leaf = index.find_node(&0_u32);
    let parent = index.parent(leaf);
    index.set_color(parent, Color::Red);
    let msg = fatal(index.validate());
    assert!(msg.contains("consecutive reds") || msg.contains("unbalanced"), "{}", msg);
}

#[test]
fn test_validate_unbalanced_blacks() {
    let mut index = sample();
    let leaf = index.find_node(&140_u32);
    index.set_color(leaf, Color::Black);
    assert!(fatal(index.validate()).contains("unbalanced blacks"));
}

#[test]
fn test_validate_sentinel() {
    let mut index = sample();
    index.nil.parent = index.root;
    assert!(fatal(index.validate()).contains("sentinel"));

    let mut index = sample();
    index.nil.color = Color::Red;
    assert!(fatal(index.validate()).contains("sentinel"));
}

#[test]
fn test_validate_sort() {
    let mut index = sample();
    let id = index.find_node(&70_u32);
    index.nodes[id.to_index()].key = 200;
    assert!(fatal(index.validate()).contains("sort"));

    // deep violation, invisible to a parent/child comparison.
    let mut index = sample();
    let id = index.find_node(&60_u32);
    index.nodes[id.to_index()].key = 75;
    assert!(fatal(index.validate()).contains("sort"));
}

#[test]
fn test_validate_parent_link() {
    let mut index = sample();
    let leaf = index.find_node(&0_u32);
    index.nodes[leaf.to_index()].links.parent = NodeId::NIL;
    assert!(fatal(index.validate()).contains("parent link"));
}
