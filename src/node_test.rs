use super::*;

#[test]
fn test_node() {
    let mut node: Node<u32, u32> = Node::new(10, 200);
    assert!(node.links.is_red());
    assert!(node.links.left.is_external());
    assert!(node.links.right.is_external());
    assert!(node.links.parent.is_external());
    assert_eq!(node.key, 10);
    assert_eq!(node.value, 200);

    node.set_black();
    assert!(node.links.is_black());
    assert!(!node.links.is_red());
}

#[test]
fn test_sentinel() {
    let mut links = Links::sentinel();
    assert!(links.is_black());
    assert!(links.is_detached());

    links.parent = NodeId::from_index(3);
    assert!(!links.is_detached());
    links.parent = NodeId::NIL;
    links.color = Color::Red;
    assert!(!links.is_detached());
}

#[test]
fn test_node_id() {
    let id = NodeId::from_index(7);
    assert_eq!(id.to_index(), 7);
    assert!(id.is_internal());
    assert!(NodeId::NIL.is_external());
}

#[test]
#[should_panic(expected = "collides with sentinel")]
fn test_node_id_overflow() {
    NodeId::from_index(usize::MAX);
}
