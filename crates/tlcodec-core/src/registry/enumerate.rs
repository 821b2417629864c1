use std::collections::HashSet;

use crate::object::ClassDescriptor;

/// Every concrete class reachable from `root` through `subclasses`.
///
/// Abstract nodes are walked but not returned. Each class appears once, even
/// when several parents list it; distinct classes sharing a name are all kept.
pub fn enumerate_classes(root: &'static ClassDescriptor) -> Vec<&'static ClassDescriptor> {
    let mut seen: HashSet<*const ClassDescriptor> = HashSet::new();
    let mut stack = vec![root];
    let mut classes = Vec::new();

    while let Some(class) = stack.pop() {
        if !seen.insert(class as *const ClassDescriptor) {
            continue;
        }
        if class.is_concrete() {
            classes.push(class);
        }
        let mut children = (class.subclasses)();
        children.reverse();
        stack.extend(children);
    }
    classes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{ClassKind, Construction, TlClass, TlObject, no_subclasses};
    use crate::tl::types::{PeerChannel, PeerChat, PeerUser, TypePeer};

    fn zero_peer() -> Box<dyn TlObject> {
        Box::new(PeerUser { user_id: 0 })
    }

    fn twice() -> Vec<&'static ClassDescriptor> {
        vec![TypePeer::descriptor(), PeerUser::descriptor(), PeerUser::descriptor()]
    }

    static ROOT: ClassDescriptor = ClassDescriptor {
        module: "test",
        name: "Root",
        kind: ClassKind::Abstract,
        subclasses: twice,
    };

    static LEAF: ClassDescriptor = ClassDescriptor {
        module: "test",
        name: "Leaf",
        kind: ClassKind::Concrete(Construction::Assign(zero_peer)),
        subclasses: no_subclasses,
    };

    #[test]
    fn walks_abstract_nodes_and_keeps_concrete_leaves() {
        let classes = enumerate_classes(TypePeer::descriptor());
        let paths: Vec<_> = classes.iter().map(|c| c.path()).collect();
        assert_eq!(
            paths,
            vec!["tl.types.PeerUser", "tl.types.PeerChat", "tl.types.PeerChannel"]
        );
        assert!(classes[2].is(PeerChannel::descriptor()));
        assert!(classes[1].is(PeerChat::descriptor()));
    }

    #[test]
    fn classes_listed_twice_are_returned_once() {
        let classes = enumerate_classes(&ROOT);
        assert_eq!(classes.len(), 3);
    }

    #[test]
    fn concrete_root_is_returned() {
        let classes = enumerate_classes(&LEAF);
        assert_eq!(classes.len(), 1);
        assert!(classes[0].is(&LEAF));
    }
}
