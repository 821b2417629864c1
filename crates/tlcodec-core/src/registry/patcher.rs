use std::collections::BTreeMap;

use tracing::debug;

use super::error::{PatchSkipped, SkipReason};
use crate::object::ClassDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    Patched,
    /// The class was registered earlier; nothing changed.
    AlreadyPatched,
}

/// Collects the classes whose dictionary conversion gets fully-qualified tags.
#[derive(Debug, Default)]
pub struct Patcher {
    classes: BTreeMap<String, &'static ClassDescriptor>,
}

impl Patcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn patch(&mut self, class: &'static ClassDescriptor) -> Result<PatchOutcome, PatchSkipped> {
        let path = class.path();
        if !class.is_concrete() {
            return Err(PatchSkipped {
                path,
                reason: SkipReason::Abstract,
            });
        }
        match self.classes.get(&path) {
            Some(existing) if existing.is(class) => Ok(PatchOutcome::AlreadyPatched),
            Some(_) => Err(PatchSkipped {
                path,
                reason: SkipReason::PathConflict,
            }),
            None => {
                debug!(class = %path, "patched");
                self.classes.insert(path, class);
                Ok(PatchOutcome::Patched)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub(crate) fn into_classes(self) -> BTreeMap<String, &'static ClassDescriptor> {
        self.classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{ClassKind, Construction, TlClass, TlObject, no_subclasses};
    use crate::tl::types::{PeerUser, TypePeer};

    fn zero_peer() -> Box<dyn TlObject> {
        Box::new(PeerUser { user_id: 0 })
    }

    static IMPOSTOR: ClassDescriptor = ClassDescriptor {
        module: "tl.types",
        name: "PeerUser",
        kind: ClassKind::Concrete(Construction::Assign(zero_peer)),
        subclasses: no_subclasses,
    };

    #[test]
    fn patching_twice_is_a_no_op() {
        let mut patcher = Patcher::new();
        assert_eq!(patcher.patch(PeerUser::descriptor()), Ok(PatchOutcome::Patched));
        assert_eq!(
            patcher.patch(PeerUser::descriptor()),
            Ok(PatchOutcome::AlreadyPatched)
        );
        assert_eq!(patcher.len(), 1);
    }

    #[test]
    fn abstract_and_conflicting_classes_are_skipped() {
        let mut patcher = Patcher::new();
        let err = patcher.patch(TypePeer::descriptor()).unwrap_err();
        assert_eq!(err.reason, SkipReason::Abstract);

        patcher.patch(PeerUser::descriptor()).unwrap();
        let err = patcher.patch(&IMPOSTOR).unwrap_err();
        assert_eq!(err.reason, SkipReason::PathConflict);
        assert_eq!(err.path, "tl.types.PeerUser");
        assert_eq!(patcher.len(), 1);
    }
}
