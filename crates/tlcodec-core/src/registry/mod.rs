//! Class registry: the explicit replacement for patching every class's
//! dictionary conversion at runtime.
//!
//! The registry is built once from the class tree (plus an explicit list of
//! classes outside it) and is immutable afterwards. As a [`DictConverter`] it
//! calls each object's own conversion and overwrites the `"_"` tag with the
//! fully-qualified class path, so every nested record is unambiguous. Objects
//! of classes outside the registry are refused; only [`crate::LibraryConverter`]
//! still writes short tags.

mod duplicates;
mod enumerate;
pub mod error;
mod patcher;

use std::collections::BTreeMap;
use std::sync::OnceLock;

use tracing::{info, warn};

pub use duplicates::duplicate_names;
pub use enumerate::enumerate_classes;
pub use error::{PatchSkipped, SkipReason};
pub use patcher::{PatchOutcome, Patcher};

use crate::codec::{DecodeError, EncodeError};
use crate::object::{ClassDescriptor, DictConverter, TlObject};
use crate::tl;
use crate::value::Record;

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Builds the process-wide registry on first call; later calls return it
/// unchanged.
pub fn patch_classes() -> &'static Registry {
    REGISTRY.get_or_init(|| Registry::build(tl::root(), &tl::non_registry_classes()))
}

/// The process-wide registry, if [`patch_classes`] already ran.
pub fn patched_registry() -> Option<&'static Registry> {
    REGISTRY.get()
}

/// Counters of one registry build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchSummary {
    /// Classes reached from the root of the class tree.
    pub from_root: usize,
    /// Classes patched from the explicit list only.
    pub explicit: usize,
    pub skipped: Vec<PatchSkipped>,
}

impl PatchSummary {
    pub fn total(&self) -> usize {
        self.from_root + self.explicit
    }
}

/// Immutable map from fully-qualified class path to class.
#[derive(Debug)]
pub struct Registry {
    classes: BTreeMap<String, &'static ClassDescriptor>,
    summary: PatchSummary,
}

impl Registry {
    /// Patches every class reachable from `root`, then `extra`.
    ///
    /// Classes that cannot be patched are logged and skipped.
    pub fn build(root: &'static ClassDescriptor, extra: &[&'static ClassDescriptor]) -> Self {
        let mut patcher = Patcher::new();
        let mut skipped = Vec::new();

        for class in enumerate_classes(root) {
            patch_or_skip(&mut patcher, class, &mut skipped);
        }
        let from_root = patcher.len();

        for &class in extra {
            patch_or_skip(&mut patcher, class, &mut skipped);
        }
        let explicit = patcher.len() - from_root;

        let summary = PatchSummary {
            from_root,
            explicit,
            skipped,
        };
        info!(
            total = summary.total(),
            from_root = summary.from_root,
            explicit = summary.explicit,
            skipped = summary.skipped.len(),
            "classes patched"
        );

        Self {
            classes: patcher.into_classes(),
            summary,
        }
    }

    pub fn summary(&self) -> &PatchSummary {
        &self.summary
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Patched classes in path order.
    pub fn classes(&self) -> impl Iterator<Item = &'static ClassDescriptor> + '_ {
        self.classes.values().copied()
    }

    pub fn is_patched(&self, class: &ClassDescriptor) -> bool {
        self.classes
            .get(&class.path())
            .is_some_and(|patched| patched.is(class))
    }

    /// Looks up a class by its fully-qualified path.
    pub fn resolve(&self, path: &str) -> Result<&'static ClassDescriptor, DecodeError> {
        self.classes
            .get(path)
            .copied()
            .ok_or_else(|| DecodeError::UnresolvableClassPath(path.to_string()))
    }

    /// Logs and returns every short name shared by several patched classes.
    pub fn report_duplicates(&self) -> BTreeMap<String, Vec<String>> {
        let report = duplicate_names(self.classes());
        for (name, paths) in &report {
            info!("{} [{}]: {}", name, paths.len(), paths.join(", "));
        }
        info!("duplicate class names: {}", report.len());
        report
    }
}

impl DictConverter for Registry {
    fn convert(&self, obj: &dyn TlObject) -> Result<Record, EncodeError> {
        let class = obj.class();
        if !self.is_patched(class) {
            return Err(EncodeError::Unregistered {
                class: class.path(),
            });
        }
        let mut record = obj.to_dict(self)?;
        match record.tag() {
            Some(tag) if tag == class.name => {}
            other => {
                return Err(EncodeError::NameMismatch {
                    dump: other.unwrap_or_default().to_string(),
                    class: class.name.to_string(),
                });
            }
        }
        record.set_tag(class.path());
        Ok(record)
    }
}

fn patch_or_skip(
    patcher: &mut Patcher,
    class: &'static ClassDescriptor,
    skipped: &mut Vec<PatchSkipped>,
) {
    if let Err(err) = patcher.patch(class) {
        warn!(class = %err.path, reason = %err.reason, "class skipped");
        skipped.push(err);
    }
}
