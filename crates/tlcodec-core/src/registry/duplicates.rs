use std::collections::BTreeMap;

use crate::object::ClassDescriptor;

/// Groups classes by short name, keeping only names shared by more than one
/// fully-qualified path. Paths within a group are sorted.
pub fn duplicate_names<'a>(
    classes: impl IntoIterator<Item = &'a ClassDescriptor>,
) -> BTreeMap<String, Vec<String>> {
    let mut by_name: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for class in classes {
        by_name
            .entry(class.name.to_string())
            .or_default()
            .push(class.path());
    }
    by_name.retain(|_, paths| {
        paths.sort();
        paths.dedup();
        paths.len() > 1
    });
    by_name
}
