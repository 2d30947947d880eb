use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Options for [`crate::DeadBindingPruner`].
///
/// Deserialises from camelCase keys, every key optional:
///
/// ```json
/// { "retainedNames": ["React", "jsx"], "retainUnderscorePrefixed": true }
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PruneConfig {
  /// Names that always count as referenced, whatever scope declares them.
  pub retained_names: HashSet<String>,
  /// Treat `_`-prefixed names as intentionally unused and keep them.
  pub retain_underscore_prefixed: bool,
  /// Keep dead object properties that have a `...rest` sibling. Removing such a property would
  /// make the rest object collect it.
  pub preserve_rest_siblings: bool,
}

impl PruneConfig {
  pub(crate) fn retains(&self, name: &str) -> bool {
    (self.retain_underscore_prefixed && name.starts_with('_')) || self.retained_names.contains(name)
  }
}
