//! Partitioning of parameter instances by owning profile.

use super::{ParameterInstance, ProfileName};
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Parameter instances grouped by the name of the profile that owns them.
///
/// Each instance lands in exactly one group, keyed by its own profile name.
/// Groups iterate in profile-name order; instances keep their load order
/// within a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileParameterSets {
    groups: BTreeMap<ProfileName, Vec<ParameterInstance>>,
}

impl ProfileParameterSets {
    /// Groups instances in a single pass.
    #[must_use]
    pub fn from_instances(instances: impl IntoIterator<Item = ParameterInstance>) -> Self {
        let mut groups: BTreeMap<ProfileName, Vec<ParameterInstance>> = BTreeMap::new();
        for instance in instances {
            groups
                .entry(instance.profile_name().clone())
                .or_default()
                .push(instance);
        }
        Self { groups }
    }

    /// Returns the number of profile groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` when no profile has any parameter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the instances for a profile, if it has a group.
    #[must_use]
    pub fn get(&self, profile: &ProfileName) -> Option<&[ParameterInstance]> {
        self.groups.get(profile).map(Vec::as_slice)
    }

    /// Returns the grouped profile names in iteration order.
    pub fn profile_names(&self) -> impl Iterator<Item = &ProfileName> {
        self.groups.keys()
    }

    /// Iterates over `(profile, instances)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&ProfileName, &[ParameterInstance])> {
        self.groups
            .iter()
            .map(|(name, instances)| (name, instances.as_slice()))
    }
}

impl IntoIterator for ProfileParameterSets {
    type Item = (ProfileName, Vec<ParameterInstance>);
    type IntoIter = btree_map::IntoIter<ProfileName, Vec<ParameterInstance>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}
