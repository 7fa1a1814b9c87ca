use std::{io, path::Path};

use chrono::{DateTime, Utc};

use crate::{
    domain::{CrudFlag, DemandProfile},
    storage::{DynamicDemandSetData, LoadError, document},
};

/// A set of per-link demand profiles produced by a traffic estimation run.
///
/// Unlike a hand-crafted demand set, a dynamic demand set comes from the
/// estimation engine. It records the run that produced it
/// ([`app_run_id`](Self::app_run_id)) and the simulation time at which it was
/// produced ([`estimation_timestamp`](Self::estimation_timestamp)).
///
/// The record wraps its raw [`DynamicDemandSetData`] and normalises absent
/// values on read: the name reads as an empty string, the CRUD flag as
/// [`CrudFlag::None`] and the profile list as empty. No accessor fails.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicDemandSet {
    data: DynamicDemandSetData,
}

impl DynamicDemandSet {
    /// Creates a demand set with the given identifier and name.
    ///
    /// All other fields are left unset.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        let mut set = Self::default();
        set.set_id(id);
        set.set_name(name);
        set
    }

    /// The raw storage backing this record.
    #[must_use]
    pub const fn data(&self) -> &DynamicDemandSetData {
        &self.data
    }

    /// Consumes the record, returning its raw storage.
    #[must_use]
    pub fn into_data(self) -> DynamicDemandSetData {
        self.data
    }

    /// The externally assigned identifier.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.data.id
    }

    /// Sets the identifier.
    pub const fn set_id(&mut self, id: i64) {
        self.data.id = id;
    }

    /// The name of the set, or an empty string if it has none.
    #[must_use]
    pub fn name(&self) -> &str {
        self.data.name.as_deref().unwrap_or_default()
    }

    /// Sets the name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.data.name = Some(name.into());
    }

    /// The description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.data.description.as_deref()
    }

    /// Sets or clears the description.
    pub fn set_description(&mut self, description: Option<String>) {
        self.data.description = description;
    }

    /// The modification stamp, if one has been assigned.
    #[must_use]
    pub fn mod_stamp(&self) -> Option<&str> {
        self.data.mod_stamp.as_deref()
    }

    /// Sets or clears the modification stamp.
    pub fn set_mod_stamp(&mut self, mod_stamp: Option<String>) {
        self.data.mod_stamp = mod_stamp;
    }

    /// Whether the set is locked against editing.
    #[must_use]
    pub const fn is_locked_for_edit(&self) -> bool {
        self.data.locked_for_edit
    }

    /// Locks or unlocks the set for editing.
    pub const fn set_locked_for_edit(&mut self, locked: bool) {
        self.data.locked_for_edit = locked;
    }

    /// Whether the set is locked against history changes.
    #[must_use]
    pub const fn is_locked_for_history(&self) -> bool {
        self.data.locked_for_history
    }

    /// Locks or unlocks the set for history changes.
    pub const fn set_locked_for_history(&mut self, locked: bool) {
        self.data.locked_for_history = locked;
    }

    /// The identifier of the estimation run that produced this set.
    #[must_use]
    pub const fn app_run_id(&self) -> i64 {
        self.data.app_run_id
    }

    /// Sets the originating estimation run.
    pub const fn set_app_run_id(&mut self, app_run_id: i64) {
        self.data.app_run_id = app_run_id;
    }

    /// The simulation time at which the run produced this set.
    #[must_use]
    pub const fn estimation_timestamp(&self) -> Option<DateTime<Utc>> {
        self.data.estimation_timestamp
    }

    /// Sets or clears the estimation timestamp.
    pub const fn set_estimation_timestamp(&mut self, timestamp: Option<DateTime<Utc>>) {
        self.data.estimation_timestamp = timestamp;
    }

    /// The CRUD action flag.
    ///
    /// Stored text that is not one of the action keywords reads as
    /// [`CrudFlag::None`].
    ///
    /// This read takes `&mut self`: if no flag is stored at all, `"NONE"` is
    /// written to the storage before returning, so the default becomes
    /// explicit.
    pub fn crud_flag(&mut self) -> CrudFlag {
        let Some(stored) = self.data.crud_flag.as_deref() else {
            self.set_crud_flag(CrudFlag::None);
            return CrudFlag::None;
        };

        let flag = CrudFlag::from_stored(Some(stored));
        if flag == CrudFlag::None && stored != CrudFlag::None.as_str() {
            tracing::debug!(
                "Demand set {} has unrecognised CRUD flag '{stored}', reading as NONE",
                self.data.id
            );
        }
        flag
    }

    /// Sets the CRUD action flag.
    ///
    /// Passing `None` stores [`CrudFlag::None`].
    pub fn set_crud_flag(&mut self, flag: impl Into<Option<CrudFlag>>) {
        let flag = flag.into().unwrap_or_default();
        self.data.crud_flag = Some(flag.as_str().to_string());
    }

    /// The demand profiles, in insertion order.
    ///
    /// Returns an empty slice if the set has no profile list yet. This does
    /// not create one; see [`profiles_mut`](Self::profiles_mut).
    #[must_use]
    pub fn profiles(&self) -> &[DemandProfile] {
        self.data.profiles.as_deref().unwrap_or_default()
    }

    /// The live profile list.
    ///
    /// Creates an empty list first if there is none. Changes made through the
    /// returned reference are changes to the set itself.
    pub fn profiles_mut(&mut self) -> &mut Vec<DemandProfile> {
        self.data.profiles.get_or_insert_with(Vec::new)
    }

    /// Replaces the profiles with the given ones, preserving their order.
    ///
    /// The existing list is cleared and refilled in place rather than swapped
    /// out. Link identifiers need not be unique.
    pub fn set_profiles(&mut self, profiles: impl IntoIterator<Item = DemandProfile>) {
        let list = self.profiles_mut();
        list.clear();
        list.extend(profiles);
    }

    /// Finds the profile for a link.
    ///
    /// When several profiles share the link, the first in insertion order is
    /// returned.
    ///
    /// ```
    /// use demandset::{DemandProfile, DynamicDemandSet};
    ///
    /// let mut set = DynamicDemandSet::new(1, "morning peak");
    /// set.set_profiles([
    ///     DemandProfile::new(10),
    ///     DemandProfile::new(20).with_knob(2.0),
    ///     DemandProfile::new(20),
    /// ]);
    ///
    /// assert_eq!(set.profile_at_link(20).map(|p| p.knob), Some(2.0));
    /// assert!(set.profile_at_link(30).is_none());
    /// ```
    #[must_use]
    pub fn profile_at_link(&self, link_id: i64) -> Option<&DemandProfile> {
        self.profiles().iter().find(|p| p.link_id == link_id)
    }

    /// Finds the profile for a link, mutably.
    ///
    /// Same matching rule as [`profile_at_link`](Self::profile_at_link).
    pub fn profile_at_link_mut(&mut self, link_id: i64) -> Option<&mut DemandProfile> {
        self.data
            .profiles
            .as_mut()?
            .iter_mut()
            .find(|p| p.link_id == link_id)
    }

    /// Link identifiers that appear on more than one profile.
    ///
    /// Each identifier is listed once, in the order its second occurrence is
    /// encountered.
    #[must_use]
    pub fn duplicate_link_ids(&self) -> Vec<i64> {
        let profiles = self.profiles();
        let mut duplicates = Vec::new();
        for (i, profile) in profiles.iter().enumerate() {
            let link_id = profile.link_id;
            let seen_before = profiles[..i].iter().any(|p| p.link_id == link_id);
            if seen_before && !duplicates.contains(&link_id) {
                duplicates.push(link_id);
            }
        }
        duplicates
    }

    /// Checks that all required fields are set.
    ///
    /// No rules are enforced yet, so every set is valid.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        true
    }

    /// Loads a demand set from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be read, or is not
    /// a valid demand set document.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        document::load(path).map(Self::from)
    }

    /// Saves the demand set as a YAML document.
    ///
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        document::save(&self.data, path)
    }
}

impl From<DynamicDemandSetData> for DynamicDemandSet {
    fn from(data: DynamicDemandSetData) -> Self {
        Self { data }
    }
}

impl From<DynamicDemandSet> for DynamicDemandSetData {
    fn from(set: DynamicDemandSet) -> Self {
        set.data
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn profile(link_id: i64, knob: f64) -> DemandProfile {
        DemandProfile::new(link_id).with_knob(knob)
    }

    #[test]
    fn unset_name_reads_as_empty() {
        let set = DynamicDemandSet::default();
        assert_eq!(set.data().name, None);
        assert_eq!(set.name(), "");
    }

    #[test]
    fn set_name_reads_back_exactly() {
        let mut set = DynamicDemandSet::default();
        set.set_name("  AM peak ");
        assert_eq!(set.name(), "  AM peak ");
        set.set_name("");
        assert_eq!(set.data().name.as_deref(), Some(""));
    }

    #[test]
    fn scalar_fields_are_stored_verbatim() {
        let timestamp = Utc.with_ymd_and_hms(2013, 2, 1, 7, 30, 0).unwrap();
        let mut set = DynamicDemandSet::new(-5, "set");
        set.set_description(Some("from run 9".to_string()));
        set.set_mod_stamp(Some("stamp".to_string()));
        set.set_locked_for_edit(true);
        set.set_locked_for_history(true);
        set.set_app_run_id(9);
        set.set_estimation_timestamp(Some(timestamp));

        assert_eq!(set.id(), -5);
        assert_eq!(set.description(), Some("from run 9"));
        assert_eq!(set.mod_stamp(), Some("stamp"));
        assert!(set.is_locked_for_edit());
        assert!(set.is_locked_for_history());
        assert_eq!(set.app_run_id(), 9);
        assert_eq!(set.estimation_timestamp(), Some(timestamp));

        set.set_description(None);
        set.set_mod_stamp(None);
        set.set_estimation_timestamp(None);
        set.set_locked_for_edit(false);
        assert_eq!(set.description(), None);
        assert_eq!(set.mod_stamp(), None);
        assert_eq!(set.estimation_timestamp(), None);
        assert!(!set.is_locked_for_edit());
    }

    #[test]
    fn crud_flag_round_trips() {
        let mut set = DynamicDemandSet::default();
        for flag in [
            CrudFlag::Create,
            CrudFlag::Retrieve,
            CrudFlag::Update,
            CrudFlag::Delete,
        ] {
            set.set_crud_flag(flag);
            assert_eq!(set.crud_flag(), flag);
        }
    }

    #[test]
    fn setting_no_crud_flag_stores_none() {
        let mut set = DynamicDemandSet::default();
        set.set_crud_flag(CrudFlag::Delete);
        set.set_crud_flag(None);
        assert_eq!(set.data().crud_flag.as_deref(), Some("NONE"));
        assert_eq!(set.crud_flag(), CrudFlag::None);
    }

    #[test]
    fn reading_absent_crud_flag_materialises_none() {
        let mut set = DynamicDemandSet::default();
        assert_eq!(set.data().crud_flag, None);

        assert_eq!(set.crud_flag(), CrudFlag::None);
        assert_eq!(set.data().crud_flag.as_deref(), Some("NONE"));
    }

    #[test]
    fn unrecognised_crud_text_reads_as_none_without_rewrite() {
        let mut set = DynamicDemandSet::from(DynamicDemandSetData {
            crud_flag: Some("MERGE".to_string()),
            ..DynamicDemandSetData::default()
        });
        assert_eq!(set.crud_flag(), CrudFlag::None);
        assert_eq!(set.data().crud_flag.as_deref(), Some("MERGE"));
    }

    #[test]
    fn fresh_set_has_empty_profiles() {
        let mut set = DynamicDemandSet::default();
        assert!(set.profiles().is_empty());
        assert_eq!(set.data().profiles, None);

        assert!(set.profiles_mut().is_empty());
        assert_eq!(set.data().profiles, Some(Vec::new()));
    }

    #[test]
    fn set_profiles_preserves_order() {
        let (a, b, c) = (profile(3, 1.0), profile(1, 1.0), profile(2, 1.0));
        let mut set = DynamicDemandSet::default();
        set.set_profiles([a.clone(), b.clone(), c.clone()]);
        assert_eq!(set.profiles(), &[a, b, c]);
    }

    #[test]
    fn set_profiles_replaces_existing_contents() {
        let mut set = DynamicDemandSet::default();
        set.set_profiles([profile(1, 1.0), profile(2, 1.0)]);
        set.set_profiles([profile(9, 1.0)]);
        assert_eq!(set.profiles(), &[profile(9, 1.0)]);

        set.set_profiles(Vec::new());
        assert!(set.profiles().is_empty());
        assert_eq!(set.data().profiles, Some(Vec::new()));
    }

    #[test]
    fn set_profiles_copies_in() {
        let mut list = vec![profile(1, 1.0), profile(2, 1.0)];
        let mut set = DynamicDemandSet::default();
        set.set_profiles(list.iter().cloned());

        list[0].knob = 5.0;
        list.push(profile(3, 1.0));

        assert_eq!(set.profiles(), &[profile(1, 1.0), profile(2, 1.0)]);
    }

    #[test]
    fn profiles_mut_is_live() {
        let mut set = DynamicDemandSet::default();
        set.profiles_mut().push(profile(4, 1.0));
        assert_eq!(set.profile_at_link(4), Some(&profile(4, 1.0)));
    }

    #[test]
    fn lookup_returns_first_match() {
        let mut set = DynamicDemandSet::default();
        set.set_profiles([profile(1, 1.0), profile(2, 2.0), profile(1, 3.0), profile(2, 4.0)]);

        assert_eq!(set.profile_at_link(1).map(|p| p.knob), Some(1.0));
        assert_eq!(set.profile_at_link(2).map(|p| p.knob), Some(2.0));
    }

    #[test]
    fn lookup_misses_return_none() {
        let mut set = DynamicDemandSet::default();
        assert!(set.profile_at_link(1).is_none());
        assert!(set.profile_at_link_mut(1).is_none());

        set.set_profiles([profile(1, 1.0)]);
        assert!(set.profile_at_link(2).is_none());
    }

    #[test]
    fn lookup_mut_edits_first_match() {
        let mut set = DynamicDemandSet::default();
        set.set_profiles([profile(1, 1.0), profile(1, 1.0)]);
        set.profile_at_link_mut(1).unwrap().knob = 0.5;
        assert_eq!(set.profiles(), &[profile(1, 0.5), profile(1, 1.0)]);
    }

    #[test]
    fn duplicate_link_ids_are_reported_once() {
        let mut set = DynamicDemandSet::default();
        set.set_profiles([
            profile(5, 1.0),
            profile(6, 1.0),
            profile(6, 1.0),
            profile(5, 1.0),
            profile(6, 1.0),
        ]);
        assert_eq!(set.duplicate_link_ids(), vec![6, 5]);
    }

    #[test]
    fn every_set_is_valid() {
        assert!(DynamicDemandSet::default().is_valid());
        let mut set = DynamicDemandSet::new(1, "");
        set.set_profiles([profile(1, 1.0), profile(1, 1.0)]);
        assert!(set.is_valid());
    }

    #[test]
    fn save_then_load_keeps_normalised_crud_flag() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("set.yaml");

        let mut set = DynamicDemandSet::new(2, "evening");
        set.set_profiles([profile(8, 1.0)]);
        assert_eq!(set.crud_flag(), CrudFlag::None);
        set.save(&path).unwrap();

        let loaded = DynamicDemandSet::load(&path).unwrap();
        assert_eq!(loaded, set);
        assert_eq!(loaded.data().crud_flag.as_deref(), Some("NONE"));
    }
}
