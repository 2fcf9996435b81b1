//! Extracted identity and certificate data.
//!
//! The bag has a fixed, versioned set of known keys. Anything an extractor
//! returns outside that set goes to `extra`, so newer extractors keep working
//! against older templates. On the wire the bag is one flat
//! `{ "key": "value" }` object.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceKey {
    FirstName,
    LastName,
    Dob,
    Cob,
    Citizenship,
    Passport,
    Sex,
    Capacity,
    CertificateNoStcw,
    CertificateNoH2s,
    CertificateNoBoset,
    CertificateNoPalau1,
}

impl SourceKey {
    pub const ALL: [SourceKey; 12] = [
        SourceKey::FirstName,
        SourceKey::LastName,
        SourceKey::Dob,
        SourceKey::Cob,
        SourceKey::Citizenship,
        SourceKey::Passport,
        SourceKey::Sex,
        SourceKey::Capacity,
        SourceKey::CertificateNoStcw,
        SourceKey::CertificateNoH2s,
        SourceKey::CertificateNoBoset,
        SourceKey::CertificateNoPalau1,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SourceKey::FirstName => "firstName",
            SourceKey::LastName => "lastName",
            SourceKey::Dob => "dob",
            SourceKey::Cob => "cob",
            SourceKey::Citizenship => "citizenship",
            SourceKey::Passport => "passport",
            SourceKey::Sex => "sex",
            SourceKey::Capacity => "capacity",
            SourceKey::CertificateNoStcw => "certificateNoStcw",
            SourceKey::CertificateNoH2s => "certificateNoH2s",
            SourceKey::CertificateNoBoset => "certificateNoBoset",
            SourceKey::CertificateNoPalau1 => "certificateNoPalau1",
        }
    }

    /// Human label shown next to the key in mapping pickers.
    pub fn label(self) -> &'static str {
        match self {
            SourceKey::FirstName => "First Name",
            SourceKey::LastName => "Last Name",
            SourceKey::Dob => "Date of Birth",
            SourceKey::Cob => "Country of Birth",
            SourceKey::Citizenship => "Citizenship",
            SourceKey::Passport => "Passport Number",
            SourceKey::Sex => "Sex",
            SourceKey::Capacity => "Capacity",
            SourceKey::CertificateNoStcw => "STCW Certificate",
            SourceKey::CertificateNoH2s => "H2S Certificate",
            SourceKey::CertificateNoBoset => "BOSET Certificate",
            SourceKey::CertificateNoPalau1 => "Palau 1 Certificate",
        }
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceKey::ALL.into_iter().find(|k| k.as_str() == s).ok_or(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct SourceDataBag {
    known: BTreeMap<SourceKey, String>,
    extra: BTreeMap<String, String>,
}

impl SourceDataBag {
    /// Bumped whenever the known key set changes.
    pub const VERSION: u32 = 1;

    pub fn new() -> Self {
        Self::default()
    }

    /// Looks a value up by its wire key, known or not.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key.parse::<SourceKey>() {
            Ok(known) => self.known.get(&known).map(String::as_str),
            Err(()) => self.extra.get(key).map(String::as_str),
        }
    }

    pub fn get_known(&self, key: SourceKey) -> Option<&str> {
        self.known.get(&key).map(String::as_str)
    }

    /// Like [`get`](Self::get) but treats an empty string as absent.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        match key.parse::<SourceKey>() {
            Ok(known) => {
                self.known.insert(known, value.into());
            }
            Err(()) => {
                self.extra.insert(key.to_string(), value.into());
            }
        }
    }

    pub fn set(&mut self, key: SourceKey, value: impl Into<String>) {
        self.known.insert(key, value.into());
    }

    pub fn with(mut self, key: SourceKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Folds `other` into `self`; on a shared key the value from `other` wins.
    pub fn merge(&mut self, other: SourceDataBag) {
        self.known.extend(other.known);
        self.extra.extend(other.extra);
    }

    pub fn extra(&self) -> &BTreeMap<String, String> {
        &self.extra
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty() && self.extra.is_empty()
    }

    pub fn len(&self) -> usize {
        self.known.len() + self.extra.len()
    }

    /// Every entry, known keys first in declaration order, then extras.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.known
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .chain(self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

impl From<BTreeMap<String, String>> for SourceDataBag {
    fn from(map: BTreeMap<String, String>) -> Self {
        let mut bag = SourceDataBag::new();
        for (key, value) in map {
            bag.insert(&key, value);
        }
        bag
    }
}

impl From<SourceDataBag> for BTreeMap<String, String> {
    fn from(bag: SourceDataBag) -> Self {
        let mut map: BTreeMap<String, String> = bag.extra;
        for (key, value) in bag.known {
            map.insert(key.as_str().to_string(), value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_land_in_extra() {
        let json = r#"{"firstName":"Jane","vesselName":"Aurora"}"#;
        let bag: SourceDataBag = serde_json::from_str(json).unwrap();
        assert_eq!(bag.get_known(SourceKey::FirstName), Some("Jane"));
        assert_eq!(bag.extra().get("vesselName").map(String::as_str), Some("Aurora"));
        assert_eq!(bag.get("vesselName"), Some("Aurora"));
        assert_eq!(bag.len(), 2);
    }

    #[test]
    fn serializes_as_flat_object() {
        let mut bag = SourceDataBag::new().with(SourceKey::Passport, "X1");
        bag.insert("custom", "1");
        let value = serde_json::to_value(&bag).unwrap();
        assert_eq!(value, serde_json::json!({"passport": "X1", "custom": "1"}));
    }

    #[test]
    fn merge_prefers_later_values() {
        let mut first = SourceDataBag::new()
            .with(SourceKey::FirstName, "Jane")
            .with(SourceKey::Capacity, "Deck");
        let second = SourceDataBag::new()
            .with(SourceKey::Capacity, "Engine")
            .with(SourceKey::CertificateNoStcw, "ST-1");
        first.merge(second);
        assert_eq!(first.get("firstName"), Some("Jane"));
        assert_eq!(first.get("capacity"), Some("Engine"));
        assert_eq!(first.get("certificateNoStcw"), Some("ST-1"));
    }

    #[test]
    fn empty_values_are_not_usable() {
        let bag = SourceDataBag::new().with(SourceKey::Sex, "");
        assert_eq!(bag.get("sex"), Some(""));
        assert_eq!(bag.non_empty("sex"), None);
    }
}
