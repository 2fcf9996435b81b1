//! Auxiliary images placed on a certificate.
//!
//! Every operation returns a new [`AssetCollection`]; the session decides
//! whether to keep it.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Signatures,
    Stamps,
    Logos,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 3] = [
        AssetCategory::Signatures,
        AssetCategory::Stamps,
        AssetCategory::Logos,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AssetCategory::Signatures => "signatures",
            AssetCategory::Stamps => "stamps",
            AssetCategory::Logos => "logos",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown asset category '{}'", s))
    }
}

/// Image references (data URLs) grouped by category, in upload order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCollection {
    #[serde(default)]
    pub signatures: Vec<String>,
    #[serde(default)]
    pub stamps: Vec<String>,
    #[serde(default)]
    pub logos: Vec<String>,
}

impl AssetCollection {
    pub fn get(&self, category: AssetCategory) -> &[String] {
        match category {
            AssetCategory::Signatures => &self.signatures,
            AssetCategory::Stamps => &self.stamps,
            AssetCategory::Logos => &self.logos,
        }
    }

    fn get_mut(&mut self, category: AssetCategory) -> &mut Vec<String> {
        match category {
            AssetCategory::Signatures => &mut self.signatures,
            AssetCategory::Stamps => &mut self.stamps,
            AssetCategory::Logos => &mut self.logos,
        }
    }

    pub fn is_empty(&self) -> bool {
        AssetCategory::ALL.iter().all(|c| self.get(*c).is_empty())
    }

    /// Appends `images` after the existing entries of `category`.
    #[must_use]
    pub fn upload<I>(&self, category: AssetCategory, images: I) -> AssetCollection
    where
        I: IntoIterator<Item = String>,
    {
        let mut next = self.clone();
        next.get_mut(category).extend(images);
        next
    }

    /// Drops exactly one entry; later entries shift down by one.
    pub fn remove(
        &self,
        category: AssetCategory,
        index: usize,
    ) -> Result<AssetCollection, ValidationError> {
        if index >= self.get(category).len() {
            return Err(ValidationError::AssetIndex { category, index });
        }
        let mut next = self.clone();
        next.get_mut(category).remove(index);
        Ok(next)
    }

    /// Swaps the first entry equal to `old` for `new`, in place. Without a
    /// match the collection comes back unchanged.
    #[must_use]
    pub fn replace(&self, category: AssetCategory, old: &str, new: String) -> AssetCollection {
        let mut next = self.clone();
        if let Some(slot) = next.get_mut(category).iter_mut().find(|img| img.as_str() == old) {
            *slot = new;
        }
        next
    }
}
