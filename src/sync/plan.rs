//! sync::plan
//!
//! Key-driven merge of a base file into a locale file.
//!
//! # Algorithm
//!
//! `missing` is every base entry whose key the locale lacks, in base order.
//! The merged sequence is the locale's entries, unchanged and in their
//! original order, followed by `missing`. Locale values are never replaced.
//!
//! Applying a plan and planning again yields an empty plan, which makes the
//! whole operation idempotent.

use crate::core::config::MergeOptions;
use crate::resource::{ResourceEntry, ResourceFile, ResourceKey};

/// The entries a locale file needs from its base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePlan {
    additions: Vec<ResourceEntry>,
    preserved: usize,
    skipped: Vec<ResourceKey>,
}

impl MergePlan {
    /// Compute what `locale` is missing from `base`.
    ///
    /// With `skip_untranslatable`, base entries marked
    /// `translatable="false"` are left out and recorded as skipped.
    pub fn compute(base: &ResourceFile, locale: &ResourceFile, options: &MergeOptions) -> Self {
        let present = locale.keys();
        let mut additions = Vec::new();
        let mut skipped = Vec::new();

        for entry in base.entries() {
            if present.contains(&entry.key) {
                continue;
            }
            if options.skip_untranslatable && !entry.translatable {
                skipped.push(entry.key.clone());
                continue;
            }
            additions.push(entry.clone());
        }

        Self {
            additions,
            preserved: locale.len(),
            skipped,
        }
    }

    /// Base entries to append, in base order.
    pub fn additions(&self) -> &[ResourceEntry] {
        &self.additions
    }

    /// Keys of the appended entries.
    pub fn added_keys(&self) -> Vec<ResourceKey> {
        self.additions.iter().map(|e| e.key.clone()).collect()
    }

    /// Number of locale entries carried over unchanged.
    pub fn preserved(&self) -> usize {
        self.preserved
    }

    /// Missing base entries left out because they are not translatable.
    pub fn skipped(&self) -> &[ResourceKey] {
        &self.skipped
    }

    /// True when the locale file needs no change.
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty()
    }

    /// The merged entry sequence: locale entries, then additions.
    pub fn merged<'a>(&'a self, locale: &'a ResourceFile) -> Vec<&'a ResourceEntry> {
        locale.entries().iter().chain(&self.additions).collect()
    }
}
