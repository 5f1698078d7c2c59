//! Matching regions to a named group (province or UK region) and framing them.

use crate::geometry::{Bounds, RegionBoundary};
use crate::models::RegionMeta;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// How group labels are compared. Both policies are case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupMatch {
    /// Compare the labels as they are.
    Exact,
    /// Trim and collapse runs of whitespace before comparing.
    #[default]
    CollapseWhitespace,
}

impl GroupMatch {
    pub fn normalize(self, label: &str) -> String {
        match self {
            GroupMatch::Exact => label.to_lowercase(),
            GroupMatch::CollapseWhitespace => label
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase(),
        }
    }

    pub fn matches(self, label: &str, target: &str) -> bool {
        self.normalize(label) == self.normalize(target)
    }
}

/// Regions picked by a group lookup, with their combined bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSelection {
    pub slugs: Vec<String>,
    pub bounds: Bounds,
}

/// Collect every boundary whose metadata group matches `name`.
///
/// The first match seeds the bounds and later ones extend it. `None` when
/// nothing matches.
pub fn select_group<'a>(
    boundaries: impl IntoIterator<Item = &'a RegionBoundary>,
    meta: &AHashMap<String, RegionMeta>,
    name: &str,
    policy: GroupMatch,
) -> Option<GroupSelection> {
    let target = policy.normalize(name);
    let mut selection: Option<GroupSelection> = None;
    for boundary in boundaries {
        let Some(label) = meta.get(&boundary.slug).and_then(RegionMeta::group) else {
            continue;
        };
        if policy.normalize(label) != target {
            continue;
        }
        match selection.as_mut() {
            None => {
                selection = Some(GroupSelection {
                    slugs: vec![boundary.slug.clone()],
                    bounds: boundary.bounds,
                })
            }
            Some(sel) => {
                sel.slugs.push(boundary.slug.clone());
                sel.bounds.extend(&boundary.bounds);
            }
        }
    }
    selection
}

/// Distinct group labels in first-seen order, compared under `policy`.
pub fn distinct_groups<'a>(
    metas: impl IntoIterator<Item = &'a RegionMeta>,
    policy: GroupMatch,
) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for label in metas.into_iter().filter_map(RegionMeta::group) {
        let key = policy.normalize(label);
        if key.is_empty() || seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(label.trim().to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_keeps_inner_whitespace() {
        assert!(GroupMatch::Exact.matches("Munster", "MUNSTER"));
        assert!(!GroupMatch::Exact.matches("North  West", "north west"));
        assert!(!GroupMatch::Exact.matches(" Munster", "munster"));
    }

    #[test]
    fn collapse_whitespace_ignores_spacing() {
        let p = GroupMatch::CollapseWhitespace;
        assert!(p.matches("  North \t West ", "north west"));
        assert!(!p.matches("Northwest", "north west"));
    }
}
