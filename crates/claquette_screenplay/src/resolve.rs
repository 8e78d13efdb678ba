//! Speaker-to-character resolution against the frozen canonical names.
//!
//! Tiers are tried in order and the first canonical name that matches in a
//! tier wins:
//! 1. exact string equality
//! 2. equality after case folding and whitespace collapsing
//! 3. containment in either direction, after normalization
//!
//! A speaker that matches no tier is unresolved. The closest name by length
//! is reported for logging only and never attaches a character.

/// Outcome of resolving one speaker name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Identical to a canonical name
    Exact(&'a str),
    /// Equal to a canonical name ignoring case and spacing
    Normalized(&'a str),
    /// Contains, or is contained in, a canonical name
    Contained(&'a str),
    /// No canonical name matched
    Unresolved {
        /// Canonical name closest in length, for diagnostics
        nearest: Option<&'a str>,
    },
}

impl<'a> Resolution<'a> {
    /// The canonical name this speaker resolved to.
    pub fn name(&self) -> Option<&'a str> {
        match *self {
            Resolution::Exact(name)
            | Resolution::Normalized(name)
            | Resolution::Contained(name) => Some(name),
            Resolution::Unresolved { .. } => None,
        }
    }

    /// Whether the speaker matched a canonical name verbatim or up to case/spacing.
    pub fn is_strict(&self) -> bool {
        matches!(self, Resolution::Exact(_) | Resolution::Normalized(_))
    }
}

/// Lowercase and collapse runs of whitespace to single spaces.
///
/// # Examples
///
/// ```
/// use claquette_screenplay::normalize_name;
///
/// assert_eq!(normalize_name("  Mara \t VOSS "), "mara voss");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve `speaker` against `canonical_names`.
///
/// Blank canonical names are ignored.
///
/// # Examples
///
/// ```
/// use claquette_screenplay::{Resolution, resolve};
///
/// let names = vec!["Mara".to_string(), "Detective Rook".to_string()];
/// assert_eq!(resolve("Mara", &names), Resolution::Exact("Mara"));
/// assert_eq!(resolve(" mara ", &names), Resolution::Normalized("Mara"));
/// assert_eq!(resolve("Rook", &names), Resolution::Contained("Detective Rook"));
/// assert_eq!(resolve("Narrator", &names).name(), None);
/// ```
pub fn resolve<'a>(speaker: &str, canonical_names: &'a [String]) -> Resolution<'a> {
    let candidates: Vec<&'a str> = canonical_names
        .iter()
        .map(String::as_str)
        .filter(|name| !name.trim().is_empty())
        .collect();

    let wanted = normalize_name(speaker);
    if wanted.is_empty() {
        return Resolution::Unresolved { nearest: None };
    }

    if let Some(name) = candidates.iter().find(|name| **name == speaker) {
        return Resolution::Exact(*name);
    }

    let normalized: Vec<(&'a str, String)> = candidates
        .iter()
        .map(|name| (*name, normalize_name(name)))
        .collect();

    if let Some((name, _)) = normalized.iter().find(|(_, norm)| *norm == wanted) {
        return Resolution::Normalized(*name);
    }

    if let Some((name, _)) = normalized
        .iter()
        .find(|(_, norm)| norm.contains(&wanted) || wanted.contains(norm.as_str()))
    {
        return Resolution::Contained(*name);
    }

    Resolution::Unresolved {
        nearest: nearest_by_length(&wanted, &normalized),
    }
}

fn nearest_by_length<'a>(wanted: &str, normalized: &[(&'a str, String)]) -> Option<&'a str> {
    let target = wanted.chars().count();
    normalized
        .iter()
        .min_by_key(|(_, norm)| norm.chars().count().abs_diff(target))
        .map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_beats_normalized() {
        let canon = names(&["mara", "Mara"]);
        assert_eq!(resolve("Mara", &canon), Resolution::Exact("Mara"));
    }

    #[test]
    fn test_exact_match_keeps_raw_spelling() {
        let canon = names(&["Mara", "Mara "]);
        assert_eq!(resolve("Mara ", &canon), Resolution::Exact("Mara "));
        assert!(resolve("Mara ", &canon).is_strict());
    }

    #[test]
    fn test_normalized_handles_case_and_spacing() {
        let canon = names(&["Mara Voss"]);
        assert_eq!(
            resolve("MARA   voss", &canon),
            Resolution::Normalized("Mara Voss")
        );
    }

    #[test]
    fn test_containment_both_directions() {
        let canon = names(&["Rook", "Mara Voss"]);
        assert_eq!(resolve("Mara", &canon), Resolution::Contained("Mara Voss"));
        assert_eq!(
            resolve("Inspector Rook", &canon),
            Resolution::Contained("Rook")
        );
    }

    #[test]
    fn test_first_containment_match_wins() {
        let canon = names(&["Ann Lee", "Ann Marie"]);
        assert_eq!(resolve("Ann", &canon), Resolution::Contained("Ann Lee"));
    }

    #[test]
    fn test_unresolved_reports_nearest_only() {
        let canon = names(&["Al", "Bartholomew"]);
        let resolution = resolve("Guard", &canon);
        assert_eq!(resolution, Resolution::Unresolved { nearest: Some("Al") });
        assert_eq!(resolution.name(), None);
    }

    #[test]
    fn test_blank_inputs() {
        let canon = names(&["", "  ", "Mara"]);
        assert_eq!(resolve("", &canon), Resolution::Unresolved { nearest: None });
        assert_eq!(resolve("Mara", &canon), Resolution::Exact("Mara"));
        assert_eq!(
            resolve("Guard", &names(&[""])),
            Resolution::Unresolved { nearest: None }
        );
    }
}
