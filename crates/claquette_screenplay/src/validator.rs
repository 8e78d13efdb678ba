//! Advisory consistency check over extracted scenes.

use crate::resolve::resolve;
use claquette_core::SceneRecord;
use serde::{Deserialize, Serialize};

/// A speaker in a scene that is not one of the canonical characters.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct ConsistencyWarning {
    /// Scene the name appeared in
    scene_number: u32,
    /// The unexpected name, as written by the model
    name: String,
}

impl std::fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "scene {} uses unexpected character name '{}'",
            self.scene_number, self.name
        )
    }
}

/// Flag speakers that do not match a canonical name exactly or up to case
/// and spacing. Speakers only matched by containment are flagged too.
///
/// Never fails and never modifies the scenes.
///
/// # Examples
///
/// ```
/// use claquette_core::SceneRecord;
/// use claquette_screenplay::validate;
///
/// let scene = SceneRecord::builder()
///     .number(1u32)
///     .speakers(vec!["mara".to_string(), "Guard".to_string()])
///     .build()
///     .unwrap();
/// let warnings = validate(&[scene], &["Mara".to_string()]);
/// assert_eq!(warnings.len(), 1);
/// assert_eq!(warnings[0].name(), "Guard");
/// ```
pub fn validate(scenes: &[SceneRecord], canonical_names: &[String]) -> Vec<ConsistencyWarning> {
    let warnings: Vec<ConsistencyWarning> = scenes
        .iter()
        .flat_map(|scene| {
            scene
                .speakers()
                .iter()
                .filter(|speaker| !resolve(speaker, canonical_names).is_strict())
                .map(|speaker| ConsistencyWarning {
                    scene_number: *scene.number(),
                    name: speaker.clone(),
                })
        })
        .collect();

    for warning in &warnings {
        tracing::warn!(
            scene = warning.scene_number,
            name = %warning.name,
            "Unexpected character name in scene"
        );
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(number: u32, speakers: &[&str]) -> SceneRecord {
        SceneRecord::builder()
            .number(number)
            .speakers(speakers.iter().map(|s| s.to_string()).collect::<Vec<_>>())
            .build()
            .unwrap()
    }

    #[test]
    fn test_clean_scenes_no_warnings() {
        let names = vec!["Mara".to_string(), "Rook".to_string()];
        let scenes = vec![scene(1, &["Mara", "ROOK"]), scene(2, &["Rook"])];
        assert!(validate(&scenes, &names).is_empty());
    }

    #[test]
    fn test_contained_and_unknown_flagged_per_scene() {
        let names = vec!["Mara Voss".to_string()];
        let scenes = vec![scene(1, &["Mara"]), scene(2, &["Mara Voss", "Pilot"])];
        let warnings = validate(&scenes, &names);
        assert_eq!(
            warnings
                .iter()
                .map(|w| (*w.scene_number(), w.name().as_str()))
                .collect::<Vec<_>>(),
            vec![(1, "Mara"), (2, "Pilot")]
        );
        assert_eq!(
            warnings[1].to_string(),
            "scene 2 uses unexpected character name 'Pilot'"
        );
    }

    #[test]
    fn test_input_untouched() {
        let names = vec!["Mara".to_string()];
        let scenes = vec![scene(1, &["Guard"])];
        let before = scenes.clone();
        let _ = validate(&scenes, &names);
        assert_eq!(scenes, before);
    }
}
