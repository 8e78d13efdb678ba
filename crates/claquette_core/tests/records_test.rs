//! Tests for the core records.

use claquette_core::{
    CastingSuggestion, CharacterId, CharacterRecord, EpisodeRecord, FilmRecord, GenerateResponse,
    Output, Project, SceneRecord, Screenplay, ScreenplayContent, StoryBrief,
};
use std::collections::BTreeSet;

fn scene(number: u32) -> SceneRecord {
    SceneRecord::builder()
        .number(number)
        .setting(format!("INT. VAULT - NIGHT {}", number))
        .build()
        .unwrap()
}

#[test]
fn test_episode_content_flattens_scenes_in_order() {
    let content = ScreenplayContent::Episodes(vec![
        EpisodeRecord::new(1, "Pilot", "Setup", Some(42), vec![scene(1), scene(2)]),
        EpisodeRecord::new(2, "Break-in", "Payoff", None, vec![scene(1)]),
    ]);

    let numbers: Vec<u32> = content.scenes().iter().map(|s| *s.number()).collect();
    assert_eq!(numbers, vec![1, 2, 1]);
}

#[test]
fn test_screenplay_serializes_with_content_tag() {
    let project = Project::new("Vault", StoryBrief::film("A heist"));
    let mara = CharacterRecord::builder()
        .name("Mara")
        .age(34u32)
        .build()
        .unwrap();
    let suggestion = CastingSuggestion::builder()
        .character_id(*mara.id())
        .character_name("Mara")
        .actor_name("Jane Doe")
        .actor_age(36u32)
        .match_score(0.85)
        .reasoning("Range")
        .profile("Stage actor")
        .priority(1u8)
        .build()
        .unwrap();
    let screenplay = Screenplay::new(
        project,
        vec![mara],
        ScreenplayContent::Film(FilmRecord::new("Vault", "A heist", None, vec![scene(1)])),
        vec![suggestion],
    );

    let value = serde_json::to_value(&screenplay).unwrap();
    assert_eq!(value["content"]["kind"], "film");
    assert_eq!(value["casting"][0]["priority"], 1);
}

#[test]
fn test_scene_characters_default_empty() {
    let s = scene(3);
    assert!(s.characters().is_empty());
    assert!(s.speakers().is_empty());

    let id = CharacterId::new();
    let with_cast = SceneRecord::builder()
        .number(1u32)
        .characters(BTreeSet::from([id]))
        .build()
        .unwrap();
    assert!(with_cast.characters().contains(&id));
}

#[test]
fn test_refusal_is_not_text() {
    let response = GenerateResponse {
        outputs: vec![Output::Refusal("no".into())],
    };
    assert_eq!(response.text(), "");
    assert_eq!(response.refusal(), Some("no"));
}
