use super::*;
use crate::foundation::core::Cell;
use crate::world::model::CookState;

const KITCHEN: &str = r#"{
    "width": 3,
    "height": 3,
    "static_objects": [
        { "location": [0, 0], "kind": "counter" },
        { "location": [2, 2], "kind": "pot", "powered": true,
          "content": { "current_progress": 2, "min_progress": 5, "overcooked_progress": -5 } },
        { "location": [1, 0], "kind": "station", "sprite": "onion_station" }
    ],
    "dynamic_objects": [
        { "location": [2, 2], "sprite": "onion", "kind": "food" },
        { "location": [1, 1], "sprite": "plate", "kind": "container" },
        { "location": [2, 2], "sprite": "soup", "kind": "soup_content",
          "current_progress": 1, "min_progress": 4, "overcooked_progress": -3 }
    ],
    "agents": [ { "location": [1, 1], "orientation": 2, "color": "blue" } ],
    "recipes": [ { "sprite": "onion_soup", "remaining_time": 40, "max_remaining_time": 60 } ],
    "score": 12,
    "t": 7
}"#;

#[test]
fn parses_tagged_objects() {
    let snap = WorldSnapshot::from_json_str(KITCHEN).unwrap();
    assert_eq!(snap.grid_size(), (3, 3));
    assert_eq!(snap.static_objects()[0].kind, StaticKind::Counter);
    assert_eq!(
        snap.static_objects()[1].kind,
        StaticKind::Pot {
            powered: true,
            content: Some(CookState {
                current_progress: 2,
                min_progress: 5,
                overcooked_progress: -5,
            }),
        }
    );
    assert_eq!(snap.static_objects()[2].sprite(), Some("onion_station"));
    assert_eq!(
        snap.dynamic_objects()[0].kind,
        DynamicKind::Food { chop_count: 0 }
    );
    assert!(matches!(
        snap.dynamic_objects()[2].kind,
        DynamicKind::SoupContent(CookState {
            min_progress: 4,
            ..
        })
    ));
    assert_eq!(snap.agents()[0].location, Cell::new(1, 1));
    assert_eq!(snap.total_score(), 12);
    assert_eq!(snap.elapsed_ticks(), 7);
}

#[test]
fn json_roundtrip_preserves_snapshot() {
    let snap = WorldSnapshot::from_json_str(KITCHEN).unwrap();
    let text = serde_json::to_string(&snap).unwrap();
    assert_eq!(WorldSnapshot::from_json_str(&text).unwrap(), snap);
}

#[test]
fn zero_recipe_duration_is_rejected() {
    let mut snap = WorldSnapshot::new(2, 2);
    snap.recipes.push(Recipe {
        sprite: "salad".to_string(),
        remaining_time: 0,
        max_remaining_time: 0,
    });
    assert!(matches!(
        snap.validate().unwrap_err(),
        RenderError::Validation(_)
    ));
}

#[test]
fn pot_content_thresholds_are_checked() {
    let mut snap = WorldSnapshot::new(2, 2);
    snap.static_objects.push(StaticObject::new(
        Cell::new(0, 0),
        StaticKind::Pot {
            powered: true,
            content: Some(CookState {
                current_progress: 0,
                min_progress: 0,
                overcooked_progress: -3,
            }),
        },
    ));
    assert!(snap.validate().is_err());
}

#[test]
fn out_of_grid_objects_are_accepted() {
    let mut snap = WorldSnapshot::new(2, 2);
    snap.dynamic_objects.push(DynamicObject::new(
        Cell::new(9, 9),
        "tomato",
        DynamicKind::Food { chop_count: 0 },
    ));
    snap.validate().unwrap();
}

#[test]
fn bad_json_is_serde_error() {
    let err = WorldSnapshot::from_json_str(r#"{ "width": "x" }"#).unwrap_err();
    assert!(matches!(err, RenderError::Serde(_)));
}
