//! End-to-end conversion of line-delimited captures into the JSON document.

use demo_to_json::{
    config::Config,
    parser::{self, output_path},
};
use serde_json::{json, Value};
use std::fs;

const CAPTURE: &str = r#"{"kind":"header","map_name":"de_dust2","tick_rate":64,"playback_ticks":6400}
{"kind":"state","ingame_tick":50,"total_rounds_played":0,"participants":[{"name":"VadimkaYbivaet","team":2,"position":{"x":1.0,"y":2.0,"z":3.0},"last_place_name":"TSpawn","weapons":[2,405],"health":100,"money":800}]}
{"kind":"round_start","time_limit":115,"objective":"BOMB TARGET"}
{"kind":"frame_done"}
{"kind":"state","ingame_tick":100,"total_rounds_played":0,"participants":[{"name":"VadimkaYbivaet","team":2,"position":{"x":1.0,"y":2.0,"z":3.0},"last_place_name":"TSpawn","weapons":[2,405],"health":100,"money":800}]}
{"kind":"kill","killer":{"name":"VadimkaYbivaet","team":2,"position":{"x":1.0,"y":2.0,"z":3.0}},"victim":{"name":"bot Kev","team":3,"position":{"x":4.0,"y":5.0,"z":6.0}},"weapon":2}
{"kind":"weapon_fire","shooter":{"name":"bot Kev","team":3},"weapon":9}
{"kind":"frame_done"}
"#;

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn converts_capture_into_sorted_ticks() {
    let dir = tempfile::tempdir().unwrap();
    let demo = dir.path().join("match.jsonl");
    fs::write(&demo, CAPTURE).unwrap();
    let out = output_path(&demo).unwrap();
    assert_eq!(out, dir.path().join("match.json"));

    let summary = parser::convert(CAPTURE.as_bytes(), &out, &Config::default()).unwrap();
    assert_eq!(summary.event_count(), 4);

    let doc = read_json(&out);
    assert_eq!(doc["map_name"], "de_dust2");
    assert_eq!(doc["tick_rate"], 64);
    assert_eq!(doc["total_ticks"], 6400);
    assert_eq!(doc["duration"], 100.0);

    let ticks = doc["ticks"].as_array().unwrap();
    assert_eq!(ticks.len(), 2);
    assert_eq!(ticks[0]["tick"], 50);
    assert_eq!(ticks[1]["tick"], 100);

    let kinds = |i: usize| -> Vec<String> {
        ticks[i]["events"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["type"].as_str().unwrap().to_string())
            .collect()
    };
    assert_eq!(kinds(0), ["round_start", "move"]);
    // The other player's shot is dropped; the target did not move.
    assert_eq!(kinds(1), ["kill", "stand"]);

    let kill = &ticks[1]["events"][0];
    assert_eq!(
        kill["data"],
        json!({
            "killer_side": "T",
            "killer_name": "VadimkaYbivaet",
            "victim_side": "CT",
            "victim_name": "bot Kev",
            "weapon": "Glock-18",
            "killer_pos": {"x": 1.0, "y": 2.0, "z": 3.0},
            "victim_pos": {"x": 4.0, "y": 5.0, "z": 6.0}
        })
    );

    let frame = &ticks[0]["events"][1]["data"];
    assert_eq!(frame["inventory"], "[Glock-18, Knife]");
    assert_eq!(frame["helmet"], 0);
    assert_eq!(frame["location"], "TSpawn");
}

#[test]
fn custom_target_follows_other_player() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("match.json");

    let summary = parser::convert(CAPTURE.as_bytes(), &out, &Config::new("KEV")).unwrap();
    let kinds: Vec<&str> = summary
        .ticks
        .iter()
        .flat_map(|t| t.events.iter().map(|e| e.kind()))
        .collect();
    assert_eq!(kinds, ["round_start", "kill", "shot"]);
}

#[test]
fn parse_failure_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("broken.json");
    let capture = format!("{CAPTURE}{{\"kind\":\"kill\",\"weapon\":\"AK\"}}\n");

    let err = parser::convert(capture.as_bytes(), &out, &Config::default()).unwrap_err();
    assert!(err.to_string().contains("line 9"), "{err}");
    assert!(!out.exists());
}

#[test]
fn unwritable_output_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("missing").join("match.json");

    let err = parser::convert(CAPTURE.as_bytes(), &out, &Config::default()).unwrap_err();
    assert!(err.to_string().starts_with("cannot write"), "{err}");
}

#[test]
fn empty_capture_produces_empty_document() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("empty.json");

    parser::convert(b"", &out, &Config::default()).unwrap();
    let doc = read_json(&out);
    assert_eq!(
        doc,
        json!({
            "map_name": "",
            "tick_rate": 64,
            "duration": 0.0,
            "total_ticks": 0,
            "ticks": []
        })
    );
}

#[test]
fn unknown_ids_fall_back_to_sentinels() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("future.json");
    let capture = r#"{"kind":"state","ingame_tick":10,"participants":[{"name":"spec","team":5,"weapons":[999]}]}
{"kind":"kill","killer":{"name":"VadimkaYbivaet","team":2},"victim":{"name":"spec","team":5},"weapon":999}
"#;

    let summary = parser::convert(capture.as_bytes(), &out, &Config::default()).unwrap();
    assert_eq!(summary.event_count(), 1);

    let doc = read_json(&out);
    let kill = &doc["ticks"][0]["events"][0];
    assert_eq!(kill["type"], "kill");
    assert_eq!(kill["data"]["weapon"], "UNKNOWN");
    assert_eq!(kill["data"]["victim_side"], "?");
    assert!(kill["raw_line"].as_str().unwrap().contains("UNKNOWN"));
}

#[test]
fn parse_failure_keeps_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("match.json");
    parser::convert(CAPTURE.as_bytes(), &out, &Config::default()).unwrap();
    let previous = fs::read_to_string(&out).unwrap();

    let broken = format!("{CAPTURE}not json\n");
    parser::convert(broken.as_bytes(), &out, &Config::default()).unwrap_err();
    assert_eq!(fs::read_to_string(&out).unwrap(), previous);
}
