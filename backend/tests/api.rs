mod support;

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use backend::store::Store;
use common::MatchPlayerStats;
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use support::Harness;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

async fn send(harness: &Harness, request: Request<Body>) -> (StatusCode, Value) {
    let response = harness.router().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(harness: &Harness, uri: &str) -> (StatusCode, Value) {
    send(harness, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(harness: &Harness, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(harness, request).await
}

fn stats_row(match_id: i32, player_id: i32, kills: i32, rating: f64, he: i32, molotov: i32) -> MatchPlayerStats {
    MatchPlayerStats {
        id: format!("{}-{}", match_id, player_id),
        match_id,
        player_id,
        kills,
        deaths: 10,
        rating: Some(rating),
        he_grenade_kills: he,
        molotov_kills: molotov,
        ..Default::default()
    }
}

/// Two teams, three players and two finished matches of which Vitality won
/// the newer one.
async fn seeded() -> Harness {
    let harness = Harness::new().await;
    harness.team(1, "Vitality", Some(1)).await;
    harness.team(2, "MOUZ", Some(2)).await;
    harness.team(3, "Unranked", None).await;
    harness.player(10, "ZywOo", Some(1)).await;
    harness.player(11, "apEX", Some(1)).await;
    harness.player(20, "torzsi", Some(2)).await;
    harness.finished_match(100, 1, 2, (13, 7), "de_mirage", 10).await;
    harness.finished_match(101, 2, 1, (13, 11), "de_inferno", 4).await;

    for row in [
        stats_row(100, 10, 24, 1.4, 2, 1),
        stats_row(100, 20, 15, 1.0, 0, 0),
        stats_row(101, 10, 18, 1.2, 1, 0),
        stats_row(101, 20, 22, 1.3, 0, 3),
    ] {
        harness.store.insert_match_player_stats(row).await.unwrap();
    }
    harness
}

#[tokio::test]
async fn teams_are_listed_by_rank() {
    let harness = seeded().await;

    let (status, body) = get(&harness, "/api/teams").await;

    assert_eq!(StatusCode::OK, status);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(vec!["Vitality", "MOUZ", "Unranked"], names);
    assert_eq!(json!(1), body[0]["rank"]);
    assert_eq!(Value::Null, body[2]["rank"]);
}

#[tokio::test]
async fn unknown_entities_are_not_found() {
    let harness = seeded().await;

    for uri in ["/api/teams/999", "/api/players/999", "/api/matches/999"] {
        let (status, body) = get(&harness, uri).await;
        assert_eq!(StatusCode::NOT_FOUND, status, "{}", uri);
        assert!(body["error"].as_str().unwrap().ends_with("not found"));
    }

    let (status, body) = post_json(&harness, "/api/matches/999/stats", json!({})).await;
    assert_eq!(StatusCode::NOT_FOUND, status);
    assert_eq!(json!({"error": "Match not found"}), body);
}

#[tokio::test]
async fn team_details() {
    let harness = seeded().await;

    let (status, body) = get(&harness, "/api/teams/1").await;

    assert_eq!(StatusCode::OK, status);
    assert_eq!("Vitality", body["team"]["name"]);
    assert_eq!(2, body["players"].as_array().unwrap().len());
    assert_eq!(2, body["matches"].as_array().unwrap().len());
    assert_eq!(
        json!({
            "totalMatches": 2,
            "wins": 1,
            "losses": 1,
            "winRate": 50.0,
            // ZywOo averages 21 kills, apEX has no rows
            "avgKills": 10.5,
            "avgDeaths": 5.0,
            "totalGrenadeKills": 4,
        }),
        body["stats"]
    );
    // Newest match first, with resolved teams
    assert_eq!(100, body["matches"][0]["id"]);
    assert_eq!("MOUZ", body["matches"][0]["team2"]["name"]);
}

#[tokio::test]
async fn players_with_stats() {
    let harness = seeded().await;

    let (status, body) = get(&harness, "/api/players/20").await;

    assert_eq!(StatusCode::OK, status);
    assert_eq!("torzsi", body["name"]);
    assert_eq!("MOUZ", body["team"]["name"]);
    assert_eq!(2, body["matchesPlayed"]);
    assert_eq!(18.5, body["avgKills"]);
    assert_eq!(3, body["totalGrenadeKills"]);

    let (status, body) = get(&harness, "/api/players").await;
    assert_eq!(StatusCode::OK, status);
    assert_eq!(3, body.as_array().unwrap().len());
}

#[tokio::test]
async fn match_list_and_details() {
    let harness = seeded().await;

    let (status, body) = get(&harness, "/api/matches").await;
    assert_eq!(StatusCode::OK, status);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_i64().unwrap())
        .collect();
    assert_eq!(vec![100, 101], ids);
    assert_eq!("Vitality", body[0]["winner"]["name"]);
    assert_eq!(1, body[0]["team1Id"]);

    let (status, body) = get(&harness, "/api/matches/101").await;
    assert_eq!(StatusCode::OK, status);
    assert_eq!(101, body["match"]["id"]);
    assert_eq!(2, body["match"]["winnerId"]);
    assert_eq!(json!([]), body["rounds"]);
    assert_eq!(json!([]), body["kills"]);
    assert_eq!(2, body["playerStats"].as_array().unwrap().len());
}

#[tokio::test]
async fn demo_import_attaches_rounds_and_kills() {
    let harness = seeded().await;
    let demo = json!({
        "demoUrl": "https://www.hltv.org/download/demo/100",
        "rounds": [
            {
                "roundNumber": 1,
                "winnerTeamId": 1,
                "winReason": "elimination",
                "ctScore": 1,
                "tScore": 0,
                "kills": [
                    {"attackerId": 10, "victimId": 20, "weapon": "awp", "isHeadshot": true, "tick": 1200},
                    {"attackerId": 11, "victimId": 20, "weapon": "hegrenade", "tick": 1800},
                ],
            },
            {
                "roundNumber": 2,
                "winnerTeamId": 2,
                "kills": [
                    {"attackerId": 20, "victimId": 10, "weapon": "weapon_molotov", "tick": 4100},
                ],
            },
        ],
    });

    let (status, body) = post_json(&harness, "/api/matches/100/demo", demo.clone()).await;
    assert_eq!(StatusCode::OK, status);
    assert_eq!(json!({"success": true, "rounds": 2, "kills": 3}), body);

    let (_, details) = get(&harness, "/api/matches/100").await;
    assert_eq!(true, details["match"]["demoParsed"]);
    assert_eq!("https://www.hltv.org/download/demo/100", details["match"]["demoUrl"]);
    assert_eq!(2, details["rounds"].as_array().unwrap().len());
    assert_eq!(1, details["rounds"][0]["roundNumber"]);

    let grenade_types: Vec<Value> = details["kills"]
        .as_array()
        .unwrap()
        .iter()
        .map(|k| k["grenadeType"].clone())
        .collect();
    assert_eq!(vec![Value::Null, json!("hegrenade"), json!("molotov")], grenade_types);

    let (status, _) = post_json(&harness, "/api/matches/100/demo", demo).await;
    assert_eq!(StatusCode::CONFLICT, status);

    let (_, maps) = get(&harness, "/api/stats/maps").await;
    assert_eq!("de_mirage", maps["maps"][0]["mapName"]);
    assert_eq!(2, maps["maps"][0]["totalGrenadeDeaths"]);
    assert_eq!(1, maps["maps"][0]["heDeaths"]);
    assert_eq!(1, maps["maps"][0]["molotovDeaths"]);
}

#[tokio::test]
async fn demo_import_rejects_unknown_players() {
    let harness = seeded().await;
    let demo = json!({
        "rounds": [
            {"roundNumber": 1, "kills": [{"attackerId": 10, "victimId": 12345, "weapon": "ak47"}]},
        ],
    });

    let (status, body) = post_json(&harness, "/api/matches/101/demo", demo).await;

    assert_eq!(StatusCode::BAD_REQUEST, status);
    assert_eq!(json!({"error": "player 12345 not found"}), body);

    let stored = harness.store.get_match(101).await.unwrap().unwrap();
    assert!(!stored.demo_parsed);
    assert!(harness.store.rounds_by_match(101).await.unwrap().is_empty());
}

#[tokio::test]
async fn dashboard_summary() {
    let harness = seeded().await;

    let (status, body) = get(&harness, "/api/stats/dashboard").await;

    assert_eq!(StatusCode::OK, status);
    assert_eq!(3, body["totalTeams"]);
    assert_eq!(2, body["totalMatches"]);
    assert_eq!(0, body["totalGrenadeKills"]);
    assert_eq!(0, body["collectionProgress"]);
    assert_eq!(2, body["recentMatches"].as_array().unwrap().len());

    let killers: Vec<(&str, i64)> = body["topGrenadeKillers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| {
            let total = p["totalHEKills"].as_i64().unwrap() + p["totalMolotovKills"].as_i64().unwrap();
            (p["playerName"].as_str().unwrap(), total)
        })
        .collect();
    assert_eq!(vec![("ZywOo", 4), ("torzsi", 3)], killers);
}

#[tokio::test]
async fn grenade_and_ranking_stats() {
    let harness = seeded().await;

    let (status, body) = get(&harness, "/api/stats/grenades").await;
    assert_eq!(StatusCode::OK, status);
    assert_eq!(3, body["summary"]["totalHEKills"]);
    assert_eq!(4, body["summary"]["totalMolotovKills"]);
    assert_eq!("ZywOo", body["summary"]["mostDeadlyPlayer"]);
    assert_eq!("Vitality", body["teamStats"][0]["teamName"]);

    let (status, body) = get(&harness, "/api/stats/rankings").await;
    assert_eq!(StatusCode::OK, status);
    assert_eq!("ZywOo", body["topPlayers"][0]["name"]);
    // apEX never played and is left out
    assert_eq!(2, body["topPlayers"].as_array().unwrap().len());
    assert_eq!("ZywOo", body["topFraggers"][0]["name"]);
    assert_eq!(2, body["topTeams"].as_array().unwrap().len());
    assert_eq!(50.0, body["topTeams"][0]["winRate"]);
}

#[tokio::test]
async fn collection_overview_and_start() {
    let harness = seeded().await;
    Mock::given(method("GET"))
        .and(path("/results"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&harness.server)
        .await;

    let (status, body) = get(&harness, "/api/collection").await;
    assert_eq!(StatusCode::OK, status);
    assert_eq!(
        json!({
            "totalTeams": 3,
            "completedTeams": 0,
            "pendingTeams": 3,
            "inProgressTeams": 0,
            "totalMatches": 2,
        }),
        body["summary"]
    );

    let (status, body) = post_json(&harness, "/api/collection/start", json!({"teamId": 999})).await;
    assert_eq!(StatusCode::NOT_FOUND, status);
    assert_eq!(json!({"error": "Team not found"}), body);

    let (status, body) = post_json(&harness, "/api/collection/start", json!({"teamId": 1})).await;
    assert_eq!(StatusCode::OK, status);
    assert_eq!(true, body["success"]);

    let request = Request::post("/api/collection/start").body(Body::empty()).unwrap();
    let (status, body) = send(&harness, request).await;
    assert_eq!(StatusCode::CONFLICT, status);
    assert_eq!(json!({"error": "Collection already in progress"}), body);

    for _ in 0..100 {
        if !harness.collector.is_running() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    let (_, body) = get(&harness, "/api/collection").await;
    assert_eq!(1, body["summary"]["completedTeams"]);
    assert_eq!(2, body["summary"]["pendingTeams"]);
    assert_eq!("Vitality", body["jobs"][0]["team"]["name"]);
    assert_eq!("completed", body["jobs"][0]["status"]);
}

#[tokio::test]
async fn malformed_start_body_is_rejected() {
    let harness = seeded().await;

    let (status, body) = post_json(&harness, "/api/collection/start", json!({"teamId": "abc"})).await;
    assert_eq!(StatusCode::BAD_REQUEST, status);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));

    let request = Request::post("/api/collection/start")
        .header("content-type", "application/json")
        .body(Body::from("{teamId"))
        .unwrap();
    let (status, _) = send(&harness, request).await;
    assert_eq!(StatusCode::BAD_REQUEST, status);

    assert!(!harness.collector.is_running());
    assert!(harness.store.collection_jobs().await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_requests_are_json_errors() {
    let harness = seeded().await;

    let (status, body) = post_json(&harness, "/api/matches/100/demo", json!({"rounds": "nope"})).await;
    assert_eq!(StatusCode::BAD_REQUEST, status);
    assert!(body["error"].is_string());
    assert!(!harness.store.get_match(100).await.unwrap().unwrap().demo_parsed);

    for uri in ["/api/teams/abc", "/api/players/abc", "/api/matches/abc"] {
        let (status, body) = get(&harness, uri).await;
        assert_eq!(StatusCode::BAD_REQUEST, status, "{}", uri);
        assert!(body["error"].is_string(), "{}", uri);
    }

    let request = Request::post("/api/matches/abc/stats").body(Body::empty()).unwrap();
    let (status, body) = send(&harness, request).await;
    assert_eq!(StatusCode::BAD_REQUEST, status);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn fetch_teams_reports_count() {
    let harness = Harness::new().await;
    Mock::given(method("GET"))
        .and(path("/ranking"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"place": 1, "team": {"id": 9565, "name": "Vitality"}},
        ])))
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/team/9565"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9565,
            "name": "Vitality",
            "players": [{"id": 11893, "name": "ZywOo"}],
        })))
        .mount(&harness.server)
        .await;

    let (status, body) = post_json(&harness, "/api/teams/fetch", json!({})).await;

    assert_eq!(StatusCode::OK, status);
    assert_eq!(json!({"success": true, "count": 1}), body);
    assert_eq!(1, harness.store.players().await.unwrap().len());
}

#[tokio::test]
async fn provider_failures_are_internal_errors() {
    let harness = Harness::new().await;
    Mock::given(method("GET"))
        .and(path("/ranking"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&harness.server)
        .await;

    let (status, body) = post_json(&harness, "/api/teams/fetch", json!({})).await;

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status);
    assert_eq!(json!({"error": "Failed to fetch teams"}), body);
}
