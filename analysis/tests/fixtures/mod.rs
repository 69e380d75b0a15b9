#![allow(dead_code)]

use common::{Kill, Match, MatchPlayerStats, Player, Team};

pub fn team(id: i32, name: &str, rank: i32) -> Team {
    Team {
        id,
        name: name.to_owned(),
        logo: None,
        rank: Some(rank),
        country: None,
        hltv_url: None,
        last_updated: None,
    }
}

pub fn player(id: i32, name: &str, team_id: Option<i32>) -> Player {
    Player {
        id,
        name: name.to_owned(),
        real_name: None,
        team_id,
        country: None,
        avatar: None,
        hltv_url: None,
    }
}

pub fn finished_match(id: i32, team1: i32, team2: i32, score: (i32, i32), map: &str) -> Match {
    Match {
        id,
        team1_id: Some(team1),
        team2_id: Some(team2),
        team1_score: Some(score.0),
        team2_score: Some(score.1),
        winner_id: analysis::matches::winner(Some(team1), Some(team2), Some(score.0), Some(score.1)),
        map_name: Some(map.to_owned()),
        event_name: None,
        date: None,
        hltv_url: None,
        demo_url: None,
        demo_parsed: false,
        stats_collected: false,
    }
}

pub fn stats_row(match_id: i32, player_id: i32, kills: i32, deaths: i32, rating: Option<f64>) -> MatchPlayerStats {
    MatchPlayerStats {
        id: format!("{}-{}", match_id, player_id),
        match_id,
        player_id,
        kills,
        deaths,
        rating,
        ..Default::default()
    }
}

pub fn grenade_row(match_id: i32, player_id: i32, he: i32, molotov: i32) -> MatchPlayerStats {
    MatchPlayerStats {
        id: format!("{}-{}-nades", match_id, player_id),
        match_id,
        player_id,
        he_grenade_kills: he,
        molotov_kills: molotov,
        he_grenade_damage: he * 60,
        he_grenades_bought: he + 2,
        ..Default::default()
    }
}

pub fn kill(id: &str, match_id: i32, grenade_type: Option<&str>) -> Kill {
    Kill {
        id: id.to_owned(),
        round_id: None,
        match_id,
        attacker_id: None,
        victim_id: None,
        weapon: grenade_type.map(str::to_owned),
        is_headshot: false,
        is_wallbang: false,
        is_grenade: grenade_type.is_some(),
        grenade_type: grenade_type.map(str::to_owned),
        position_x: None,
        position_y: None,
        position_z: None,
        tick: None,
    }
}
