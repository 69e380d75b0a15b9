mod fixtures;

use analysis::{players, rankings};
use fixtures::*;
use pretty_assertions::assert_eq;

#[test]
fn ranks_players_and_teams() {
    let teams = vec![team(1, "Spirit", 1), team(2, "MOUZ", 2), team(3, "Liquid", 3)];
    let roster = vec![
        player(10, "donk", Some(1)),
        player(11, "sh1ro", Some(1)),
        player(20, "torzsi", Some(2)),
        player(30, "benched", Some(3)),
    ];
    let matches = vec![
        finished_match(1, 1, 2, (13, 9), "de_ancient"),
        finished_match(2, 2, 1, (13, 11), "de_nuke"),
        finished_match(3, 1, 2, (13, 3), "de_dust2"),
    ];
    let stats = vec![
        stats_row(1, 10, 30, 12, Some(1.6)),
        stats_row(1, 11, 18, 10, Some(1.2)),
        stats_row(1, 20, 20, 15, Some(1.3)),
        grenade_row(2, 11, 2, 0),
    ];

    let with_stats = players::with_stats(&roster, &teams, &stats);
    let result = rankings::compute(&with_stats, &teams, &matches);

    assert_eq!(
        vec!["donk", "torzsi", "sh1ro"],
        result.top_players.iter().map(|p| p.player.name.as_str()).collect::<Vec<_>>()
    );
    assert_eq!(
        vec!["donk", "torzsi", "sh1ro"],
        result.top_fraggers.iter().map(|p| p.player.name.as_str()).collect::<Vec<_>>()
    );
    assert_eq!(
        vec!["sh1ro"],
        result.top_grenade_killers.iter().map(|p| p.player.name.as_str()).collect::<Vec<_>>()
    );

    // Liquid has no matches and is left out
    assert_eq!(2, result.top_teams.len());
    let spirit = &result.top_teams[0];
    assert_eq!("Spirit", spirit.team.name);
    assert_eq!(3, spirit.total_matches);
    assert!((spirit.win_rate - 200.0 / 3.0).abs() < 1e-9);
    assert!((spirit.avg_rating - 1.1).abs() < 1e-9);

    let mouz = &result.top_teams[1];
    assert!((mouz.win_rate - 100.0 / 3.0).abs() < 1e-9);
}

#[test]
fn truncates_to_top_twenty() {
    let roster: Vec<_> = (0..30).map(|i| player(i, &format!("p{}", i), None)).collect();
    let stats: Vec<_> = (0..30).map(|i| stats_row(1, i, i, 0, Some(i as f64 / 10.0))).collect();

    let with_stats = players::with_stats(&roster, &[], &stats);
    let result = rankings::compute(&with_stats, &[], &[]);

    assert_eq!(rankings::TOP_PLAYERS, result.top_players.len());
    assert_eq!("p29", result.top_players[0].player.name);
    assert_eq!("p10", result.top_players[19].player.name);
    assert!(result.top_teams.is_empty());
}
