use common::{Kill, Match, MatchPlayerStats, Player, Team};

fn main() {
    divan::main();
}

struct Tables {
    teams: Vec<Team>,
    players: Vec<Player>,
    matches: Vec<Match>,
    stats: Vec<MatchPlayerStats>,
    kills: Vec<Kill>,
}

const MAPS: [&str; 7] = [
    "de_mirage",
    "de_inferno",
    "de_nuke",
    "de_ancient",
    "de_anubis",
    "de_dust2",
    "de_train",
];

fn tables(team_count: i32) -> Tables {
    let teams: Vec<Team> = (0..team_count)
        .map(|id| Team {
            id,
            name: format!("team-{}", id),
            logo: None,
            rank: Some(id + 1),
            country: None,
            hltv_url: None,
            last_updated: None,
        })
        .collect();

    let players: Vec<Player> = (0..team_count * 5)
        .map(|id| Player {
            id,
            name: format!("player-{}", id),
            real_name: None,
            team_id: Some(id / 5),
            country: None,
            avatar: None,
            hltv_url: None,
        })
        .collect();

    let matches: Vec<Match> = (0..team_count * 50)
        .map(|id| {
            let team1 = id % team_count;
            let team2 = (id + 1) % team_count;
            Match {
                id,
                team1_id: Some(team1),
                team2_id: Some(team2),
                team1_score: Some(13),
                team2_score: Some(id % 13),
                winner_id: Some(team1),
                map_name: Some(MAPS[id as usize % MAPS.len()].to_owned()),
                event_name: None,
                date: None,
                hltv_url: None,
                demo_url: None,
                demo_parsed: true,
                stats_collected: true,
            }
        })
        .collect();

    let stats: Vec<MatchPlayerStats> = matches
        .iter()
        .flat_map(|m| {
            let team1 = m.team1_id.unwrap_or_default();
            (team1 * 5..team1 * 5 + 5).map(move |player_id| MatchPlayerStats {
                id: format!("{}-{}", m.id, player_id),
                match_id: m.id,
                player_id,
                kills: (m.id + player_id) % 30,
                deaths: (m.id * player_id) % 25,
                rating: Some(1.0),
                he_grenade_kills: m.id % 2,
                molotov_kills: player_id % 2,
                ..Default::default()
            })
        })
        .collect();

    let kills: Vec<Kill> = matches
        .iter()
        .flat_map(|m| {
            (0..20).map(move |n| Kill {
                id: format!("{}-{}", m.id, n),
                round_id: None,
                match_id: m.id,
                attacker_id: None,
                victim_id: None,
                weapon: None,
                is_headshot: false,
                is_wallbang: false,
                is_grenade: n % 4 == 0,
                grenade_type: Some(if n % 8 == 0 { "hegrenade" } else { "molotov" }.to_owned()),
                position_x: None,
                position_y: None,
                position_z: None,
                tick: None,
            })
        })
        .collect();

    Tables {
        teams,
        players,
        matches,
        stats,
        kills,
    }
}

#[divan::bench(args = [10, 30])]
fn players_with_stats(bencher: divan::Bencher, team_count: i32) {
    let data = tables(team_count);

    bencher.bench(|| {
        analysis::players::with_stats(
            divan::black_box(&data.players),
            divan::black_box(&data.teams),
            divan::black_box(&data.stats),
        )
    });
}

#[divan::bench(args = [10, 30])]
fn map_grenade_deaths(bencher: divan::Bencher, team_count: i32) {
    let data = tables(team_count);

    bencher.bench(|| {
        analysis::maps::grenade_deaths(divan::black_box(&data.matches), divan::black_box(&data.kills))
    });
}

#[divan::bench(args = [10, 30])]
fn rankings(bencher: divan::Bencher, team_count: i32) {
    let data = tables(team_count);
    let players = analysis::players::with_stats(&data.players, &data.teams, &data.stats);

    bencher.bench(|| {
        analysis::rankings::compute(
            divan::black_box(&players),
            divan::black_box(&data.teams),
            divan::black_box(&data.matches),
        )
    });
}
