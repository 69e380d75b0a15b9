//! Attaches rounds and kill events parsed from a match demo to a stored match.

use std::collections::BTreeSet;

use common::api::{DemoImport, ImportedDemo};
use common::{Kill, Round};

use crate::store::{Store, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("match {0} not found")]
    UnknownMatch(i32),
    #[error("demo of match {0} was already imported")]
    AlreadyParsed(i32),
    #[error("player {0} not found")]
    UnknownPlayer(i32),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The grenade type stored for a kill made with `weapon`, if it was a lethal
/// grenade.
pub fn grenade_type(weapon: Option<&str>) -> Option<String> {
    let weapon = weapon?;
    let kind = analysis::grenades::classify(weapon)?;
    if !kind.is_lethal() {
        return None;
    }

    let name = weapon.trim().to_ascii_lowercase();
    Some(match name.strip_prefix("weapon_") {
        Some(stripped) => stripped.to_owned(),
        None => name,
    })
}

#[tracing::instrument(skip(store, demo), fields(rounds = demo.rounds.len()))]
pub async fn import(
    store: &dyn Store,
    match_id: i32,
    demo: DemoImport,
) -> Result<ImportedDemo, ImportError> {
    let stored = store
        .get_match(match_id)
        .await?
        .ok_or(ImportError::UnknownMatch(match_id))?;
    if stored.demo_parsed {
        return Err(ImportError::AlreadyParsed(match_id));
    }

    let player_ids: BTreeSet<i32> = demo
        .rounds
        .iter()
        .flat_map(|r| r.kills.iter())
        .flat_map(|k| [k.attacker_id, k.victim_id])
        .flatten()
        .collect();
    for id in player_ids {
        if store.player(id).await?.is_none() {
            return Err(ImportError::UnknownPlayer(id));
        }
    }

    let mut rounds = Vec::with_capacity(demo.rounds.len());
    let mut kills = Vec::new();
    for demo_round in demo.rounds {
        let round_id = uuid::Uuid::now_v7().to_string();

        kills.extend(demo_round.kills.into_iter().map(|k| {
            let grenade_type = grenade_type(k.weapon.as_deref());
            Kill {
                id: uuid::Uuid::now_v7().to_string(),
                round_id: Some(round_id.clone()),
                match_id,
                attacker_id: k.attacker_id,
                victim_id: k.victim_id,
                weapon: k.weapon,
                is_headshot: k.is_headshot,
                is_wallbang: k.is_wallbang,
                is_grenade: grenade_type.is_some(),
                grenade_type,
                position_x: k.position_x,
                position_y: k.position_y,
                position_z: k.position_z,
                tick: k.tick,
            }
        }));

        rounds.push(Round {
            id: round_id,
            match_id,
            round_number: demo_round.round_number,
            winner_team_id: demo_round
                .winner_team_id
                .filter(|id| stored.team1_id == Some(*id) || stored.team2_id == Some(*id)),
            win_reason: demo_round.win_reason,
            ct_score: demo_round.ct_score,
            t_score: demo_round.t_score,
        });
    }

    let round_count = store.insert_rounds(rounds).await?;
    let kill_count = store.insert_kills(kills).await?;
    store.mark_demo_parsed(match_id, demo.demo_url).await?;

    tracing::info!("Imported {} rounds with {} kills", round_count, kill_count);
    Ok(ImportedDemo {
        success: true,
        rounds: round_count,
        kills: kill_count,
    })
}
