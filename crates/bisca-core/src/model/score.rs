use crate::model::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};

/// Points a player takes for one round: how far the declaration missed.
pub const fn round_score(declaration: u8, tricks_won: u8) -> u32 {
    declaration.abs_diff(tricks_won) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundScore {
    pub player: PlayerId,
    pub declaration: u8,
    pub tricks_won: u8,
    pub points: u32,
}

/// Adds each player's round score to their running total.
pub fn apply_round(players: &mut [Player]) -> Vec<RoundScore> {
    players
        .iter_mut()
        .map(|player| {
            let declaration = player.declaration.unwrap_or(0);
            let points = round_score(declaration, player.tricks_won);
            player.score += points;
            RoundScore {
                player: player.id,
                declaration,
                tricks_won: player.tricks_won,
                points,
            }
        })
        .collect()
}

/// Players ordered best first (lowest total), seat order breaking ties.
pub fn standings(players: &[Player]) -> Vec<(PlayerId, u32)> {
    let mut table: Vec<_> = players.iter().map(|p| (p.id, p.score)).collect();
    table.sort_by_key(|&(id, score)| (score, id));
    table
}

pub fn leaders(players: &[Player]) -> Vec<PlayerId> {
    let Some(best) = players.iter().map(|p| p.score).min() else {
        return Vec::new();
    };
    players
        .iter()
        .filter(|p| p.score == best)
        .map(|p| p.id)
        .collect()
}
