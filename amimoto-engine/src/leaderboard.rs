//! Leaderboard boundary.
//!
//! The engine stays transport-agnostic: `LeaderboardClient` is the seam a
//! host implements over whatever backend it has, and `MemoryLeaderboard` is
//! the in-process implementation used for offline play and tests. A client
//! failure degrades to a deterministic placeholder board.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::score::compute_score;
use crate::state::GameState;
use crate::tier::Difficulty;

/// One row on the board. `rank` is assigned by the board, never the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    #[serde(default)]
    pub rank: Option<u32>,
    pub company_name: String,
    pub score: i64,
    pub difficulty: Difficulty,
    pub level: u8,
    pub total_profit: i64,
}

impl ScoreEntry {
    /// Snapshot a finished campaign into a submittable entry.
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        Self {
            rank: None,
            company_name: state.company_name.clone(),
            score: compute_score(state),
            difficulty: state.difficulty,
            level: state.level,
            total_profit: state.total_profit,
        }
    }
}

/// Host-provided score storage.
pub trait LeaderboardClient {
    /// Record an entry. Failure is reported, never panicked over.
    fn submit(&mut self, entry: ScoreEntry) -> bool;

    /// Top entries in descending score order, ranks filled in, at most
    /// `limit` rows. `None` signals the backend is unreachable.
    fn fetch(&self, limit: usize) -> Option<Vec<ScoreEntry>>;
}

/// Fetch from the client, falling back to the placeholder board when the
/// backend is unavailable.
pub fn fetch_or_fallback<C: LeaderboardClient>(client: &C, limit: usize) -> Vec<ScoreEntry> {
    client.fetch(limit).unwrap_or_else(|| fallback_board(limit))
}

/// In-process board. Keeps every submission and ranks on read.
#[derive(Debug, Default)]
pub struct MemoryLeaderboard {
    entries: Vec<ScoreEntry>,
}

impl MemoryLeaderboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LeaderboardClient for MemoryLeaderboard {
    fn submit(&mut self, entry: ScoreEntry) -> bool {
        self.entries.push(entry);
        true
    }

    fn fetch(&self, limit: usize) -> Option<Vec<ScoreEntry>> {
        let mut board = self.entries.clone();
        board.sort_by(|a, b| b.score.cmp(&a.score));
        board.truncate(limit);
        for (index, entry) in board.iter_mut().enumerate() {
            entry.rank = Some(index as u32 + 1);
        }
        Some(board)
    }
}

const FALLBACK_NAMES: [&str; 10] = [
    "能登漁業(株)",
    "加賀水産",
    "輪島漁業組合",
    "七尾湾漁業",
    "珠洲水産",
    "石川ブリ本舗",
    "白山丸",
    "志賀の海",
    "金沢市場",
    "能登魚市場",
];

/// Deterministic placeholder board shown when no backend answers. Fixed
/// seed, so the same board appears on every offline launch.
#[must_use]
pub fn fallback_board(limit: usize) -> Vec<ScoreEntry> {
    let mut rng = ChaCha20Rng::seed_from_u64(0);
    let mut board: Vec<ScoreEntry> = FALLBACK_NAMES
        .iter()
        .enumerate()
        .map(|(index, name)| ScoreEntry {
            rank: None,
            company_name: (*name).to_string(),
            score: rng.gen_range(5_000_000..20_000_000),
            difficulty: if index % 3 == 0 {
                Difficulty::Hard
            } else {
                Difficulty::Normal
            },
            level: rng.gen_range(3..=5),
            total_profit: rng.gen_range(3_000_000..23_000_000),
        })
        .collect();
    board.sort_by(|a, b| b.score.cmp(&a.score));
    board.truncate(limit);
    for (index, entry) in board.iter_mut().enumerate() {
        entry.rank = Some(index as u32 + 1);
    }
    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    struct OfflineClient;

    impl LeaderboardClient for OfflineClient {
        fn submit(&mut self, _entry: ScoreEntry) -> bool {
            false
        }

        fn fetch(&self, _limit: usize) -> Option<Vec<ScoreEntry>> {
            None
        }
    }

    #[test]
    fn entry_snapshot_carries_the_score() {
        let catalog = Catalog::default_config();
        let state = GameState::new("能登水産", Difficulty::Normal, &catalog, 1);
        let entry = ScoreEntry::from_state(&state);
        assert_eq!(entry.company_name, "能登水産");
        assert_eq!(entry.score, compute_score(&state));
        assert_eq!(entry.rank, None);
    }

    #[test]
    fn memory_board_ranks_descending() {
        let mut board = MemoryLeaderboard::new();
        for (name, score) in [("a", 100), ("b", 300), ("c", 200)] {
            board.submit(ScoreEntry {
                rank: None,
                company_name: name.to_string(),
                score,
                difficulty: Difficulty::Normal,
                level: 1,
                total_profit: score,
            });
        }
        let rows = board.fetch(2).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].company_name, "b");
        assert_eq!(rows[0].rank, Some(1));
        assert_eq!(rows[1].company_name, "c");
        assert_eq!(rows[1].rank, Some(2));
    }

    #[test]
    fn fallback_board_is_stable_and_ranked() {
        let first = fetch_or_fallback(&OfflineClient, 10);
        let second = fallback_board(10);
        assert_eq!(first, second);
        assert_eq!(first.len(), 10);
        assert!(first.windows(2).all(|pair| pair[0].score >= pair[1].score));
        assert_eq!(first[0].rank, Some(1));
    }
}
