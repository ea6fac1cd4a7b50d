//! The round engine: phase state machine and turn sequencing.
//!
//! `RoundEngine` owns the draft pools and both player boards and exposes two
//! commands, `draft` and `place`. Everything else, including the end-of-round
//! sequence, happens automatically inside those commands.
//!
//! ## Turn flow
//!
//! 1. `draft(pool, color)` takes tiles into the current player's hand. If no
//!    line can take that color the hand is discarded to the overflow track
//!    at once (a forced move) and the turn ends.
//! 2. `place(line)` stages the hand; leftovers go to the overflow track.
//! 3. When the pools run dry the round is tiled, scored and either the game
//!    ends or the next round is prepared.
//!
//! Between commands the phase is always `Drafting` or `GameOver`; `Tiling`
//! and `Preparing` only exist inside the end-of-round sequence.

use im::Vector;
use smallvec::SmallVec;
use tracing::{debug, error, info, warn};

use super::outcome::{DraftOutcome, GameResult, MarkerLocation, TurnEnd};
use super::snapshot::{GameSnapshot, PlayerSnapshot};
use crate::board::{DraftPool, GridCells, Hand, Lane, LineId, PlayerBoard, PoolId, RoundScore};
use crate::board::{LINE_COUNT, TRACK_CAPACITY};
use crate::core::{
    GameConfig, GameRng, MoveKind, MoveRecord, Phase, PlayerId, PlayerMap, Result, RulesError,
};
use crate::tiles::{Color, Tile, TileSupply};

/// Two-player game state and rules.
#[derive(Clone, Debug)]
pub struct RoundEngine {
    config: GameConfig,
    pool: DraftPool,
    boards: PlayerMap<PlayerBoard>,
    phase: Phase,
    current: PlayerId,
    hand: Hand,
    marker: MarkerLocation,
    moves_this_round: u32,
    moves_this_game: u32,
    rounds_played: u32,
    /// Records in the current round, for `MoveRecord::sequence`.
    sequence: u32,
    history: Vector<MoveRecord>,
    last_round: Option<PlayerMap<RoundScore>>,
}

impl RoundEngine {
    /// Start a game: fill the pools and let player 1 draft.
    pub fn new(config: GameConfig) -> Result<Self> {
        let rng = GameRng::new(config.seed);
        let supply = TileSupply::stacked(rng, &config.draw_order)?;
        let pool = DraftPool::new(supply)?;
        info!(seed = config.seed, stacked = config.draw_order.len(), "game started");

        Ok(Self {
            config,
            pool,
            boards: PlayerMap::with_default(),
            phase: Phase::Drafting,
            current: PlayerId::ONE,
            hand: Hand::new(),
            marker: MarkerLocation::Pool,
            moves_this_round: 0,
            moves_this_game: 0,
            rounds_played: 0,
            sequence: 0,
            history: Vector::new(),
            last_round: None,
        })
    }

    /// Start a game from a seed with a fully shuffled bag.
    pub fn with_seed(seed: u64) -> Result<Self> {
        Self::new(GameConfig::new(seed))
    }

    // === Commands ===

    /// Take every tile of `color` from `pool` into the current player's hand.
    ///
    /// If the player cannot place that color on any line, the hand goes
    /// straight to their overflow track and the turn ends.
    pub fn draft(&mut self, pool: PoolId, color: Color) -> Result<DraftOutcome> {
        self.require_drafting("draft")?;
        if !self.hand.is_empty() {
            return Err(RulesError::HandNotEmpty);
        }

        let hand = self.pool.take(pool, color)?;
        let player = self.current;
        let taken = hand.iter().filter(|t| !t.is_marker()).count() as u8;
        let marker = hand.iter().any(|t| t.is_marker());
        if marker {
            self.marker = MarkerLocation::Hand(player);
        }
        debug!(%player, %pool, %color, taken, marker, "drafted");
        self.record(MoveKind::Draft {
            pool,
            color,
            taken,
            marker,
        });
        self.hand = hand;

        if self.boards[player].can_place(color) {
            return Ok(DraftOutcome::Held { taken, marker });
        }

        warn!(%player, %color, "no line can take the drafted tiles, discarding hand");
        let hand = std::mem::take(&mut self.hand);
        self.boards[player].discard(&hand);
        if marker {
            self.marker = MarkerLocation::Track(player);
        }
        self.record(MoveKind::Forced {
            discarded: hand.len() as u8,
        });
        self.count_move();
        self.end_turn().map(DraftOutcome::Forced)
    }

    /// Commit the hand to `line`.
    ///
    /// Rejected unless some tile in hand may go both on the lane and on the
    /// grid row behind it. Leftovers and the marker go to the overflow track.
    pub fn place(&mut self, line: LineId) -> Result<TurnEnd> {
        self.require_drafting("place")?;
        if self.hand.is_empty() {
            return Err(RulesError::EmptyHand);
        }

        let player = self.current;
        let placement = self.boards[player].stage(&self.hand, line)?;
        if self.marker == MarkerLocation::Hand(player) {
            self.marker = MarkerLocation::Track(player);
        }
        self.hand.clear();
        debug!(
            %player,
            %line,
            staged = placement.staged,
            overflowed = placement.overflowed,
            "placed"
        );
        self.record(MoveKind::Place {
            line,
            staged: placement.staged,
            overflowed: placement.overflowed,
        });
        self.count_move();
        self.end_turn()
    }

    // === Turn sequencing ===

    fn require_drafting(&self, action: &'static str) -> Result<()> {
        if self.phase == Phase::Drafting {
            Ok(())
        } else {
            Err(RulesError::WrongPhase {
                action,
                expected: Phase::Drafting,
                actual: self.phase,
            })
        }
    }

    fn record(&mut self, kind: MoveKind) {
        self.history.push_back(MoveRecord::new(
            self.current,
            kind,
            self.rounds_played,
            self.sequence,
        ));
        self.sequence += 1;
    }

    fn count_move(&mut self) {
        self.moves_this_round += 1;
        self.moves_this_game += 1;
    }

    fn end_turn(&mut self) -> Result<TurnEnd> {
        if self.pool.is_empty() {
            return self.end_of_round();
        }
        self.current = self.current.other();
        Ok(TurnEnd::NextPlayer(self.current))
    }

    fn end_of_round(&mut self) -> Result<TurnEnd> {
        self.phase = Phase::Tiling;
        let mut scores: PlayerMap<RoundScore> = PlayerMap::with_default();
        for (player, board) in self.boards.iter_mut() {
            scores[player] = board.score_round()?;
        }
        info!(
            round = self.rounds_played,
            p1_gained = scores[PlayerId::ONE].gained,
            p1_penalty = scores[PlayerId::ONE].penalty,
            p2_gained = scores[PlayerId::TWO].gained,
            p2_penalty = scores[PlayerId::TWO].penalty,
            "round scored"
        );
        self.last_round = Some(scores);

        if self.boards.iter().any(|(_, b)| b.grid().is_row_complete()) {
            self.phase = Phase::GameOver;
            let result = self.outcome();
            info!(
                ?result,
                p1 = self.boards[PlayerId::ONE].score(),
                p2 = self.boards[PlayerId::TWO].score(),
                "game over"
            );
            return Ok(TurnEnd::GameOver(result));
        }

        self.phase = Phase::Preparing;
        let starter = self.reclaim_marker()?;
        for (_, board) in self.boards.iter_mut() {
            board.reset_for_round();
        }
        self.pool.reset()?;

        self.rounds_played += 1;
        self.moves_this_round = 0;
        self.sequence = 0;
        self.current = starter;
        self.phase = Phase::Drafting;
        info!(round = self.rounds_played, %starter, "next round prepared");
        Ok(TurnEnd::NextRound {
            round: self.rounds_played,
            starter,
        })
    }

    /// Move the marker back to the overflow pool and return the next starter.
    fn reclaim_marker(&mut self) -> Result<PlayerId> {
        match self.marker {
            MarkerLocation::Track(holder) => {
                let tile = self.boards[holder]
                    .track_mut()
                    .take_marker()
                    .map_err(|_| {
                        error!(%holder, "marker recorded on a track that does not hold it");
                        RulesError::NoMarkerHolder
                    })?;
                self.pool.return_marker(tile)?;
                self.marker = MarkerLocation::Pool;
                Ok(holder)
            }
            // never drafted this round; it stays put and play simply alternates
            MarkerLocation::Pool => Ok(self.current.other()),
            MarkerLocation::Supply | MarkerLocation::Hand(_) => {
                error!(location = ?self.marker, "no player holds the marker at round end");
                Err(RulesError::NoMarkerHolder)
            }
        }
    }

    fn outcome(&self) -> GameResult {
        let one = self.boards[PlayerId::ONE].score();
        let two = self.boards[PlayerId::TWO].score();
        match one.cmp(&two) {
            std::cmp::Ordering::Greater => GameResult::Winner(PlayerId::ONE),
            std::cmp::Ordering::Less => GameResult::Winner(PlayerId::TWO),
            std::cmp::Ordering::Equal => GameResult::Draw,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Tiles drafted and not yet placed.
    #[must_use]
    pub fn hand(&self) -> Vector<Tile> {
        self.hand.iter().copied().collect()
    }

    /// Contents of one pool.
    #[must_use]
    pub fn pool(&self, pool: PoolId) -> Vector<Tile> {
        self.pool.show(pool)
    }

    /// The draft area, including the tile supply behind it.
    #[must_use]
    pub fn draft_pool(&self) -> &DraftPool {
        &self.pool
    }

    #[must_use]
    pub fn board(&self, player: PlayerId) -> &PlayerBoard {
        &self.boards[player]
    }

    /// Staging lanes of `player`, `line1` first.
    #[must_use]
    pub fn lanes(&self, player: PlayerId) -> [Lane; LINE_COUNT] {
        self.boards[player].rack().snapshot()
    }

    /// Scoring grid of `player`.
    #[must_use]
    pub fn grid(&self, player: PlayerId) -> GridCells {
        self.boards[player].grid().snapshot()
    }

    /// Overflow track of `player`, newest tile first.
    #[must_use]
    pub fn track(&self, player: PlayerId) -> [Option<Tile>; TRACK_CAPACITY] {
        self.boards[player].track().snapshot()
    }

    #[must_use]
    pub fn score(&self, player: PlayerId) -> u32 {
        self.boards[player].score()
    }

    /// Moves (placements and forced discards) in the current round.
    #[must_use]
    pub fn moves_this_round(&self) -> u32 {
        self.moves_this_round
    }

    /// Moves over the whole game.
    #[must_use]
    pub fn moves_this_game(&self) -> u32 {
        self.moves_this_game
    }

    /// Rounds completed.
    #[must_use]
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Every draft, placement and forced discard so far.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    #[must_use]
    pub fn marker_location(&self) -> MarkerLocation {
        self.marker
    }

    /// Per-player points from the most recent end of round.
    #[must_use]
    pub fn last_round_scores(&self) -> Option<&PlayerMap<RoundScore>> {
        self.last_round.as_ref()
    }

    /// Every `(pool, color)` the current player may draft right now.
    #[must_use]
    pub fn legal_drafts(&self) -> Vec<(PoolId, Color)> {
        if self.phase != Phase::Drafting || !self.hand.is_empty() {
            return Vec::new();
        }
        PoolId::all()
            .flat_map(|pool| {
                self.pool
                    .colors_in(pool)
                    .into_iter()
                    .map(move |color| (pool, color))
            })
            .collect()
    }

    /// Lines the current hand may be placed on.
    #[must_use]
    pub fn legal_lines(&self) -> SmallVec<[LineId; 5]> {
        if self.phase != Phase::Drafting {
            return SmallVec::new();
        }
        self.boards[self.current].legal_lines(&self.hand)
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Final result once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.is_over().then(|| self.outcome())
    }

    /// Serializable picture of the whole game.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            current_player: self.current,
            rounds_played: self.rounds_played,
            moves_this_round: self.moves_this_round,
            moves_this_game: self.moves_this_game,
            hand: self.hand(),
            pools: PoolId::all().map(|p| self.pool.show(p)).collect(),
            players: self.boards.map(|_, board| PlayerSnapshot::from(board)),
            marker: self.marker,
        }
    }
}

impl std::fmt::Display for RoundEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Round {} | {} | {} to move",
            self.rounds_played + 1,
            self.phase,
            self.current
        )?;
        for (player, board) in self.boards.iter() {
            writeln!(f, "{player}: {} points", board.score())?;
        }
        writeln!(
            f,
            "Moves: {} this round, {} this game",
            self.moves_this_round, self.moves_this_game
        )?;
        write!(f, "{}", self.pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::LaneState;
    use crate::core::ErrorKind;

    fn opening() -> Vec<Color> {
        use Color::*;
        vec![
            Blue, Blue, Blue, Yellow, // pool 1
            Red, Red, Red, Red, // pool 2
            Black, Black, Black, Black, // pool 3
            White, White, White, White, // pool 4
            Yellow, Yellow, Yellow, Yellow, // pool 5
        ]
    }

    fn engine() -> RoundEngine {
        RoundEngine::new(GameConfig::new(42).with_draw_order(opening())).unwrap()
    }

    fn pool(n: usize) -> PoolId {
        PoolId::new(n).unwrap()
    }

    fn line(n: usize) -> LineId {
        LineId::new(n - 1).unwrap()
    }

    /// Draft the first legal option and place on the last legal line.
    fn play_turn(engine: &mut RoundEngine) -> TurnEnd {
        let (p, c) = engine.legal_drafts()[0];
        match engine.draft(p, c).unwrap() {
            DraftOutcome::Forced(end) => end,
            DraftOutcome::Held { .. } => {
                let target = *engine.legal_lines().last().unwrap();
                engine.place(target).unwrap()
            }
        }
    }

    #[test]
    fn test_new_game() {
        let engine = engine();
        assert_eq!(engine.phase(), Phase::Drafting);
        assert_eq!(engine.current_player(), PlayerId::ONE);
        assert!(engine.hand().is_empty());
        assert_eq!(engine.marker_location(), MarkerLocation::Pool);
        assert_eq!(engine.pool(PoolId::OVERFLOW), Vector::unit(Tile::Marker));
        // pool 1 offers blue and yellow, the overflow pool only the marker
        assert_eq!(engine.legal_drafts().len(), 6);
        assert!(engine.legal_lines().is_empty());
        assert_eq!(engine.result(), None);
    }

    #[test]
    fn test_draft_then_place_passes_turn() {
        let mut engine = engine();

        let outcome = engine.draft(pool(1), Color::Blue).unwrap();
        assert_eq!(outcome, DraftOutcome::Held { taken: 3, marker: false });
        assert_eq!(engine.hand().len(), 3);
        assert_eq!(engine.legal_lines().len(), 5);

        let end = engine.place(line(3)).unwrap();

        assert_eq!(end, TurnEnd::NextPlayer(PlayerId::TWO));
        assert!(engine.hand().is_empty());
        assert_eq!(engine.lanes(PlayerId::ONE)[2].state(), LaneState::Full(Color::Blue));
        assert_eq!(engine.moves_this_round(), 1);
        assert_eq!(engine.history().len(), 2);
    }

    #[test]
    fn test_draft_with_hand_held_rejected() {
        let mut engine = engine();
        engine.draft(pool(1), Color::Blue).unwrap();

        let err = engine.draft(pool(2), Color::Red).unwrap_err();

        assert_eq!(err, RulesError::HandNotEmpty);
        assert_eq!(err.kind(), ErrorKind::StateConflict);
        assert_eq!(engine.pool(pool(2)).len(), 4);
        assert!(engine.legal_drafts().is_empty());
    }

    #[test]
    fn test_place_without_hand_rejected() {
        let mut engine = engine();
        assert_eq!(engine.place(line(1)), Err(RulesError::EmptyHand));
    }

    #[test]
    fn test_illegal_place_leaves_state_untouched() {
        let mut engine = engine();
        engine.draft(pool(1), Color::Blue).unwrap();
        engine.place(line(1)).unwrap();
        engine.draft(pool(2), Color::Red).unwrap();
        engine.place(line(2)).unwrap();
        engine.draft(pool(3), Color::Black).unwrap();
        let before = engine.snapshot();

        // line1 already full for player 1
        let err = engine.place(line(1)).unwrap_err();

        assert_eq!(err, RulesError::IllegalMove { line: line(1) });
        assert_eq!(err.kind(), ErrorKind::IllegalMove);
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_forced_move_discards_hand() {
        let mut engine = engine();
        {
            let rack = engine.boards[PlayerId::ONE].rack_mut();
            for n in 1..=5 {
                rack.place(&[Tile::Colored(Color::Red)], line(n)).unwrap();
            }
        }

        let outcome = engine.draft(pool(1), Color::Blue).unwrap();

        assert_eq!(outcome, DraftOutcome::Forced(TurnEnd::NextPlayer(PlayerId::TWO)));
        assert!(engine.hand().is_empty());
        assert_eq!(engine.board(PlayerId::ONE).track().len(), 3);
        assert_eq!(engine.moves_this_round(), 1);
        assert_eq!(engine.moves_this_game(), 1);
        let kinds: Vec<_> = engine.history().iter().map(|r| r.kind).collect();
        assert!(matches!(kinds[0], MoveKind::Draft { taken: 3, .. }));
        assert_eq!(kinds[1], MoveKind::Forced { discarded: 3 });
    }

    #[test]
    fn test_forced_move_sends_marker_to_track() {
        let mut engine = engine();
        engine.draft(pool(1), Color::Blue).unwrap();
        engine.place(line(3)).unwrap();
        {
            let rack = engine.boards[PlayerId::TWO].rack_mut();
            for n in 1..=5 {
                rack.place(&[Tile::Colored(Color::Red)], line(n)).unwrap();
            }
        }

        let outcome = engine.draft(PoolId::OVERFLOW, Color::Yellow).unwrap();

        assert!(matches!(outcome, DraftOutcome::Forced(_)));
        assert_eq!(engine.marker_location(), MarkerLocation::Track(PlayerId::TWO));
        assert!(engine.board(PlayerId::TWO).track().has_marker());
    }

    #[test]
    fn test_commands_rejected_after_game_over() {
        let mut engine = engine();
        engine.phase = Phase::GameOver;

        let err = engine.draft(pool(1), Color::Blue).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Phase);
        assert_eq!(err.code(), "RULES_WRONG_PHASE");
        assert_eq!(
            engine.place(line(1)).unwrap_err(),
            RulesError::WrongPhase {
                action: "place",
                expected: Phase::Drafting,
                actual: Phase::GameOver,
            }
        );
        assert!(engine.legal_drafts().is_empty());
    }

    #[test]
    fn test_missing_marker_is_invariant_violation() {
        let mut engine = engine();
        engine.marker = MarkerLocation::Supply;

        let err = engine.end_of_round().unwrap_err();

        assert_eq!(err, RulesError::NoMarkerHolder);
        assert!(err.is_fatal());
    }

    #[test]
    fn test_marker_in_pool_at_round_end_alternates_starter() {
        // every satellite single-colored, so overflow never receives a tile
        let order: Vec<Color> = [Color::Blue, Color::Red, Color::Black, Color::White, Color::Yellow]
            .into_iter()
            .flat_map(|c| [c; 4])
            .collect();
        let mut engine = RoundEngine::new(GameConfig::new(3).with_draw_order(order)).unwrap();
        for (n, color, target) in [
            (1, Color::Blue, 4),
            (2, Color::Red, 4),
            (3, Color::Black, 5),
            (4, Color::White, 5),
        ] {
            engine.draft(pool(n), color).unwrap();
            engine.place(line(target)).unwrap();
        }
        engine.draft(pool(5), Color::Yellow).unwrap();

        let end = engine.place(line(1)).unwrap();

        assert_eq!(
            end,
            TurnEnd::NextRound {
                round: 1,
                starter: PlayerId::TWO
            }
        );
        assert_eq!(engine.marker_location(), MarkerLocation::Pool);
        assert!(engine.draft_pool().has_marker());
        assert_eq!(engine.phase(), Phase::Drafting);
    }

    #[test]
    fn test_completed_row_ends_game() {
        let mut engine = engine();
        {
            // four colors already on row 1, white staged to finish it
            let board = &mut engine.boards[PlayerId::ONE];
            for color in [Color::Blue, Color::Yellow, Color::Red, Color::Black] {
                board.stage(&[Tile::Colored(color)], line(1)).unwrap();
                board.score_round().unwrap();
                board.reset_for_round();
            }
            board.stage(&[Tile::Colored(Color::White)], line(1)).unwrap();
        }

        let mut end = play_turn(&mut engine);
        while matches!(end, TurnEnd::NextPlayer(_)) {
            end = play_turn(&mut engine);
        }

        let TurnEnd::GameOver(result) = end else {
            panic!("expected game over, got {end:?}");
        };
        assert_eq!(engine.phase(), Phase::GameOver);
        assert_eq!(engine.result(), Some(result));
        assert!(engine.board(PlayerId::ONE).grid().is_row_complete());
        assert!(engine.last_round_scores().is_some());
        assert!(engine.draft(PoolId::OVERFLOW, Color::Red).is_err());
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut engine = engine();
        engine.draft(pool(1), Color::Blue).unwrap();

        let snapshot = engine.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(back, snapshot);
        assert_eq!(back.hand.len(), 3);
        assert_eq!(back.pools.len(), 6);
    }

    #[test]
    fn test_display_summary() {
        let engine = engine();
        let text = engine.to_string();
        assert!(text.starts_with("Round 1 | DRAFTING | Player 1 to move"));
        assert!(text.contains("Player 2: 0 points"));
    }
}
