use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Terminal notification attached to the report of the command that ended the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ending {
    Won,
    Lost { fatal: Pos },
}

/// What a command did to the session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Game is already over, the command was ignored.
    Ignored,
    AlreadyOpen,
    Opened,
    HitMine,
    NotEligible,
    Aborted,
    Flagged,
    Unflagged,
    NoOp,
}

impl Effect {
    /// Whether the command changed anything a renderer has to redraw.
    pub const fn has_update(self) -> bool {
        use Effect::*;
        match self {
            Ignored | AlreadyOpen | NotEligible | Aborted | NoOp => false,
            Opened | HitMine | Flagged | Unflagged => true,
        }
    }
}

/// Player command, as forwarded by an input collaborator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Reveal(Pos),
    Chord(Pos),
    ToggleFlag(Pos),
}

/// Result of a single command: its effect, the ordered cell changes and, at most once per
/// session, the ending.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub effect: Effect,
    pub deltas: Vec<CellDelta>,
    pub ending: Option<Ending>,
}

impl Report {
    fn unchanged(effect: Effect) -> Self {
        Self {
            effect,
            deltas: Vec::new(),
            ending: None,
        }
    }
}

/// Represents a game from start to finish.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGameSession")]
pub struct GameSession {
    board: Board,
    revealed_count: CellCount,
    outcome: Outcome,
    fatal_mine: Option<Pos>,
}

#[derive(Deserialize)]
struct RawGameSession {
    board: Board,
    revealed_count: CellCount,
    outcome: Outcome,
    fatal_mine: Option<Pos>,
}

impl TryFrom<RawGameSession> for GameSession {
    type Error = GameError;

    fn try_from(raw: RawGameSession) -> Result<Self> {
        let RawGameSession {
            board,
            revealed_count,
            outcome,
            fatal_mine,
        } = raw;

        if revealed_count != board.count_visibility(Visibility::Revealed) {
            return Err(GameError::InconsistentState("revealed count does not match board"));
        }

        let all_revealed = revealed_count == board.safe_cell_count();
        match (outcome, fatal_mine) {
            (Outcome::Lost, Some(fatal))
                if board.size().contains(fatal)
                    && board.is_mine(fatal)
                    && board.visibility(fatal).is_hidden()
                    && !all_revealed => {}
            (Outcome::Lost, _) => {
                return Err(GameError::InconsistentState("lost without a hidden fatal mine"));
            }
            (_, Some(_)) => {
                return Err(GameError::InconsistentState("fatal mine on a game not lost"));
            }
            (Outcome::Won, None) if all_revealed => {}
            (Outcome::InProgress, None) if !all_revealed => {}
            _ => {
                return Err(GameError::InconsistentState("outcome does not match progress"));
            }
        }

        Ok(Self {
            board,
            revealed_count,
            outcome,
            fatal_mine,
        })
    }
}

impl GameSession {
    /// Validates the dimensions and mine count, then generates a board from `seed`.
    pub fn new(size: Size, mines: CellCount, limits: BoardLimits, seed: u64) -> Result<Self> {
        let config = GameConfig::new(size, mines, limits)?;
        Ok(Self::with_generator(config, RandomBoardGenerator::new(seed)))
    }

    pub fn with_generator(config: GameConfig, generator: impl BoardGenerator) -> Self {
        Self::from_board(generator.generate(config))
    }

    /// Starts a game on an existing board, counting cells it already shows as revealed.
    pub fn from_board(board: Board) -> Self {
        let revealed_count = board.count_visibility(Visibility::Revealed);
        log::debug!(
            "New session on {}x{} board with {} mines",
            board.size().rows,
            board.size().cols,
            board.mine_count()
        );
        let mut session = Self {
            board,
            revealed_count,
            outcome: Outcome::InProgress,
            fatal_mine: None,
        };
        session.check_won();
        session
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Size {
        self.board.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.board.mine_count()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// Safe cells still to be revealed before the game is won.
    pub fn remaining_safe_cells(&self) -> CellCount {
        self.board.safe_cell_count() - self.revealed_count
    }

    pub fn flags_placed(&self) -> CellCount {
        self.board.count_visibility(Visibility::Flagged)
    }

    /// How many mines have not been flagged yet, negative when over-flagged.
    pub fn mines_left(&self) -> i64 {
        i64::from(self.total_mines()) - i64::from(self.flags_placed())
    }

    pub fn cell(&self, pos: Pos) -> Result<Visibility> {
        let pos = self.board.validate_pos(pos)?;
        Ok(self.board.visibility(pos))
    }

    pub fn fatal_mine(&self) -> Option<Pos> {
        self.fatal_mine
    }

    /// Every mine position, only disclosed once the game is over.
    pub fn mines(&self) -> Option<Vec<Pos>> {
        self.is_finished()
            .then(|| self.board.mine_positions().collect())
    }

    pub fn apply(&mut self, command: Command) -> Result<Report> {
        match command {
            Command::Reveal(pos) => self.reveal(pos),
            Command::Chord(pos) => self.chord(pos),
            Command::ToggleFlag(pos) => self.toggle_flag(pos),
        }
    }

    pub fn reveal(&mut self, pos: Pos) -> Result<Report> {
        let pos = self.board.validate_pos(pos)?;
        if self.is_finished() {
            return Ok(Report::unchanged(Effect::Ignored));
        }

        Ok(match reveal(&mut self.board, pos)? {
            RevealResult::AlreadyOpen => Report::unchanged(Effect::AlreadyOpen),
            RevealResult::HitMine => self.lose(pos),
            RevealResult::Opened(deltas) => self.record_opened(Effect::Opened, deltas),
        })
    }

    pub fn chord(&mut self, pos: Pos) -> Result<Report> {
        let pos = self.board.validate_pos(pos)?;
        if self.is_finished() {
            return Ok(Report::unchanged(Effect::Ignored));
        }

        let result = chord(&mut self.board, pos)?;
        Ok(self.record_chord(result))
    }

    pub fn toggle_flag(&mut self, pos: Pos) -> Result<Report> {
        let pos = self.board.validate_pos(pos)?;
        if self.is_finished() {
            return Ok(Report::unchanged(Effect::Ignored));
        }

        Ok(match self.board.toggle_flag(pos)? {
            FlagResult::Flagged => Report {
                effect: Effect::Flagged,
                deltas: Vec::from([CellDelta::flagged(pos)]),
                ending: None,
            },
            FlagResult::Unflagged => Report {
                effect: Effect::Unflagged,
                deltas: Vec::from([CellDelta::hidden(pos)]),
                ending: None,
            },
            FlagResult::NoOp => Report::unchanged(Effect::NoOp),
        })
    }

    fn record_chord(&mut self, result: ChordResult) -> Report {
        match result {
            ChordResult::NotEligible => Report::unchanged(Effect::NotEligible),
            ChordResult::Aborted => Report::unchanged(Effect::Aborted),
            ChordResult::Satisfied(deltas) => self.record_opened(Effect::Opened, deltas),
            ChordResult::HitMine { opened, fatal } => {
                // cells opened before the hit still count and are still drawn
                self.revealed_count += opened.len() as CellCount;
                let mut report = self.lose(fatal);
                report.deltas = opened;
                report
            }
        }
    }

    fn record_opened(&mut self, effect: Effect, deltas: Vec<CellDelta>) -> Report {
        // every delta is a distinct cell that just left `Hidden`
        self.revealed_count += deltas.len() as CellCount;
        let ending = self.check_won().then_some(Ending::Won);
        Report {
            effect,
            deltas,
            ending,
        }
    }

    fn lose(&mut self, fatal: Pos) -> Report {
        self.outcome = Outcome::Lost;
        self.fatal_mine = Some(fatal);
        log::debug!("Game lost at {:?}", fatal);
        Report {
            effect: Effect::HitMine,
            deltas: Vec::new(),
            ending: Some(Ending::Lost { fatal }),
        }
    }

    /// Moves to `Won` when every safe cell is revealed, returns whether it just happened.
    fn check_won(&mut self) -> bool {
        if self.outcome.is_finished() || self.revealed_count != self.board.safe_cell_count() {
            return false;
        }
        self.outcome = Outcome::Won;
        log::debug!("Game won with {} cells revealed", self.revealed_count);
        true
    }
}
