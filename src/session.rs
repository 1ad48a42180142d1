//! Turn loop
//!
//! Alternates between the human (typed or spoken moves) and the random bot
//! until the rules engine reports the game over or the human quits. Only
//! this loop mutates the game, and only with moves the engine accepted.

use crate::asr::SpeechSource;
use crate::bot;
use crate::commands::{
    parse_command, resolve_spoken, resolve_typed, Command, HELP_TEXT, MOVE_PROMPT,
};
use crate::core::{parse_spoken, SpokenIntent};
use crate::error::ChessResult;
use crate::game::{Game, Termination};
use crate::input::{InputEvent, LineSource, POLL_INTERVAL};
use crate::viewer::{board_diagram, BoardSnapshot, BoardView};
use rand::RngCore;
use shakmaty::{Color, Move, Position};
use std::io::Write;
use tracing::{debug, info};

/// Where the loop is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    AwaitingHumanMove,
    AwaitingBotMove,
    GameOver(Termination),
}

impl TurnState {
    /// State for the current position given which colour the human plays
    pub fn for_game(game: &Game, human: Color) -> Self {
        match game.termination() {
            Some(termination) => TurnState::GameOver(termination),
            None if game.turn() == human => TurnState::AwaitingHumanMove,
            None => TurnState::AwaitingBotMove,
        }
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    Finished(Termination),
    Quit,
    Interrupted,
}

enum HumanTurn {
    Play(Move),
    Quit,
    Interrupted,
}

/// One game between the human and the bot
pub struct Session<'a> {
    game: Game,
    human: Color,
    input: &'a mut dyn LineSource,
    speech: Option<&'a mut dyn SpeechSource>,
    view: &'a mut dyn BoardView,
    out: &'a mut dyn Write,
    rng: &'a mut dyn RngCore,
}

impl<'a> Session<'a> {
    pub fn new(
        game: Game,
        human: Color,
        input: &'a mut dyn LineSource,
        view: &'a mut dyn BoardView,
        out: &'a mut dyn Write,
        rng: &'a mut dyn RngCore,
    ) -> Self {
        Self {
            game,
            human,
            input,
            speech: None,
            view,
            out,
            rng,
        }
    }

    /// Enable spoken moves
    pub fn with_speech(mut self, speech: &'a mut dyn SpeechSource) -> Self {
        self.speech = Some(speech);
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Play until the game ends or the human leaves
    pub fn run(&mut self) -> ChessResult<GameEnd> {
        self.view.pump();
        self.show_position()?;

        let mut state = TurnState::for_game(&self.game, self.human);
        let side = color_name(self.human);
        match state {
            TurnState::AwaitingHumanMove => {
                writeln!(self.out, "You are {}. You move first.", side)?
            }
            TurnState::AwaitingBotMove => {
                writeln!(self.out, "You are {}. Bot moves first.", side)?
            }
            TurnState::GameOver(_) => {}
        }

        loop {
            self.view.pump();
            state = match state {
                TurnState::AwaitingHumanMove => match self.human_move()? {
                    HumanTurn::Play(mv) => {
                        let played = self.game.play(&mv);
                        writeln!(self.out, "You played: {} ({})", played.uci, played.san)?;
                        self.show_position()?;
                        TurnState::for_game(&self.game, self.human)
                    }
                    HumanTurn::Quit => {
                        writeln!(self.out, "You resigned / quit. Bye!")?;
                        self.view.close();
                        return Ok(GameEnd::Quit);
                    }
                    HumanTurn::Interrupted => {
                        self.view.close();
                        writeln!(self.out, "\nInterrupted. Goodbye!")?;
                        return Ok(GameEnd::Interrupted);
                    }
                },
                TurnState::AwaitingBotMove => {
                    // No legal moves means mate or stalemate, which
                    // for_game already reports as GameOver
                    if let Some(mv) = bot::random_move(self.game.position(), &mut *self.rng) {
                        let played = self.game.play(&mv);
                        writeln!(self.out, "Bot played:  {} ({})", played.uci, played.san)?;
                        self.show_position()?;
                    }
                    TurnState::for_game(&self.game, self.human)
                }
                TurnState::GameOver(termination) => {
                    info!("🏁 {}", termination);
                    writeln!(self.out, "{}", termination)?;
                    self.view.close();
                    return Ok(GameEnd::Finished(termination));
                }
            };
        }
    }

    fn show_position(&mut self) -> ChessResult<()> {
        writeln!(self.out, "{}", board_diagram(self.game.position().board()))?;
        self.view.pump();
        if self.view.is_active() {
            self.view.render(BoardSnapshot {
                board: self.game.position().board().clone(),
                turn: self.game.turn(),
                last_move: self.game.last_move_squares(),
            });
        }
        Ok(())
    }

    fn human_move(&mut self) -> ChessResult<HumanTurn> {
        loop {
            write!(self.out, "{}", MOVE_PROMPT)?;
            self.out.flush()?;

            let line = match self.next_input() {
                InputEvent::Line(line) => line,
                InputEvent::Eof => {
                    debug!("Input closed, treating as quit");
                    return Ok(HumanTurn::Quit);
                }
                InputEvent::Interrupted => return Ok(HumanTurn::Interrupted),
            };

            match parse_command(&line) {
                Command::Quit => return Ok(HumanTurn::Quit),
                Command::Help => writeln!(self.out, "{}", HELP_TEXT)?,
                Command::Voice => {
                    if let Some(turn) = self.spoken_move()? {
                        return Ok(turn);
                    }
                }
                Command::MoveText(text) => match resolve_typed(self.game.position(), &text) {
                    Ok(mv) => return Ok(HumanTurn::Play(mv)),
                    Err(_) => writeln!(
                        self.out,
                        "Couldn't parse or illegal in this position. Try again."
                    )?,
                },
            }
        }
    }

    /// Wait for a line while keeping the window serviced
    fn next_input(&mut self) -> InputEvent {
        loop {
            self.view.pump();
            if let Some(event) = self.input.poll(POLL_INTERVAL) {
                return event;
            }
        }
    }

    /// One listen. `None` sends the human back to the prompt.
    fn spoken_move(&mut self) -> ChessResult<Option<HumanTurn>> {
        let Some(speech) = self.speech.as_deref_mut() else {
            writeln!(
                self.out,
                "Voice input is not available; type your move instead."
            )?;
            return Ok(None);
        };

        writeln!(
            self.out,
            "🎤 Listening... say your move, e.g. 'e two to e four'."
        )?;
        self.out.flush()?;
        let heard = speech.listen();
        self.view.pump();

        let Some(transcript) = heard else {
            writeln!(self.out, "Didn't catch that.")?;
            return Ok(None);
        };
        writeln!(self.out, "Heard: '{}'", transcript)?;

        let intent = parse_spoken(&transcript);
        match intent {
            SpokenIntent::Quit => Ok(Some(HumanTurn::Quit)),
            SpokenIntent::Help => {
                writeln!(self.out, "{}", HELP_TEXT)?;
                Ok(None)
            }
            SpokenIntent::Move(_) | SpokenIntent::NoMatch => {
                match resolve_spoken(self.game.position(), &intent) {
                    Ok(mv) => Ok(Some(HumanTurn::Play(mv))),
                    Err(_) => {
                        writeln!(self.out, "Couldn't understand or illegal: '{}'", transcript)?;
                        Ok(None)
                    }
                }
            }
        }
    }
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}
