//! iced board window
//!
//! Polls the update channel on a timer and redraws the board from the
//! latest snapshot.

use super::pieces::{PieceArt, PLACEHOLDER_MARK};
use super::{BoardSnapshot, ViewerUpdate};
use iced::widget::{container, image, text, Column, Row, Space};
use iced::{Background, Color, Element, Length, Size, Subscription, Task, Theme};
use shakmaty::{Color as Side, File, Piece, Rank, Square};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;
use tracing::info;

const WINDOW_TITLE: &str = "Voice Chess — Board View";
const BORDER: f32 = 20.0;
const INFO_HEIGHT: f32 = 24.0;
const INFO_SIZE: f32 = 14.0;
const TICK: Duration = Duration::from_millis(50);

const LIGHT: Color = Color::from_rgb(240.0 / 255.0, 217.0 / 255.0, 181.0 / 255.0);
const DARK: Color = Color::from_rgb(181.0 / 255.0, 136.0 / 255.0, 99.0 / 255.0);
const HIGHLIGHT: Color = Color::from_rgb(246.0 / 255.0, 246.0 / 255.0, 105.0 / 255.0);
const HIGHLIGHT_ALPHA: f32 = 60.0 / 255.0;
const INFO_TEXT: Color = Color::from_rgb(10.0 / 255.0, 10.0 / 255.0, 10.0 / 255.0);
const BACKGROUND: Color = Color::from_rgb(230.0 / 255.0, 230.0 / 255.0, 230.0 / 255.0);

/// Window geometry and artwork location
#[derive(Debug, Clone)]
pub struct ViewerSettings {
    pub figures_dir: PathBuf,
    pub tile: u32,
}

impl ViewerSettings {
    /// Board plus border on each side
    pub fn window_side(&self) -> f32 {
        self.tile as f32 * 8.0 + BORDER * 2.0
    }

    /// Square board area with the info line underneath
    pub fn window_size(&self) -> Size {
        let side = self.window_side();
        Size::new(side, side + INFO_HEIGHT)
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Tick,
}

/// iced application state
pub struct BoardWindow {
    updates: Receiver<ViewerUpdate>,
    snapshot: Option<BoardSnapshot>,
    art: PieceArt,
    tile: f32,
}

/// Run the window on the current thread until it is closed or the game
/// sends [`ViewerUpdate::Shutdown`]
pub fn run_window(updates: Receiver<ViewerUpdate>, settings: ViewerSettings) -> iced::Result {
    let size = settings.window_size();
    iced::application(WINDOW_TITLE, BoardWindow::update, BoardWindow::view)
        .subscription(BoardWindow::subscription)
        .theme(BoardWindow::theme)
        .window_size(size)
        .resizable(false)
        .run_with(move || BoardWindow::new(updates, settings))
}

impl BoardWindow {
    pub fn new(updates: Receiver<ViewerUpdate>, settings: ViewerSettings) -> (Self, Task<Message>) {
        info!("🪟 Opening board window");
        let art = PieceArt::load(&settings.figures_dir);
        if !art.missing().is_empty() {
            info!(
                "🖼️ {} piece images missing; drawing placeholders",
                art.missing().len()
            );
        }
        let window = Self {
            updates,
            snapshot: None,
            art,
            tile: settings.tile as f32,
        };
        (window, Task::none())
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => loop {
                match self.updates.try_recv() {
                    Ok(ViewerUpdate::Position(snapshot)) => self.snapshot = Some(snapshot),
                    Ok(ViewerUpdate::Shutdown) | Err(TryRecvError::Disconnected) => {
                        info!("🪟 Closing board window");
                        return iced::exit();
                    }
                    Err(TryRecvError::Empty) => return Task::none(),
                }
            },
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        iced::time::every(TICK).map(|_| Message::Tick)
    }

    pub fn theme(&self) -> Theme {
        Theme::Light
    }

    pub fn view(&self) -> Element<'_, Message> {
        let mut ranks = Column::new();
        for rank in Rank::ALL.iter().rev() {
            let mut files = Row::new();
            for file in File::ALL {
                files = files.push(self.square_cell(Square::from_coords(file, *rank)));
            }
            ranks = ranks.push(files);
        }

        let info = self
            .snapshot
            .as_ref()
            .map_or_else(String::new, |s| info_line(s.turn));
        let status = text(info).size(INFO_SIZE).color(INFO_TEXT);
        let board = Column::new()
            .push(ranks)
            .push(container(status).center_y(INFO_HEIGHT));

        container(board)
            .padding(BORDER)
            .style(|_theme: &Theme| filled(BACKGROUND))
            .into()
    }

    fn square_cell(&self, square: Square) -> Element<'_, Message> {
        let tile = Length::Fixed(self.tile);
        let highlighted = self
            .snapshot
            .as_ref()
            .and_then(|s| s.last_move)
            .is_some_and(|(from, to)| square == from || square == to);
        let fill = square_color(square, highlighted);

        let piece = self
            .snapshot
            .as_ref()
            .and_then(|s| s.board.piece_at(square));
        let content: Element<'_, Message> = match piece {
            Some(piece) => self.piece_widget(piece),
            None => Space::new(tile, tile).into(),
        };

        container(content)
            .center_x(tile)
            .center_y(tile)
            .style(move |_theme: &Theme| filled(fill))
            .into()
    }

    fn piece_widget(&self, piece: Piece) -> Element<'_, Message> {
        let tile = Length::Fixed(self.tile);
        match self.art.image(piece) {
            Some(handle) => image(handle.clone()).width(tile).height(tile).into(),
            None => {
                let mark = if piece.color.is_white() {
                    Color::WHITE
                } else {
                    Color::BLACK
                };
                text(PLACEHOLDER_MARK)
                    .size(self.tile * 0.6)
                    .color(mark)
                    .into()
            }
        }
    }
}

/// Status text under the board
pub fn info_line(turn: Side) -> String {
    let side = match turn {
        Side::White => "White",
        Side::Black => "Black",
    };
    format!("Turn: {}  |  Close window to hide viewer", side)
}

fn filled(color: Color) -> container::Style {
    container::Style {
        background: Some(Background::Color(color)),
        ..container::Style::default()
    }
}

/// Light/dark checkerboard (a8 is light), tinted when part of the last move
pub fn square_color(square: Square, highlighted: bool) -> Color {
    let row = 7 - square.rank() as u32;
    let col = square.file() as u32;
    let base = if (row + col) % 2 == 0 { LIGHT } else { DARK };
    if highlighted {
        blend(base, HIGHLIGHT, HIGHLIGHT_ALPHA)
    } else {
        base
    }
}

fn blend(under: Color, over: Color, alpha: f32) -> Color {
    Color::from_rgb(
        under.r + (over.r - under.r) * alpha,
        under.g + (over.g - under.g) * alpha,
        under.b + (over.b - under.b) * alpha,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkerboard() {
        assert_eq!(square_color(Square::A8, false), LIGHT);
        assert_eq!(square_color(Square::A1, false), DARK);
        assert_eq!(square_color(Square::H1, false), LIGHT);
        assert_eq!(square_color(Square::E4, false), LIGHT);
    }

    #[test]
    fn test_highlight_tints_toward_yellow() {
        let plain = square_color(Square::E2, false);
        let lit = square_color(Square::E2, true);
        assert_ne!(plain, lit);
        assert!(lit.b < plain.b || lit.g > plain.g);
    }

    #[test]
    fn test_info_line_names_side_to_move() {
        assert_eq!(
            info_line(Side::Black),
            "Turn: Black  |  Close window to hide viewer"
        );
        assert!(info_line(Side::White).starts_with("Turn: White"));
    }

    #[test]
    fn test_window_side() {
        let settings = ViewerSettings {
            figures_dir: PathBuf::from("figures"),
            tile: 80,
        };
        assert_eq!(settings.window_side(), 680.0);
        assert_eq!(settings.window_size(), Size::new(680.0, 704.0));
    }
}
