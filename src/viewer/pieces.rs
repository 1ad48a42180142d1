//! Piece artwork
//!
//! Loads the twelve piece images once per window. Missing files are
//! reported once each and drawn as a placeholder mark instead.

use iced::widget::image::Handle;
use shakmaty::{Color, Piece, Role};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File name for a piece, e.g. `Chess_nlt60.png` for a white knight
pub fn artwork_file_name(piece: Piece) -> String {
    let shade = match piece.color {
        Color::White => 'l',
        Color::Black => 'd',
    };
    format!("Chess_{}{}t60.png", piece.role.char(), shade)
}

/// Drawn in place of a missing image
pub const PLACEHOLDER_MARK: &str = "●";

/// Image cache owned by the board window
#[derive(Debug, Clone, Default)]
pub struct PieceArt {
    images: HashMap<Piece, Handle>,
    missing: Vec<PathBuf>,
}

impl PieceArt {
    pub fn load(figures_dir: &Path) -> Self {
        let mut art = Self::default();

        for color in Color::ALL {
            for role in Role::ALL {
                let piece = Piece { color, role };
                let path = figures_dir.join(artwork_file_name(piece));
                if path.is_file() {
                    art.images.insert(piece, Handle::from_path(&path));
                } else {
                    warn!("🖼️ Missing piece image: {}", path.display());
                    art.missing.push(path);
                }
            }
        }

        if art.missing.is_empty() {
            info!("🖼️ Loaded piece images from {}", figures_dir.display());
        }
        art
    }

    /// `None` means: draw [`PLACEHOLDER_MARK`]
    pub fn image(&self, piece: Piece) -> Option<&Handle> {
        self.images.get(&piece)
    }

    pub fn missing(&self) -> &[PathBuf] {
        &self.missing
    }
}
