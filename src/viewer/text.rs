//! Plain-text board diagram for the terminal

use shakmaty::{Board, File, Rank, Square};

const FILE_LABELS: &str = "  a b c d e f g h";

/// Board with rank labels on both sides and file labels above and below.
/// White pieces are uppercase, empty squares are dots.
pub fn board_diagram(board: &Board) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(FILE_LABELS);
    out.push('\n');

    for rank in Rank::ALL.iter().rev() {
        let label = rank.char();
        let cells: Vec<String> = File::ALL
            .iter()
            .map(|file| {
                board
                    .piece_at(Square::from_coords(*file, *rank))
                    .map_or('.', |piece| piece.char())
                    .to_string()
            })
            .collect();
        out.push_str(&format!("{} {} {}\n", label, cells.join(" "), label));
    }

    out.push_str(FILE_LABELS);
    out.push('\n');
    out
}
