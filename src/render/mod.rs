pub mod anchor;
pub mod cards;
pub mod table;

pub use anchor::replace_anchor_contents;
pub use cards::BlogCards;

/// Indentation placed before the anchor's closing tag after replacement.
pub const CLOSING_INDENT: &str = "      ";

/// Wraps rendered cards the way they sit inside the blog grid.
pub fn grid_contents(cards_html: &str) -> String {
    format!("\n{cards_html}\n{CLOSING_INDENT}")
}
