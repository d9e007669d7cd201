//! Display model of the HP-41 liquid crystal display

pub mod annunciator;
pub mod cells;
pub mod font;
pub mod lexer;

pub use annunciator::{Annunciator, Annunciators};
pub use cells::{DisplayCells, CELL_COUNT};
