pub mod flashcard;
pub mod progress_bar;
pub mod row_grid;
pub mod summary;
