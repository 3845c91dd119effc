pub mod answer;
pub mod practice;
pub mod selection;
pub mod shuffle;
pub mod timer;
