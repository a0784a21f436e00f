pub mod details;
pub mod shortcuts;
pub mod status_bar;
pub mod tree;
