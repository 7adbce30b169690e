pub mod directory;
pub mod repositories;
