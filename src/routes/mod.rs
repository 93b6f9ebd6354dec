pub mod manage;
pub mod reveal;
pub mod setup;
