//! Subcommands of the `tictree` binary

pub mod evaluate;
pub mod inspect;
pub mod play;
pub mod train;
