//! CLI infrastructure for tictree
//!
//! This module provides the command-line interface for training, evaluating,
//! playing against and inspecting tree players.

pub mod commands;
pub mod config;
pub mod model;
pub mod output;
