#![allow(dead_code, clippy::bool_assert_comparison)]

pub mod common;

#[cfg(feature = "rusqlite")]
pub mod sqlite;
