#![deny(clippy::all, clippy::pedantic)]

pub mod admin;
pub mod posts;
pub mod tags;
pub mod uploads;
