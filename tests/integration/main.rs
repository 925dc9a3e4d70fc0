mod command;
mod common;
mod config;
mod gestures;
mod persist;
