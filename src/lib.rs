pub mod config;
pub mod controller;
pub mod error;
pub mod food;
pub mod game;
pub mod greedy;
pub mod grid;
pub mod input;
pub mod network;
pub mod planner;
pub mod simulation;
pub mod snake;
pub mod vision;
