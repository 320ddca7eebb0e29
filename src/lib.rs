pub mod badges;
pub mod config;
pub mod output;
pub mod ranking;
pub mod readme;
pub mod render;
pub mod scan;
pub mod scoreboard;
pub mod sponsors;
pub mod storage;
pub mod update;
