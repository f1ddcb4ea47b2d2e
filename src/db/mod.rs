pub mod migrations;
pub mod setup;
