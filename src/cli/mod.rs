pub mod assets;
pub mod currencies;
pub mod rate;
pub mod setup;
pub mod ui;
