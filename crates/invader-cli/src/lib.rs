pub mod action;
pub mod logging;
pub mod report;
pub mod runner;
pub mod script;
