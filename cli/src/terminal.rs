pub mod colors;
pub mod disclaimer;
pub mod logging;
pub mod print;
pub mod progress;
pub mod report;
