
mod configuration;
mod logging;
mod parallel;
mod version;
