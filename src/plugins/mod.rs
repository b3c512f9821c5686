pub mod audio;
pub mod gremlins;
pub mod particles;
pub mod telemetry;
pub mod tilemap;
