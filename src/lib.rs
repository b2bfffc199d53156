pub mod composition;
pub mod config;
pub mod frame_loop;
pub mod icons;
pub mod mosaic;
pub mod pointer;
pub mod telemetry;

#[cfg(target_arch = "wasm32")]
pub mod frontend;
