mod audio;
mod catalog;
mod config;
mod display;
mod input;
mod logging;
mod player;
mod raster;
mod runtime;
mod storage;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
