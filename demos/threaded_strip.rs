//! Threaded strip: drive a serpentine matrix through a background transport.
//!
//! The "transport" here just logs a checksum of every frame it receives;
//! a real one would write to a serial port or SPI device. Run with
//! `RUST_LOG=debug` to watch the sync sweeps and the transport thread.

use std::io;
use std::thread;
use std::time::Duration;

use log::info;
use pixel_framebuf::{
    Draw, GridLayout, LayoutFlags, Orientation, PixelFramebuffer, PixelGrid, Rgb,
    ThreadedStrip, ThreadedStripConfig,
};

const WIDTH: u16 = 8;
const HEIGHT: u16 = 8;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ThreadedStripConfig {
        queue_depth: 4,
        thread_name: "matrix-out".to_string(),
    };
    let mut frame_no = 0u32;
    let strip = ThreadedStrip::with_config(
        usize::from(WIDTH) * usize::from(HEIGHT),
        &config,
        move |pixels: &[Rgb]| -> io::Result<()> {
            frame_no += 1;
            let checksum = pixels.iter().fold(0u32, |acc, c| acc.rotate_left(5) ^ c.to_u32());
            let lit = pixels.iter().filter(|c| **c != Rgb::BLACK).count();
            info!("frame {frame_no}: {lit} lit, checksum {checksum:08x}");
            Ok(())
        },
    )?;

    // Column-major zigzag, as many 8x8 panels are wired.
    let layout = GridLayout::new()
        .with_orientation(Orientation::Vertical)
        .with_flags(LayoutFlags::ALTERNATING);
    let grid = PixelGrid::new(strip, WIDTH, HEIGHT, layout)?;
    let mut fb = PixelFramebuffer::new(grid, WIDTH, HEIGHT);

    for step in 0..i32::from(WIDTH) {
        fb.fill(Rgb::BLACK);
        fb.vline(step, 0, i32::from(HEIGHT), Rgb::GREEN);
        fb.hline(0, step, i32::from(WIDTH), Rgb::BLUE);
        let report = fb.display()?;
        info!(
            "sweep {step}: {} of {} pixels forwarded",
            report.cells_changed, report.cells_total
        );
        thread::sleep(Duration::from_millis(20));
    }

    let strip = fb.into_grid().into_strip();
    info!("{} frames handed to the transport", strip.frames_sent());
    strip.shutdown();
    Ok(())
}
