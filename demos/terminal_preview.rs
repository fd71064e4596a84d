//! Terminal preview: animate a 16x16 "LED matrix" in a true-color terminal.
//!
//! A bouncing dot and a rotating frame are drawn each tick; only changed
//! pixels are written to the terminal. Run with `RUST_LOG=debug` to see the
//! per-sweep summaries on stderr.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    terminal::{Clear, ClearType},
};
use pixel_framebuf::{Draw, PixelFramebuffer, Rgb, TerminalGrid};

const SIZE: u16 = 16;
const FRAMES: u32 = 120;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut stdout = io::stdout();
    execute!(stdout, Clear(ClearType::All), Hide)?;

    let grid = TerminalGrid::stdout(SIZE, SIZE).with_origin(2, 1);
    let mut fb = PixelFramebuffer::new(grid, SIZE, SIZE);

    let last = i32::from(SIZE) - 1;
    let (mut x, mut y, mut dx, mut dy) = (1i32, 3i32, 1i32, 1i32);
    let mut forwarded = 0usize;

    for frame in 0..FRAMES {
        fb.set_rotation(((frame / 30) % 4) as u8)?;
        fb.fill(Rgb::BLACK);
        fb.rect(0, 0, i32::from(SIZE), i32::from(SIZE), Rgb::new(40, 40, 120));
        fb.line(0, 0, 4, 0, Rgb::RED);
        fb.circle(x, y, 2, Rgb::new(255, 160, 0));
        fb.plot(x, y, Rgb::WHITE);

        let report = fb.display()?;
        forwarded += report.cells_changed;

        if x + dx <= 0 || x + dx >= last {
            dx = -dx;
        }
        if y + dy <= 0 || y + dy >= last {
            dy = -dy;
        }
        x += dx;
        y += dy;

        thread::sleep(Duration::from_millis(50));
    }

    let total = usize::from(SIZE) * usize::from(SIZE) * FRAMES as usize;
    execute!(stdout, MoveTo(0, SIZE + 2), Show)?;
    writeln!(
        stdout,
        "{} frames, {forwarded} pixel writes ({:.1}% of a full redraw)",
        fb.frames(),
        forwarded as f64 * 100.0 / total as f64
    )?;
    Ok(())
}
