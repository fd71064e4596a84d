//! Threaded strip: clocks latched frames out on a dedicated thread.
//!
//! The caller stages pixels locally; [`PixelStrip::show`] hands a copy of the
//! frame to the transport thread over a bounded channel, so slow transports
//! (serial links, SPI bit-banging) never stall drawing for longer than the
//! queue allows.
//!
//! ```text
//! ┌──────────────┐   StripCommand::Frame   ┌──────────────────┐
//! │ ThreadedStrip│ ──────────────────────▶ │ transport thread │ ──▶ sink(&[Rgb])
//! └──────────────┘                         └──────────────────┘
//! ```

use std::io;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, error};

use super::PixelStrip;
use crate::buffer::Rgb;
use crate::error::DeviceError;

/// Configuration for the transport thread.
#[derive(Debug, Clone)]
pub struct ThreadedStripConfig {
    /// Frames that may be queued before `show` blocks.
    pub queue_depth: usize,
    /// Name of the transport thread.
    pub thread_name: String,
}

impl Default for ThreadedStripConfig {
    fn default() -> Self {
        Self {
            queue_depth: 2,
            thread_name: "pixel-strip".to_string(),
        }
    }
}

/// Commands sent to the transport thread.
#[derive(Debug)]
enum StripCommand {
    /// Write one complete frame.
    Frame(Vec<Rgb>),
    /// Drain and exit.
    Shutdown,
}

/// A [`PixelStrip`] whose output runs on its own thread.
pub struct ThreadedStrip {
    /// Colors staged since the last show.
    staged: Vec<Rgb>,
    /// Command channel to the transport thread.
    sender: Sender<StripCommand>,
    /// Handle to the transport thread.
    handle: Option<JoinHandle<()>>,
    /// Frames handed to the transport so far.
    frames_sent: u64,
}

impl ThreadedStrip {
    /// Spawn a transport thread with the default configuration.
    ///
    /// `sink` receives every shown frame, in order. If it returns an error
    /// the thread stops and later shows fail with [`DeviceError::Disconnected`].
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn<F>(len: usize, sink: F) -> io::Result<Self>
    where
        F: FnMut(&[Rgb]) -> io::Result<()> + Send + 'static,
    {
        Self::with_config(len, &ThreadedStripConfig::default(), sink)
    }

    /// Spawn a transport thread with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn with_config<F>(len: usize, config: &ThreadedStripConfig, sink: F) -> io::Result<Self>
    where
        F: FnMut(&[Rgb]) -> io::Result<()> + Send + 'static,
    {
        let (sender, receiver) = bounded::<StripCommand>(config.queue_depth.max(1));
        let handle = thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || Self::run_loop(&receiver, sink))?;

        Ok(Self {
            staged: vec![Rgb::BLACK; len],
            sender,
            handle: Some(handle),
            frames_sent: 0,
        })
    }

    /// Frames handed to the transport thread so far.
    #[inline]
    pub const fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    /// Drain queued frames and wait for the transport thread to finish.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        // A send error just means the thread already exited.
        let _ = self.sender.send(StripCommand::Shutdown);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("pixel strip transport thread panicked");
            }
        }
    }

    /// Transport loop.
    fn run_loop<F>(receiver: &Receiver<StripCommand>, mut sink: F)
    where
        F: FnMut(&[Rgb]) -> io::Result<()>,
    {
        debug!("pixel strip transport started");
        for command in receiver {
            match command {
                StripCommand::Frame(frame) => {
                    if let Err(e) = sink(&frame) {
                        error!("pixel strip transport failed: {e}");
                        break;
                    }
                }
                StripCommand::Shutdown => break,
            }
        }
        debug!("pixel strip transport stopped");
    }
}

impl PixelStrip for ThreadedStrip {
    fn len(&self) -> usize {
        self.staged.len()
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), DeviceError> {
        let len = self.staged.len();
        let slot = self
            .staged
            .get_mut(index)
            .ok_or(DeviceError::IndexOutOfRange { index, len })?;
        *slot = color;
        Ok(())
    }

    fn show(&mut self) -> Result<(), DeviceError> {
        self.sender
            .send(StripCommand::Frame(self.staged.clone()))
            .map_err(|_| DeviceError::Disconnected)?;
        self.frames_sent += 1;
        Ok(())
    }
}

impl Drop for ThreadedStrip {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for ThreadedStrip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadedStrip")
            .field("len", &self.staged.len())
            .field("frames_sent", &self.frames_sent)
            .field("running", &self.handle.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};
    use test_log::test;

    fn recording_sink() -> (
        Arc<Mutex<Vec<Vec<Rgb>>>>,
        impl FnMut(&[Rgb]) -> io::Result<()> + Send + 'static,
    ) {
        let frames = Arc::new(Mutex::new(Vec::new()));
        let sink_frames = Arc::clone(&frames);
        let sink = move |frame: &[Rgb]| {
            sink_frames.lock().unwrap().push(frame.to_vec());
            Ok(())
        };
        (frames, sink)
    }

    #[test]
    fn test_frames_reach_sink_in_order() {
        let (frames, sink) = recording_sink();
        let mut strip = ThreadedStrip::spawn(3, sink).unwrap();

        strip.set_pixel(0, Rgb::RED).unwrap();
        strip.show().unwrap();
        strip.set_pixel(2, Rgb::BLUE).unwrap();
        strip.show().unwrap();
        assert_eq!(strip.frames_sent(), 2);
        strip.shutdown();

        let frames = frames.lock().unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], vec![Rgb::RED, Rgb::BLACK, Rgb::BLACK]);
        assert_eq!(frames[1], vec![Rgb::RED, Rgb::BLACK, Rgb::BLUE]);
    }

    #[test]
    fn test_bad_index_is_rejected_locally() {
        let (_frames, sink) = recording_sink();
        let mut strip = ThreadedStrip::spawn(2, sink).unwrap();
        assert!(matches!(
            strip.set_pixel(2, Rgb::RED),
            Err(DeviceError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_sink_failure_disconnects() {
        let config = ThreadedStripConfig {
            queue_depth: 1,
            thread_name: "failing-strip".to_string(),
        };
        let mut strip = ThreadedStrip::with_config(1, &config, |_frame: &[Rgb]| {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "unplugged"))
        })
        .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut result = strip.show();
        while result.is_ok() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
            result = strip.show();
        }
        assert!(matches!(result, Err(DeviceError::Disconnected)));
    }
}
