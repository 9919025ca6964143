//! Background shadow blur
//!
//! The blur runs on its own thread. The caller issues a request, may do
//! other work, and then blocks once on [`BlurRequest::wait`]. The wait has no
//! timeout.

use crate::RenderError;
use image::{imageops, RgbaImage};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use tracing::debug;

/// Pending blur of one layer
#[derive(Debug)]
pub struct BlurRequest {
    receiver: Receiver<RgbaImage>,
}

/// Start blurring `layer` with the given radius in pixels
pub fn request(layer: RgbaImage, radius: u32) -> BlurRequest {
    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        debug!(
            "Blurring {}x{} layer, radius {}",
            layer.width(),
            layer.height(),
            radius
        );
        let blurred = if radius == 0 {
            layer
        } else {
            imageops::blur(&layer, radius as f32 / 2.0)
        };
        // The receiver only disappears if the caller gave up on the result
        let _ = sender.send(blurred);
    });

    BlurRequest { receiver }
}

impl BlurRequest {
    /// Block until the blurred layer is ready
    pub fn wait(self) -> Result<RgbaImage, RenderError> {
        self.receiver.recv().map_err(|_| RenderError::BlurFailed)
    }
}
