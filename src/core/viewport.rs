//! Viewport seam: bring a channel into view. Independent of selection state.

use log::info;

pub trait ViewportController: Send + Sync {
    fn focus_channel(&self, channel_id: &str);
}

/// Headless viewport for one-shot CLI runs: reports the channel on stdout.
pub struct ConsoleViewport;

impl ViewportController for ConsoleViewport {
    fn focus_channel(&self, channel_id: &str) {
        info!("Focusing channel {}", channel_id);
        println!("Now viewing channel {channel_id}");
    }
}
