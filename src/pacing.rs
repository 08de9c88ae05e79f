use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::animator::ParticleFieldAnimator;
use crate::surface::Surface;

/// Start/stop switch shared between the animation loop and whoever hosts it.
///
/// Clones share the same flag. The loop checks it before every frame, so a
/// stop lands at the next frame boundary.
#[derive(Clone, Debug, Default)]
pub struct AnimationHandle {
    stopped: Arc<AtomicBool>,
}

impl AnimationHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) {
        if self.stopped.swap(false, Ordering::SeqCst) {
            debug!("animation started");
        }
    }

    pub fn stop(&self) {
        if !self.stopped.swap(true, Ordering::SeqCst) {
            debug!("animation stopped");
        }
    }

    pub fn toggle(&self) {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }

    pub fn is_running(&self) -> bool {
        !self.stopped.load(Ordering::SeqCst)
    }
}

/// Renders one frame per `interval` tick until `handle` is stopped and
/// returns the number of frames rendered.
pub async fn drive<S: Surface + ?Sized>(
    animator: &mut ParticleFieldAnimator,
    surface: &mut S,
    handle: &AnimationHandle,
    interval: Duration,
) -> u64 {
    let mut ticker = tokio::time::interval(interval);
    let mut frames = 0;

    while handle.is_running() {
        ticker.tick().await;
        if !handle.is_running() {
            break;
        }
        animator.render_frame(surface);
        frames += 1;
    }

    frames
}
