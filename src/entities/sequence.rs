//! Frame sequence - fixed-length list of decoded frames loaded once.
//!
//! Loading is fire-and-forget per frame: every decode runs on the worker pool
//! and reports back over a channel. The UI thread drains that channel with
//! [`FrameSequence::poll`]. The sequence becomes ready only when every frame
//! has settled (decoded or failed); there is no partial readiness.
//!
//! A decode failure no longer stalls loading forever: once everything has
//! settled the [`MissingFramePolicy`] decides between surfacing an error and
//! proceeding with the missing frames left blank. An optional timeout turns
//! frames that never report back into failures.

use crossbeam_channel::{Receiver, Sender};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::frame::{Frame, FrameError, FrameStatus};
use super::loader::Loader;
use crate::core::workers::Workers;

/// Frames in the shipped product animation
pub const DEFAULT_FRAME_COUNT: usize = 192;

/// File naming convention; `{i}` is replaced by the 0-based frame index
pub const DEFAULT_PATTERN: &str = "frame_{i}_delay-0.04s.webp";

/// File name of frame `index` for a naming pattern
pub fn frame_file_name(pattern: &str, index: usize) -> String {
    pattern.replace("{i}", &index.to_string())
}

/// What to do when some frames failed to load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MissingFramePolicy {
    /// Show a visible error listing the missing frames
    #[default]
    Error,
    /// Proceed; missing frames draw as an empty surface
    Skip,
}

/// Loading state of the whole sequence
#[derive(Debug, Clone, PartialEq)]
pub enum Readiness {
    Loading { settled: usize, total: usize },
    Ready,
    Failed { missing: Vec<usize> },
}

/// Result of one decode job
#[derive(Debug)]
pub struct LoadResult {
    pub index: usize,
    pub result: Result<Frame, FrameError>,
}

#[derive(Debug)]
struct FrameSlot {
    status: FrameStatus,
    frame: Option<Frame>,
}

pub struct FrameSequence {
    slots: Vec<FrameSlot>,
    settled: usize,
    rx: Receiver<LoadResult>,
    started: Instant,
    timeout: Option<Duration>,
    policy: MissingFramePolicy,
    readiness: Readiness,
}

impl FrameSequence {
    /// Queue decoding of `count` frames from `dir` on the worker pool.
    pub fn load(
        dir: &Path,
        pattern: &str,
        count: usize,
        workers: &Workers,
        policy: MissingFramePolicy,
        timeout: Option<Duration>,
    ) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        let epoch = workers.current_epoch();

        info!(
            "Loading {} frames from {} ({} workers)",
            count,
            dir.display(),
            workers.len()
        );

        for index in 0..count {
            let path: PathBuf = dir.join(frame_file_name(pattern, index));
            let tx: Sender<LoadResult> = tx.clone();
            workers.execute_with_epoch(epoch, move || {
                let result = Loader::load(&path);
                // Receiver is gone once the presentation is deactivated
                let _ = tx.send(LoadResult { index, result });
            });
        }

        Self::from_receiver(count, rx, policy, timeout)
    }

    /// Sequence fed by an arbitrary producer of [`LoadResult`]s.
    pub fn from_receiver(
        count: usize,
        rx: Receiver<LoadResult>,
        policy: MissingFramePolicy,
        timeout: Option<Duration>,
    ) -> Self {
        let slots = (0..count)
            .map(|_| FrameSlot {
                status: FrameStatus::Pending,
                frame: None,
            })
            .collect();

        let mut sequence = Self {
            slots,
            settled: 0,
            rx,
            started: Instant::now(),
            timeout,
            policy,
            readiness: Readiness::Loading { settled: 0, total: count },
        };
        sequence.refresh_readiness();
        sequence
    }

    /// Drain finished decodes. Returns true if readiness changed.
    pub fn poll(&mut self) -> bool {
        self.poll_at(Instant::now())
    }

    /// Same as [`poll`](Self::poll) with an explicit clock.
    pub fn poll_at(&mut self, now: Instant) -> bool {
        if !matches!(self.readiness, Readiness::Loading { .. }) {
            return false;
        }

        let results: Vec<LoadResult> = self.rx.try_iter().collect();
        for LoadResult { index, result } in results {
            self.settle(index, result);
        }

        if let Some(timeout) = self.timeout
            && self.settled < self.slots.len()
            && now.duration_since(self.started) >= timeout
        {
            warn!(
                "Frame loading timed out after {:?}: {} of {} frames pending",
                timeout,
                self.slots.len() - self.settled,
                self.slots.len()
            );
            for index in 0..self.slots.len() {
                if self.slots[index].status == FrameStatus::Pending {
                    self.settle(index, Err(FrameError::TimedOut));
                }
            }
        }

        self.refresh_readiness()
    }

    fn settle(&mut self, index: usize, result: Result<Frame, FrameError>) {
        let Some(slot) = self.slots.get_mut(index) else {
            warn!("Ignoring decode result for out-of-range frame {}", index);
            return;
        };
        if slot.status != FrameStatus::Pending {
            debug!("Ignoring late decode result for frame {}", index);
            return;
        }

        match result {
            Ok(frame) => {
                slot.status = FrameStatus::Loaded;
                slot.frame = Some(frame);
            }
            Err(e) => {
                warn!("Frame {} failed to load: {}", index, e);
                slot.status = FrameStatus::Failed(e.to_string());
            }
        }
        self.settled += 1;
    }

    fn refresh_readiness(&mut self) -> bool {
        let total = self.slots.len();
        let next = if self.settled < total {
            Readiness::Loading { settled: self.settled, total }
        } else {
            let missing = self.missing();
            if missing.is_empty() {
                Readiness::Ready
            } else if self.policy == MissingFramePolicy::Skip {
                warn!("Proceeding with {} missing frames: {:?}", missing.len(), missing);
                Readiness::Ready
            } else {
                Readiness::Failed { missing }
            }
        };

        if next == self.readiness {
            return false;
        }
        if !matches!(next, Readiness::Loading { .. }) {
            info!("Frame sequence {:?} after {:?}", next, self.started.elapsed());
        }
        self.readiness = next;
        true
    }

    pub fn readiness(&self) -> &Readiness {
        &self.readiness
    }

    pub fn is_ready(&self) -> bool {
        self.readiness == Readiness::Ready
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn settled(&self) -> usize {
        self.settled
    }

    /// Decoded frame at `index`, if it loaded
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.slots.get(index).and_then(|slot| slot.frame.as_ref())
    }

    pub fn status(&self, index: usize) -> Option<&FrameStatus> {
        self.slots.get(index).map(|slot| &slot.status)
    }

    /// Indices of frames that failed to load
    pub fn missing(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| matches!(slot.status, FrameStatus::Failed(_)))
            .map(|(i, _)| i)
            .collect()
    }

    /// Failure reason per missing frame
    pub fn failures(&self) -> Vec<(usize, String)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| match &slot.status {
                FrameStatus::Failed(reason) => Some((i, reason.clone())),
                _ => None,
            })
            .collect()
    }
}
