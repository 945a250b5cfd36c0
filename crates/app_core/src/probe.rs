//! Asset availability probing
//!
//! Every candidate number is checked independently on the rayon pool.
//! Results come back over a channel in whatever order the checks finish,
//! followed by a single [`ProbeEvent::Finished`].

use crate::config::AlbumConfig;
use crate::gallery::ImageRef;
use crossbeam_channel::{Receiver, TryRecvError};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Resolves a candidate image number to an existing image
pub trait AssetSource: Send + Sync {
    /// `None` when the image does not exist or cannot be read
    fn resolve(&self, number: u32) -> Option<ImageRef>;
}

/// Looks for numbered files under the album directory
pub struct FsAssetSource {
    album: AlbumConfig,
}

impl FsAssetSource {
    pub fn new(album: AlbumConfig) -> Self {
        Self { album }
    }
}

impl AssetSource for FsAssetSource {
    fn resolve(&self, number: u32) -> Option<ImageRef> {
        let path = self.album.path_for(number);
        if !path.is_file() {
            return None;
        }

        // Only count images whose header actually decodes
        match image::image_dimensions(&path) {
            Ok(_) => Some(ImageRef::new(number, path)),
            Err(e) => {
                tracing::debug!("Skipping unreadable image {:?}: {}", path, e);
                None
            }
        }
    }
}

/// Message from the probe workers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeEvent {
    Found(ImageRef),
    /// Sent once, after every candidate has reported
    Finished { found: u32, missing: u32 },
}

/// Receiving end of a running probe
pub struct ProbeHandle {
    rx: Receiver<ProbeEvent>,
    finished: bool,
}

impl ProbeHandle {
    /// Take every event that is ready without blocking
    pub fn drain(&mut self) -> Vec<ProbeEvent> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    if matches!(event, ProbeEvent::Finished { .. }) {
                        self.finished = true;
                    }
                    events.push(event);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.finished = true;
                    break;
                }
            }
        }
        events
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Start probing candidates `1..=total`
pub fn spawn_probe(source: Arc<dyn AssetSource>, total: u32) -> ProbeHandle {
    let (tx, rx) = crossbeam_channel::unbounded();

    tracing::info!("Probing {} candidate images", total);

    if total == 0 {
        let _ = tx.send(ProbeEvent::Finished { found: 0, missing: 0 });
        return ProbeHandle { rx, finished: false };
    }

    let remaining = Arc::new(AtomicU32::new(total));
    let found = Arc::new(AtomicU32::new(0));

    for number in 1..=total {
        let source = Arc::clone(&source);
        let tx = tx.clone();
        let remaining = Arc::clone(&remaining);
        let found = Arc::clone(&found);

        rayon::spawn(move || {
            if let Some(image) = source.resolve(number) {
                found.fetch_add(1, Ordering::AcqRel);
                let _ = tx.send(ProbeEvent::Found(image));
            }

            // Last one out reports the totals
            if remaining.fetch_sub(1, Ordering::AcqRel) == 1 {
                let found = found.load(Ordering::Acquire);
                tracing::info!("Probe finished: {} found, {} missing", found, total - found);
                let _ = tx.send(ProbeEvent::Finished {
                    found,
                    missing: total - found,
                });
            }
        });
    }

    ProbeHandle { rx, finished: false }
}
