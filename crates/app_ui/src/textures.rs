//! Background image decoding and egui texture cache
//!
//! Decoding happens on two worker threads (thumbnails and full images have
//! separate queues so opening the lightbox never waits behind the grid).
//! Uploads to egui happen on the UI thread in [`TextureCache::poll`].

use app_core::{AppError, ImageRef};
use crossbeam_channel::{Receiver, Sender};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextureKind {
    Thumbnail,
    Full,
}

#[derive(Debug)]
struct DecodeRequest {
    number: u32,
    path: PathBuf,
    kind: TextureKind,
    max_side: Option<u32>,
}

struct Decoded {
    number: u32,
    kind: TextureKind,
    result: Result<egui::ColorImage, AppError>,
}

/// Decode an image file, optionally downscaled to fit `max_side`
pub fn decode_image(path: &Path, max_side: Option<u32>) -> Result<egui::ColorImage, AppError> {
    let img = image::open(path)?;
    let img = match max_side {
        Some(side) if img.width() > side || img.height() > side => img.thumbnail(side, side),
        _ => img,
    };

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        [width as usize, height as usize],
        rgba.as_flat_samples().as_slice(),
    ))
}

fn spawn_worker(name: &str, requests: Receiver<DecodeRequest>, results: Sender<Decoded>) {
    let spawned = std::thread::Builder::new()
        .name(name.to_string())
        .spawn(move || {
            while let Ok(request) = requests.recv() {
                tracing::debug!("Decoding {:?} ({:?})", request.path, request.kind);
                let result = decode_image(&request.path, request.max_side);
                let decoded = Decoded {
                    number: request.number,
                    kind: request.kind,
                    result,
                };
                if results.send(decoded).is_err() {
                    break;
                }
            }
        });

    if let Err(e) = spawned {
        tracing::error!("Failed to start {} worker: {}", name, e);
    }
}

/// Thumbnails for every gallery image plus the one full image on screen
pub struct TextureCache {
    thumb_tx: Sender<DecodeRequest>,
    full_tx: Sender<DecodeRequest>,
    result_rx: Receiver<Decoded>,

    thumbnail_side: u32,
    thumbnails: HashMap<u32, egui::TextureHandle>,
    requested: HashSet<u32>,
    failed: HashSet<u32>,

    full: Option<(u32, egui::TextureHandle)>,
    wanted_full: Option<u32>,
    in_flight: usize,
}

impl TextureCache {
    pub fn new(thumbnail_side: u32) -> Self {
        let (thumb_tx, thumb_rx) = crossbeam_channel::unbounded();
        let (full_tx, full_rx) = crossbeam_channel::unbounded();
        let (result_tx, result_rx) = crossbeam_channel::unbounded();

        spawn_worker("thumbnail-decoder", thumb_rx, result_tx.clone());
        spawn_worker("image-decoder", full_rx, result_tx);

        Self {
            thumb_tx,
            full_tx,
            result_rx,
            thumbnail_side,
            thumbnails: HashMap::new(),
            requested: HashSet::new(),
            failed: HashSet::new(),
            full: None,
            wanted_full: None,
            in_flight: 0,
        }
    }

    /// Queue a thumbnail decode unless one is cached or in flight
    pub fn request_thumbnail(&mut self, image: &ImageRef) {
        if !self.requested.insert(image.number) {
            return;
        }
        self.in_flight += 1;
        let _ = self.thumb_tx.send(DecodeRequest {
            number: image.number,
            path: image.path.clone(),
            kind: TextureKind::Thumbnail,
            max_side: Some(self.thumbnail_side),
        });
    }

    /// Make `image` the full-size texture to keep; older ones are dropped
    pub fn request_full(&mut self, image: &ImageRef) {
        if self.wanted_full == Some(image.number) {
            return;
        }
        self.wanted_full = Some(image.number);
        self.in_flight += 1;
        let _ = self.full_tx.send(DecodeRequest {
            number: image.number,
            path: image.path.clone(),
            kind: TextureKind::Full,
            max_side: None,
        });
    }

    pub fn thumbnail(&self, number: u32) -> Option<&egui::TextureHandle> {
        self.thumbnails.get(&number)
    }

    pub fn full(&self, number: u32) -> Option<&egui::TextureHandle> {
        self.full
            .as_ref()
            .filter(|(n, _)| *n == number)
            .map(|(_, texture)| texture)
    }

    /// Decodes queued or running
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    pub fn has_failed(&self, number: u32) -> bool {
        self.failed.contains(&number)
    }

    /// Upload finished decodes; true when anything changed
    pub fn poll(&mut self, ctx: &egui::Context) -> bool {
        let mut changed = false;

        for decoded in self.result_rx.try_iter() {
            self.in_flight = self.in_flight.saturating_sub(1);
            let image = match decoded.result {
                Ok(image) => image,
                Err(e) => {
                    tracing::warn!("Failed to decode image #{}: {}", decoded.number, e);
                    self.failed.insert(decoded.number);
                    changed = true;
                    continue;
                }
            };

            match decoded.kind {
                TextureKind::Thumbnail => {
                    let texture = ctx.load_texture(
                        format!("thumb-{}", decoded.number),
                        image,
                        egui::TextureOptions::LINEAR,
                    );
                    self.thumbnails.insert(decoded.number, texture);
                }
                TextureKind::Full => {
                    // Stale: the viewer moved on while this was decoding
                    if self.wanted_full != Some(decoded.number) {
                        continue;
                    }
                    let texture = ctx.load_texture(
                        format!("full-{}", decoded.number),
                        image,
                        egui::TextureOptions::LINEAR,
                    );
                    self.full = Some((decoded.number, texture));
                }
            }
            changed = true;
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_downscales_large_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("001.png");
        image::RgbImage::new(400, 200).save(&path).unwrap();

        let thumb = decode_image(&path, Some(100)).unwrap();
        assert_eq!(thumb.size, [100, 50]);

        let full = decode_image(&path, None).unwrap();
        assert_eq!(full.size, [400, 200]);
    }

    #[test]
    fn test_decode_keeps_small_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("002.png");
        image::RgbImage::new(20, 10).save(&path).unwrap();

        assert_eq!(decode_image(&path, Some(100)).unwrap().size, [20, 10]);
    }

    #[test]
    fn test_decode_garbage_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("003.png");
        std::fs::write(&path, b"nope").unwrap();

        assert!(matches!(decode_image(&path, None), Err(AppError::ImageDecode(_))));
    }

    #[test]
    fn test_full_texture_for_other_image_is_none() {
        let cache = TextureCache::new(64);
        assert!(cache.full(1).is_none());
        assert!(cache.thumbnail(1).is_none());
        assert!(!cache.has_failed(1));
        assert!(!cache.is_busy());
    }
}
