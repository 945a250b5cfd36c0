//! The confirmed-to-exist image collection

use std::path::PathBuf;

/// A probed image that is known to exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// 1-based file number (`7` for `007.jpg`)
    pub number: u32,
    pub path: PathBuf,
}

impl ImageRef {
    pub fn new(number: u32, path: impl Into<PathBuf>) -> Self {
        Self {
            number,
            path: path.into(),
        }
    }

    /// File name for labels
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.to_string_lossy().to_string())
    }
}

/// Append-only image list, ordered by confirmation
///
/// Indices handed out by [`Gallery::push`] stay valid for the lifetime of the
/// gallery. Once the probe phase is over the gallery is frozen.
#[derive(Debug, Default)]
pub struct Gallery {
    images: Vec<ImageRef>,
    complete: bool,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a confirmed image, returns its index
    ///
    /// `None` for a number already present or when the gallery is frozen.
    pub fn push(&mut self, image: ImageRef) -> Option<usize> {
        if self.complete {
            tracing::warn!("Gallery is frozen, ignoring {:?}", image.path);
            return None;
        }
        if self.position_of(image.number).is_some() {
            tracing::debug!("Duplicate confirmation for image #{}", image.number);
            return None;
        }

        self.images.push(image);
        Some(self.images.len() - 1)
    }

    /// Mark the probe phase as finished
    pub fn freeze(&mut self) {
        self.complete = true;
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ImageRef> {
        self.images.get(index)
    }

    pub fn position_of(&self, number: u32) -> Option<usize> {
        self.images.iter().position(|img| img.number == number)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageRef> {
        self.images.iter()
    }

    pub fn as_slice(&self) -> &[ImageRef] {
        &self.images
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img(number: u32) -> ImageRef {
        ImageRef::new(number, format!("album/{:03}.jpg", number))
    }

    #[test]
    fn test_push_keeps_confirmation_order() {
        let mut gallery = Gallery::new();
        assert_eq!(gallery.push(img(9)), Some(0));
        assert_eq!(gallery.push(img(2)), Some(1));
        assert_eq!(gallery.push(img(5)), Some(2));

        let numbers: Vec<u32> = gallery.iter().map(|i| i.number).collect();
        assert_eq!(numbers, vec![9, 2, 5]);
        assert_eq!(gallery.position_of(2), Some(1));
    }

    #[test]
    fn test_duplicate_is_ignored() {
        let mut gallery = Gallery::new();
        gallery.push(img(3));
        assert_eq!(gallery.push(img(3)), None);
        assert_eq!(gallery.len(), 1);
    }

    #[test]
    fn test_frozen_gallery_rejects_pushes() {
        let mut gallery = Gallery::new();
        gallery.push(img(1));
        gallery.freeze();

        assert!(gallery.is_complete());
        assert_eq!(gallery.push(img(2)), None);
        assert_eq!(gallery.len(), 1);
    }

    #[test]
    fn test_name() {
        assert_eq!(img(7).name(), "007.jpg");
    }
}
