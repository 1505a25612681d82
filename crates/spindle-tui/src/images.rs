//! Decoded-image cache with async loading.
//!
//! Decoding happens on blocking tasks; completions come back to the main
//! loop over an mpsc channel as [`ImageLoadResult`]s. A path is decoded
//! at most once; failures are remembered so the carousel never retries
//! a broken reference.

use std::collections::HashMap;
use std::sync::Arc;

use image::DynamicImage;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::event::ImageLoadResult;

enum ImageState {
    Loading,
    Loaded(Arc<DynamicImage>),
    Failed(String),
}

#[derive(Default)]
pub struct ImageCache {
    images: HashMap<String, ImageState>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self, path: &str) -> bool {
        matches!(self.images.get(path), Some(ImageState::Loaded(_)))
    }

    pub fn is_loading(&self, path: &str) -> bool {
        matches!(self.images.get(path), Some(ImageState::Loading))
    }

    /// The remembered decode error, if this path failed
    pub fn failure(&self, path: &str) -> Option<&str> {
        match self.images.get(path) {
            Some(ImageState::Failed(e)) => Some(e),
            _ => None,
        }
    }

    pub fn get(&self, path: &str) -> Option<&Arc<DynamicImage>> {
        match self.images.get(path) {
            Some(ImageState::Loaded(img)) => Some(img),
            _ => None,
        }
    }

    /// Kick off a decode unless the path is already known (in any state)
    pub fn request(&mut self, path: &str, tx: &UnboundedSender<ImageLoadResult>) {
        if self.images.contains_key(path) {
            return;
        }
        self.images.insert(path.to_string(), ImageState::Loading);
        spawn_decode(path.to_string(), tx.clone());
    }

    /// Record a completed decode
    pub fn apply(&mut self, result: &ImageLoadResult) {
        match result {
            ImageLoadResult::Loaded { path, image } => {
                debug!(path, "image decoded");
                self.images
                    .insert(path.clone(), ImageState::Loaded(Arc::new(image.clone())));
            }
            ImageLoadResult::Failed { path, error } => {
                warn!(path, error, "image decode failed");
                self.images
                    .insert(path.clone(), ImageState::Failed(error.clone()));
            }
        }
    }
}

/// Decode on a blocking task and report back over the channel
fn spawn_decode(path: String, tx: UnboundedSender<ImageLoadResult>) {
    tokio::task::spawn_blocking(move || {
        let result = match image::open(&path) {
            Ok(image) => ImageLoadResult::Loaded { path, image },
            Err(e) => ImageLoadResult::Failed {
                path,
                error: e.to_string(),
            },
        };
        if tx.send(result).is_err() {
            warn!("image load receiver dropped");
        }
    });
}
