//! Dragged-content descriptor.
//!
//! A descriptor is what the embedder hands the coordinator when the user
//! starts dragging something. Which optional fields are populated decides
//! the classification (see [`super::classify`]).

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::geometry::Size;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragDescriptor {
    /// Plain text, either the dragged content itself or text accompanying a
    /// link.
    pub text: Option<String>,
    pub link: Option<LinkData>,
    pub image: Option<ImageData>,
    /// Content only the embedding environment knows how to serialize.
    pub app_content: Option<OpaqueContent>,
}

impl DragDescriptor {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn link(url: impl Into<String>, title: Option<String>) -> Self {
        Self {
            link: Some(LinkData {
                url: url.into(),
                title,
            }),
            ..Self::default()
        }
    }

    pub fn image(image: ImageData) -> Self {
        Self {
            image: Some(image),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkData {
    pub url: String,
    pub title: Option<String>,
}

/// A binary image payload plus the metadata the cache and shadow engine need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    content: Bytes,
    pub extension: String,
    pub display_name: String,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    pub fn new(
        content: Bytes,
        extension: impl Into<String>,
        display_name: impl Into<String>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            content,
            extension: extension.into(),
            display_name: display_name.into(),
            width,
            height,
        }
    }

    pub fn get_content(&self) -> Bytes {
        self.content.clone()
    }

    pub fn size_bytes(&self) -> usize {
        self.content.len()
    }

    pub fn natural_size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}

/// Embedder-defined content; the coordinator never looks inside, it only
/// routes it to the host policy for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpaqueContent {
    pub kind: String,
    pub data: serde_json::Value,
}
