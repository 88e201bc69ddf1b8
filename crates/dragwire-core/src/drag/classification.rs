//! Drag target classification.
//!
//! Classification is a total, pure function of the descriptor's populated
//! fields. Exactly one kind holds for any descriptor, with fixed precedence:
//! application content, then text, then image, then link, then invalid.
//! Text that accompanies a link does not make the drag a text drag: the text
//! rides along inside the link clip instead, so a descriptor carrying both
//! classifies as [`DragTargetKind::Link`].

use serde::{Deserialize, Serialize};

use super::descriptor::DragDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DragTargetKind {
    Invalid,
    Text,
    Image,
    Link,
    OpaqueApplicationContent,
}

impl DragTargetKind {
    /// Stable label used for the target-kind telemetry distribution.
    pub fn label(&self) -> &'static str {
        match self {
            DragTargetKind::Invalid => "invalid",
            DragTargetKind::Text => "text",
            DragTargetKind::Image => "image",
            DragTargetKind::Link => "link",
            DragTargetKind::OpaqueApplicationContent => "app_content",
        }
    }
}

pub fn classify(descriptor: &DragDescriptor) -> DragTargetKind {
    let has_text = descriptor
        .text
        .as_deref()
        .is_some_and(|text| !text.is_empty());

    if descriptor.app_content.is_some() {
        DragTargetKind::OpaqueApplicationContent
    } else if has_text && descriptor.link.is_none() {
        DragTargetKind::Text
    } else if descriptor.image.is_some() {
        DragTargetKind::Image
    } else if descriptor.link.is_some() {
        DragTargetKind::Link
    } else {
        DragTargetKind::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::descriptor::{ImageData, OpaqueContent};
    use bytes::Bytes;

    fn image() -> ImageData {
        ImageData::new(Bytes::from_static(&[1, 2, 3]), "png", "a.png", 8, 8)
    }

    #[test]
    fn empty_descriptor_is_invalid() {
        assert_eq!(classify(&DragDescriptor::default()), DragTargetKind::Invalid);
    }

    #[test]
    fn empty_text_is_invalid() {
        assert_eq!(classify(&DragDescriptor::text("")), DragTargetKind::Invalid);
    }

    #[test]
    fn plain_text_classifies_as_text() {
        assert_eq!(classify(&DragDescriptor::text("hi")), DragTargetKind::Text);
    }

    #[test]
    fn link_with_accompanying_text_classifies_as_link() {
        let mut descriptor = DragDescriptor::link("https://example.com", None);
        descriptor.text = Some("example".into());
        assert_eq!(classify(&descriptor), DragTargetKind::Link);
    }

    #[test]
    fn image_beats_link() {
        let mut descriptor = DragDescriptor::image(image());
        descriptor.link = Some(crate::drag::LinkData {
            url: "https://example.com/a.png".into(),
            title: None,
        });
        assert_eq!(classify(&descriptor), DragTargetKind::Image);
    }

    #[test]
    fn text_beats_image() {
        let mut descriptor = DragDescriptor::image(image());
        descriptor.text = Some("caption".into());
        assert_eq!(classify(&descriptor), DragTargetKind::Text);
    }

    #[test]
    fn app_content_beats_everything() {
        let descriptor = DragDescriptor {
            text: Some("t".into()),
            image: Some(image()),
            app_content: Some(OpaqueContent {
                kind: "tab".into(),
                data: serde_json::json!({ "id": 4 }),
            }),
            ..DragDescriptor::default()
        };
        assert_eq!(
            classify(&descriptor),
            DragTargetKind::OpaqueApplicationContent
        );
    }
}
