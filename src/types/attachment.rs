// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;

const SUPPORTED_IMAGE_FORMATS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];
const SUPPORTED_VIDEO_FORMATS: [&str; 3] = ["mp4", "webm", "ogg"];

#[derive(ValueEnum, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Front,
    Back,
}

impl Face {
    pub fn as_str(&self) -> &'static str {
        match self {
            Face::Front => "front",
            Face::Back => "back",
        }
    }
}

impl Display for Face {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a canvas element sits on its card face, in canvas pixels.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(ValueEnum, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum VideoProvider {
    Youtube,
    Vimeo,
    Local,
}

/// Extra content attached to a card, produced by the canvas editor or the
/// video manager.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Attachment {
    #[serde(rename_all = "camelCase")]
    TextCanvas {
        face: Face,
        geometry: Geometry,
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    ImageCanvas {
        face: Face,
        geometry: Geometry,
        src: String,
    },
    #[serde(rename_all = "camelCase")]
    Video {
        provider: VideoProvider,
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
}

impl Attachment {
    pub fn video(provider: VideoProvider, url: &str, title: Option<String>) -> Fallible<Self> {
        let url = url.trim();
        if url.is_empty() {
            return fail("video URL must not be empty.");
        }
        if provider == VideoProvider::Local && !has_extension(url, &SUPPORTED_VIDEO_FORMATS) {
            return fail(format!(
                "unsupported video format: {url} (expected one of {})",
                SUPPORTED_VIDEO_FORMATS.join(", ")
            ));
        }
        Ok(Attachment::Video {
            provider,
            url: url.to_string(),
            title,
        })
    }

    pub fn image(face: Face, geometry: Geometry, src: &str) -> Fallible<Self> {
        if !has_extension(src, &SUPPORTED_IMAGE_FORMATS) {
            return fail(format!("unsupported image format: {src}"));
        }
        Ok(Attachment::ImageCanvas {
            face,
            geometry,
            src: src.to_string(),
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Attachment::TextCanvas { .. } => "text",
            Attachment::ImageCanvas { .. } => "image",
            Attachment::Video { .. } => "video",
        }
    }
}

fn has_extension(path: &str, allowed: &[&str]) -> bool {
    match path.rsplit_once('.') {
        Some((_, ext)) => allowed.contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_video_format() {
        assert!(Attachment::video(VideoProvider::Local, "lecture.mp4", None).is_ok());
        assert!(Attachment::video(VideoProvider::Local, "lecture.avi", None).is_err());
        assert!(Attachment::video(VideoProvider::Youtube, "https://youtu.be/abc", None).is_ok());
        assert!(Attachment::video(VideoProvider::Vimeo, "  ", None).is_err());
    }

    #[test]
    fn test_image_format() {
        let geometry = Geometry {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 80.0,
        };
        assert!(Attachment::image(Face::Front, geometry, "heart.PNG").is_ok());
        assert!(Attachment::image(Face::Back, geometry, "heart.bmp").is_err());
    }

    #[test]
    fn test_face_display() {
        assert_eq!(Face::Front.to_string(), "front");
        assert_eq!(Face::Back.to_string(), "back");
    }

    #[test]
    fn test_serde_shape() -> crate::error::Fallible<()> {
        let video = Attachment::video(VideoProvider::Youtube, "https://youtu.be/abc", None)?;
        let json = serde_json::to_string(&video)?;
        assert_eq!(
            json,
            r#"{"kind":"video","provider":"youtube","url":"https://youtu.be/abc"}"#
        );
        Ok(())
    }
}
