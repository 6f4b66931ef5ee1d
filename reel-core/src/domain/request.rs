//! Generation request domain types

use serde::{Deserialize, Serialize};

/// Parameters of a single video generation request
///
/// Immutable once a job is created. Field names follow the wire format,
/// except `kind` which is `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default = "default_duration")]
    pub duration: i64,
    #[serde(default = "default_fps")]
    pub fps: i64,
    #[serde(default = "default_resolution")]
    pub resolution: String,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub seed: Option<i64>,
    #[serde(default = "default_num_inference_steps")]
    pub num_inference_steps: i64,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

/// Which external program variant handles a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    TextToVideo,
    ImageToVideo,
}

impl GenerationRequest {
    /// Creates a request for `prompt` with every other field at its default
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            kind: default_kind(),
            duration: default_duration(),
            fps: default_fps(),
            resolution: default_resolution(),
            style: None,
            seed: None,
            num_inference_steps: default_num_inference_steps(),
            scale: default_scale(),
        }
    }

    /// `t2v` selects text-to-video; any other value falls back to image-to-video.
    pub fn mode(&self) -> GenerationMode {
        if self.kind == "t2v" {
            GenerationMode::TextToVideo
        } else {
            GenerationMode::ImageToVideo
        }
    }

    /// Style to forward, if one was given and is non-empty
    pub fn effective_style(&self) -> Option<&str> {
        self.style.as_deref().filter(|s| !s.is_empty())
    }

    /// Seed to forward; zero counts as unset
    pub fn effective_seed(&self) -> Option<i64> {
        self.seed.filter(|s| *s != 0)
    }
}

impl std::fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationMode::TextToVideo => write!(f, "t2v"),
            GenerationMode::ImageToVideo => write!(f, "i2v"),
        }
    }
}

fn default_kind() -> String {
    "t2v".to_string()
}

fn default_duration() -> i64 {
    4
}

fn default_fps() -> i64 {
    12
}

fn default_resolution() -> String {
    "512x320".to_string()
}

fn default_num_inference_steps() -> i64 {
    30
}

fn default_scale() -> f64 {
    7.5
}
