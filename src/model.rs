use serde::{Deserialize, Serialize};

/// Where an image reference in the report came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    File,
    Uri,
    Runtime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub reference: String,
    pub source: ImageSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub containers: Vec<String>,
}

impl ImageRecord {
    pub fn file(reference: String) -> Self {
        ImageRecord { reference, source: ImageSource::File, runtime: None, containers: Vec::new() }
    }

    pub fn uri(reference: String) -> Self {
        ImageRecord { reference, source: ImageSource::Uri, runtime: None, containers: Vec::new() }
    }

    pub fn running(reference: String, runtime: &str, containers: Vec<String>) -> Self {
        ImageRecord {
            reference,
            source: ImageSource::Runtime,
            runtime: Some(runtime.to_string()),
            containers,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default)]
    pub images: Vec<ImageRecord>,
}

impl Report {
    pub fn new(project_id: Option<String>) -> Self {
        Self { project_id, images: Vec::new() }
    }

    pub fn add_images(&mut self, mut images: Vec<ImageRecord>) {
        self.images.append(&mut images);
        self.images.sort_by(|a, b| {
            a.reference.cmp(&b.reference).then_with(|| a.runtime.cmp(&b.runtime))
        });
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn container_count(&self) -> usize {
        self.images.iter().map(|image| image.containers.len()).sum()
    }
}
