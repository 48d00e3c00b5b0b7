//! TOML scene descriptions
//!
//! A scene file lists the nouns of a sentence with their sizes and optional
//! images, the adposition phrases that relate them, canvas anchors and
//! groups. [`SceneFile::build`] turns it into a [`SentenceGraph`] ready for
//! layout.
//!
//! ```toml
//! [canvas]
//! width = 800
//! height = 600
//!
//! [[vertex]]
//! name = "table"
//! width = 200
//! height = 100
//!
//! [[vertex]]
//! name = "ball"
//! image = "ball.png"
//!
//! [[relation]]
//! left = "table"
//! right = "ball"
//! right_adpositions = ["on"]
//! right_is_subject = true
//!
//! [[anchor]]
//! vertex = "table"
//! phrase = "at the bottom"
//! ```

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::edge;
use crate::layout::types::Canvas;
use crate::scene::drawable::{Image, Vertex, NOMINAL_SIZE};
use crate::scene::graph::{GraphError, SentenceGraph, VertexId};

/// Errors that can occur when loading or building a scene file
#[derive(Error, Debug)]
pub enum SceneFileError {
    #[error("Failed to read scene file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse scene TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Undefined vertex '{name}'{}", format_suggestions(.suggestions))]
    UndefinedVertex {
        name: String,
        suggestions: Vec<String>,
    },
    #[error("Vertex '{0}' is defined more than once")]
    DuplicateVertex(String),
    #[error("Failed to load image '{}': {source}", .path.display())]
    Image {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Graph(#[from] GraphError),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean {}?)", suggestions.join(", "))
    }
}

/// Canvas dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CanvasSpec {
    pub width: i32,
    pub height: i32,
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VertexSpec {
    pub name: String,
    #[serde(default = "nominal_width")]
    pub width: i32,
    #[serde(default = "nominal_height")]
    pub height: i32,
    /// Image path, relative to the scene file
    pub image: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelationSpec {
    pub left: String,
    pub right: String,
    #[serde(default)]
    pub left_adpositions: Vec<String>,
    #[serde(default)]
    pub right_adpositions: Vec<String>,
    #[serde(default)]
    pub right_is_subject: bool,
    /// Second reference for "between"-style phrases
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnchorSpec {
    pub vertex: String,
    pub phrase: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupSpec {
    pub members: Vec<String>,
    pub width: i32,
    pub height: i32,
    pub image: Option<PathBuf>,
}

fn nominal_width() -> i32 {
    NOMINAL_SIZE.0
}

fn nominal_height() -> i32 {
    NOMINAL_SIZE.1
}

/// A parsed scene description
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneFile {
    pub canvas: CanvasSpec,
    #[serde(rename = "vertex")]
    pub vertices: Vec<VertexSpec>,
    #[serde(rename = "relation")]
    pub relations: Vec<RelationSpec>,
    #[serde(rename = "anchor")]
    pub anchors: Vec<AnchorSpec>,
    #[serde(rename = "group")]
    pub groups: Vec<GroupSpec>,
    /// Directory image paths are resolved against
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl SceneFile {
    /// Load a scene from a TOML file; image paths resolve next to it
    pub fn from_file(path: &Path) -> Result<Self, SceneFileError> {
        let content = std::fs::read_to_string(path)?;
        let mut scene = Self::from_toml_str(&content)?;
        scene.base_dir = path.parent().map(Path::to_path_buf);
        Ok(scene)
    }

    /// Load a scene from a TOML string; image paths resolve against the
    /// working directory
    pub fn from_toml_str(content: &str) -> Result<Self, SceneFileError> {
        Ok(toml::from_str(content)?)
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.canvas.width, self.canvas.height)
    }

    /// Build the sentence graph.
    ///
    /// Phrases the edge factory does not recognize are logged and skipped;
    /// unknown vertex names are errors.
    pub fn build(&self) -> Result<SentenceGraph, SceneFileError> {
        let mut graph = SentenceGraph::new();
        let mut ids: HashMap<&str, VertexId> = HashMap::new();

        for spec in &self.vertices {
            if ids.contains_key(spec.name.as_str()) {
                return Err(SceneFileError::DuplicateVertex(spec.name.clone()));
            }
            let mut vertex = Vertex::new(spec.name.as_str()).with_size(spec.width, spec.height);
            if let Some(path) = &spec.image {
                vertex = vertex.with_image(self.load_image(&spec.name, path)?);
            }
            ids.insert(spec.name.as_str(), graph.add_vertex(vertex));
        }

        let lookup = |name: &str| -> Result<VertexId, SceneFileError> {
            ids.get(name)
                .copied()
                .ok_or_else(|| SceneFileError::UndefinedVertex {
                    name: name.to_string(),
                    suggestions: find_similar(ids.keys().copied(), name, 2),
                })
        };

        for anchor in &self.anchors {
            let vertex = lookup(anchor.vertex.as_str())?;
            if graph.anchor(vertex, &anchor.phrase)?.is_none() {
                warn!(
                    "unrecognized anchor phrase '{}' for '{}'",
                    anchor.phrase, anchor.vertex
                );
            }
        }

        for relation in &self.relations {
            let left = lookup(relation.left.as_str())?;
            let right = lookup(relation.right.as_str())?;
            let reference = relation.reference.as_deref().map(&lookup).transpose()?;

            let mut left_ads = relation.left_adpositions.clone();
            let mut right_ads = relation.right_adpositions.clone();
            let Some(mut found) = edge::relative_edge(
                left,
                right,
                &mut left_ads,
                &mut right_ads,
                relation.right_is_subject,
            ) else {
                warn!(
                    "no relation between '{}' and '{}' for {:?} / {:?}",
                    relation.left,
                    relation.right,
                    relation.left_adpositions,
                    relation.right_adpositions
                );
                continue;
            };
            if let Some(reference) = reference {
                found = found.with_reference(reference);
            }
            debug!("{} -> {}: {:?}", relation.left, relation.right, found);
            graph.add_edge(found)?;
        }

        for group in &self.groups {
            let members = group
                .members
                .iter()
                .map(|m| lookup(m.as_str()))
                .collect::<Result<Vec<_>, _>>()?;
            let label = group.members.join("+");
            let image = group
                .image
                .as_ref()
                .map(|path| self.load_image(&label, path))
                .transpose()?;
            graph.combine(&members, group.width, group.height, image)?;
        }

        Ok(graph)
    }

    fn load_image(&self, name: &str, path: &Path) -> Result<Image, SceneFileError> {
        let full = match &self.base_dir {
            Some(dir) => dir.join(path),
            None => path.to_path_buf(),
        };
        let data = std::fs::read(&full).map_err(|source| SceneFileError::Image {
            path: full.clone(),
            source,
        })?;
        Ok(Image::new(name, mime_for(&full), data))
    }
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Compute Levenshtein edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let n = b_chars.len();

    let mut prev: Vec<usize> = (0..=n).collect();
    for (i, ca) in a_chars.iter().enumerate() {
        let mut row = vec![i + 1; n + 1];
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            row[j + 1] = (prev[j + 1] + 1).min(row[j] + 1).min(prev[j] + cost);
        }
        prev = row;
    }
    prev[n]
}

/// Find defined names within a maximum edit distance, closest first
fn find_similar<'a>(
    defined: impl Iterator<Item = &'a str>,
    target: &str,
    max_distance: usize,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut candidates: Vec<(String, usize)> = defined
        .filter(|name| seen.insert(*name))
        .filter_map(|name| {
            let dist = levenshtein_distance(name, target);
            (dist <= max_distance && dist > 0).then(|| (name.to_string(), dist))
        })
        .collect();

    candidates.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    candidates
        .into_iter()
        .map(|(name, _)| name)
        .take(3)
        .collect()
}
