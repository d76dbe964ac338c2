//! Editing session: the single owner of the open document and its frame list.
//!
//! Widgets never reach into the document. The app routes their events to the
//! narrow operations here (`open`, `reorder_frame`, `set_property`, ...).
//!
//! # Invariant
//!
//! After any structural frame edit completes, the first keyframe map of the
//! document holds exactly the frame list, keys `"0".."N-1"` in list order.
//! Edits are staged on a copy of the document and committed only after the
//! copy serialized (and, when a file is open, was written), so a failure
//! leaves the previous state intact.

use indexmap::IndexSet;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use super::export::{ExportReport, ExportSettings, export_gif};
use super::textures::require_texture;
use crate::entities::document::{Document, Property};
use crate::entities::frames::{extract_into, write_order};
use crate::error::{EditorError, Result};

#[derive(Debug, Default)]
pub struct EditSession {
    document: Option<Document>,
    /// Backing file (None for a new, unsaved document)
    file: Option<PathBuf>,
    /// Directory frame paths are resolved against
    base_dir: PathBuf,
    frames: Vec<String>,
    unique: IndexSet<String>,
    /// Serialized form of `document` as last produced
    text: String,
    /// Bumped on every committed change, so views know to refresh
    revision: u64,
}

impl EditSession {
    pub fn new() -> Self {
        Self {
            base_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            ..Self::default()
        }
    }

    // === Accessors ===

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn unique_textures(&self) -> &IndexSet<String> {
        &self.unique
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn require_document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| EditorError::NotFound("no document open".into()))
    }

    // === Loading ===

    /// Open a document file. On failure the current session is untouched.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let text = fs::read_to_string(path).map_err(|e| EditorError::io(path, e))?;
        let mut doc = Document::parse(&text)?;
        let found = extract_into(&mut doc, Some(path));
        let serialized = if found.is_empty() { text } else { doc.to_yaml()? };

        let abs = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        self.base_dir = abs.parent().map(Path::to_path_buf).unwrap_or_default();
        self.file = Some(path.to_path_buf());
        self.document = Some(doc);
        self.frames = found.frames;
        self.unique = found.unique;
        self.text = serialized;
        self.revision += 1;

        info!(
            "Opened {}: {} frames, {} unique textures",
            path.display(),
            self.frames.len(),
            self.unique.len()
        );
        Ok(())
    }

    /// Start an unsaved document from the template
    pub fn new_document(&mut self) -> Result<()> {
        let doc = Document::template();
        self.text = doc.to_yaml()?;
        self.document = Some(doc);
        self.file = None;
        self.frames.clear();
        self.unique.clear();
        self.revision += 1;
        info!("New document");
        Ok(())
    }

    // === Frame edits ===

    /// Replace the frame list, rewriting the keyframe map and persisting.
    ///
    /// Fails with NotFound (nothing changed) when the document has no
    /// keyframe structure to write into.
    pub fn set_frames(&mut self, frames: Vec<String>) -> Result<()> {
        let mut staged = self.require_document()?.clone();
        if !write_order(&mut staged, &frames) {
            return Err(EditorError::NotFound(
                "no keyframe map (MaterialAnimConfigs/TexturePatternInfos/CurveData/KeyFrames) in document"
                    .into(),
            ));
        }
        let text = self.persist(&staged)?;

        for f in &frames {
            self.unique.insert(f.clone());
        }
        self.document = Some(staged);
        self.frames = frames;
        self.text = text;
        self.revision += 1;
        Ok(())
    }

    /// Move the frame at `from` so it ends up at index `to`
    pub fn reorder_frame(&mut self, from: usize, to: usize) -> Result<bool> {
        let len = self.frames.len();
        if from >= len || to >= len || from == to {
            return Ok(false);
        }
        let mut frames = self.frames.clone();
        let frame = frames.remove(from);
        frames.insert(to, frame);
        self.set_frames(frames)?;
        debug!("Moved frame {} -> {}", from, to);
        Ok(true)
    }

    /// Append a frame; blank paths are ignored
    pub fn add_frame(&mut self, path: &str) -> Result<bool> {
        let path = path.trim();
        if path.is_empty() {
            return Ok(false);
        }
        let mut frames = self.frames.clone();
        frames.push(path.to_string());
        self.set_frames(frames)?;
        debug!("Added frame {}", path);
        Ok(true)
    }

    /// Remove the frame at `index`, returning it
    pub fn delete_frame(&mut self, index: usize) -> Result<Option<String>> {
        if index >= self.frames.len() {
            return Ok(None);
        }
        let mut frames = self.frames.clone();
        let removed = frames.remove(index);
        self.set_frames(frames)?;
        debug!("Deleted frame {}: {}", index, removed);
        Ok(Some(removed))
    }

    // === Properties ===

    pub fn set_property(&mut self, prop: &Property) -> Result<()> {
        let mut staged = self.require_document()?.clone();
        staged.apply(prop)?;
        let text = self.persist(&staged)?;
        self.document = Some(staged);
        self.text = text;
        self.revision += 1;
        debug!("Property set: {:?}", prop);
        Ok(())
    }

    // === Saving ===

    /// Save raw document text (text editor contents).
    ///
    /// The text must parse; it is written verbatim to `target` (or the open
    /// file) and then becomes the session's document. Returns the path
    /// written.
    pub fn save_text(&mut self, text: &str, target: Option<PathBuf>) -> Result<PathBuf> {
        let mut doc = Document::parse(text)?;
        let path = target
            .or_else(|| self.file.clone())
            .ok_or_else(|| EditorError::NotFound("no file path to save to".into()))?;
        fs::write(&path, text).map_err(|e| EditorError::io(&path, e))?;

        let found = extract_into(&mut doc, Some(&path));
        self.text = if found.is_empty() { text.to_string() } else { doc.to_yaml()? };
        let abs = std::path::absolute(&path).unwrap_or_else(|_| path.clone());
        self.base_dir = abs.parent().map(Path::to_path_buf).unwrap_or_default();
        self.file = Some(path.clone());
        self.document = Some(doc);
        self.frames = found.frames;
        self.unique = found.unique;
        self.revision += 1;

        info!("Saved {}", path.display());
        Ok(path)
    }

    /// Serialize a staged document and write it to the open file, if any
    fn persist(&self, doc: &Document) -> Result<String> {
        match &self.file {
            Some(path) => {
                let text = doc.save(path)?;
                debug!("Persisted {}", path.display());
                Ok(text)
            }
            None => doc.to_yaml(),
        }
    }

    // === Textures ===

    /// Resolve the texture file for frame `index`
    pub fn resolve_frame(&self, index: usize) -> Result<PathBuf> {
        let frame = self
            .frames
            .get(index)
            .ok_or_else(|| EditorError::NotFound(format!("frame {}", index)))?;
        require_texture(&self.base_dir, frame)
    }

    pub fn export_gif(&self, settings: &ExportSettings) -> Result<ExportReport> {
        if self.frames.is_empty() {
            return Err(EditorError::Export("no animation frames available to export".into()));
        }
        export_gif(&self.base_dir, &self.frames, settings)
    }
}
