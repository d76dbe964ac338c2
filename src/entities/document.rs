//! Animation definition document.
//!
//! Owns the parsed [`Node`] tree and exposes the handful of top-level
//! properties the editor form works with. Mutations happen in place and
//! [`Document::to_yaml`] re-serializes in the tree's own key order.

use log::debug;
use std::fs;
use std::path::Path;

use super::frames::{
    FIRST_PATTERN_RULE, KEY_ANIM_CONFIGS, KEY_CURVE_DATA, KEY_IS_CONSTANT, KEY_KEY_FRAMES,
    KEY_TEXTURE_PATTERNS, match_rule,
};
use super::node::{Node, NodeMap, PathSeg};
use crate::error::{EditorError, Result};

pub const KEY_NAME: &str = "Name";
pub const KEY_PATH: &str = "Path";
pub const KEY_LOOP: &str = "Loop";
pub const KEY_FRAME_COUNT: &str = "FrameCount";

/// Editable document property
#[derive(Clone, Debug, PartialEq)]
pub enum Property {
    /// Blank input leaves the name unchanged
    Name(String),
    /// Blank input stores null
    Path(String),
    Loop(bool),
    FrameCount(u32),
    /// Applied to the first texture pattern of every material
    IsConstant(bool),
    MaterialName { index: usize, name: String },
}

/// Material entry as shown in the property form
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialInfo {
    pub index: usize,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    root: Node,
}

impl Document {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    /// Parse document text. Blank text yields [`Document::template`].
    ///
    /// Duplicate mapping keys are a parse error rather than last-one-wins.
    pub fn parse(text: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(text)?;
        if value.is_null() {
            debug!("Blank document, using template");
            return Ok(Self::template());
        }
        Ok(Self::new(Node::try_from(value)?))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| EditorError::io(path, e))?;
        Self::parse(&text)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.root)?)
    }

    /// Serialize and write to `path` (not atomic)
    pub fn save(&self, path: &Path) -> Result<String> {
        let text = self.to_yaml()?;
        fs::write(path, &text).map_err(|e| EditorError::io(path, e))?;
        Ok(text)
    }

    /// Skeleton of a new single-material animation
    pub fn template() -> Self {
        let mut curve = NodeMap::new();
        curve.insert(KEY_KEY_FRAMES.into(), Node::map());

        let mut pattern = NodeMap::new();
        pattern.insert(KEY_NAME.into(), Node::string("_a0"));
        pattern.insert(KEY_IS_CONSTANT.into(), Node::bool(false));
        pattern.insert("ConstantValue".into(), Node::null());
        pattern.insert(KEY_CURVE_DATA.into(), Node::Map(curve));

        let mut material = NodeMap::new();
        material.insert(KEY_NAME.into(), Node::string(""));
        material.insert(KEY_TEXTURE_PATTERNS.into(), Node::Seq(vec![Node::Map(pattern)]));
        material.insert("ParamInfos".into(), Node::Seq(Vec::new()));

        let mut root = NodeMap::new();
        root.insert(KEY_NAME.into(), Node::string(""));
        root.insert(KEY_PATH.into(), Node::null());
        root.insert(KEY_LOOP.into(), Node::bool(false));
        root.insert(KEY_FRAME_COUNT.into(), Node::uint(1));
        root.insert(KEY_ANIM_CONFIGS.into(), Node::Seq(vec![Node::Map(material)]));

        Self::new(Node::Map(root))
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    // === Top-level properties ===

    pub fn name(&self) -> String {
        self.root.get(KEY_NAME).map(Node::display_text).unwrap_or_default()
    }

    pub fn path(&self) -> String {
        self.root.get(KEY_PATH).map(Node::display_text).unwrap_or_default()
    }

    pub fn loop_enabled(&self) -> bool {
        self.root.get(KEY_LOOP).and_then(Node::as_bool).unwrap_or(false)
    }

    pub fn frame_count(&self) -> Option<u64> {
        self.root.get(KEY_FRAME_COUNT).and_then(Node::as_u64)
    }

    /// Materials listed under `MaterialAnimConfigs`, non-map entries skipped
    pub fn materials(&self) -> Vec<MaterialInfo> {
        self.root
            .get(KEY_ANIM_CONFIGS)
            .and_then(Node::as_seq)
            .map(|items| {
                items
                    .iter()
                    .enumerate()
                    .filter(|(_, m)| m.as_map().is_some())
                    .map(|(index, m)| MaterialInfo {
                        index,
                        name: m.get(KEY_NAME).map(Node::display_text).unwrap_or_default(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `IsConstant` of the first material's first texture pattern
    pub fn is_constant(&self) -> bool {
        match_rule(&self.root, FIRST_PATTERN_RULE)
            .first()
            .and_then(|(_, pattern)| pattern.get(KEY_IS_CONSTANT))
            .and_then(Node::as_bool)
            .unwrap_or(false)
    }

    /// Apply a property edit to the tree
    pub fn apply(&mut self, prop: &Property) -> Result<()> {
        if self.root.as_map().is_none() {
            return Err(EditorError::NotFound("document root is not a map".into()));
        }
        match prop {
            Property::Name(name) => {
                let name = name.trim();
                if !name.is_empty() {
                    self.root.set(KEY_NAME, Node::string(name));
                }
            }
            Property::Path(path) => {
                let path = path.trim();
                let value = if path.is_empty() {
                    Node::null()
                } else {
                    Node::string(path)
                };
                self.root.set(KEY_PATH, value);
            }
            Property::Loop(enabled) => {
                self.root.set(KEY_LOOP, Node::bool(*enabled));
            }
            Property::FrameCount(count) => {
                self.root.set(KEY_FRAME_COUNT, Node::uint(u64::from(*count)));
            }
            Property::IsConstant(constant) => {
                let paths: Vec<_> = match_rule(&self.root, FIRST_PATTERN_RULE)
                    .into_iter()
                    .map(|(path, _)| path)
                    .collect();
                for path in &paths {
                    if let Some(pattern) = self.root.at_path_mut(path) {
                        pattern.set(KEY_IS_CONSTANT, Node::bool(*constant));
                    }
                }
                debug!("IsConstant={} on {} patterns", constant, paths.len());
            }
            Property::MaterialName { index, name } => {
                let path = [PathSeg::Key(KEY_ANIM_CONFIGS.into()), PathSeg::Index(*index)];
                let material = self
                    .root
                    .at_path_mut(&path)
                    .filter(|m| m.as_map().is_some())
                    .ok_or_else(|| EditorError::NotFound(format!("material #{}", index)))?;
                material.set(KEY_NAME, Node::string(name.as_str()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_MATERIALS: &str = "\
Name: idle
Path: anims/idle
Loop: false
FrameCount: 2
MaterialAnimConfigs:
- Name: skin
  TexturePatternInfos:
  - Name: _a0
    IsConstant: true
    CurveData:
      KeyFrames:
        '0': a
  - Name: _a1
    IsConstant: false
- Name: eyes
  TexturePatternInfos:
  - Name: _a0
    IsConstant: false
";

    #[test]
    fn test_parse_error() {
        assert!(matches!(Document::parse("a: [1"), Err(EditorError::Parse(_))));
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let err = Document::parse("Name: a\nName: b\n").unwrap_err();
        assert!(matches!(err, EditorError::Parse(ref msg) if msg.contains("Name")));
    }

    #[test]
    fn test_blank_text_is_template() {
        let doc = Document::parse("# just a comment\n").unwrap();
        assert_eq!(doc, Document::template());
        assert_eq!(doc.frame_count(), Some(1));
        assert_eq!(doc.materials().len(), 1);
    }

    #[test]
    fn test_template_serialization() {
        let text = Document::template().to_yaml().unwrap();
        assert!(text.starts_with("Name: ''\nPath: null\nLoop: false\nFrameCount: 1\n"));
        assert!(text.contains("KeyFrames: {}"));
        assert!(text.contains("ParamInfos: []"));
    }

    #[test]
    fn test_basic_properties() {
        let doc = Document::parse(TWO_MATERIALS).unwrap();
        assert_eq!(doc.name(), "idle");
        assert_eq!(doc.path(), "anims/idle");
        assert!(!doc.loop_enabled());
        assert_eq!(doc.frame_count(), Some(2));
        assert!(doc.is_constant());
        let names: Vec<String> = doc.materials().into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["skin", "eyes"]);
    }

    #[test]
    fn test_apply_name_and_path() {
        let mut doc = Document::parse(TWO_MATERIALS).unwrap();
        doc.apply(&Property::Name("   ".into())).unwrap();
        assert_eq!(doc.name(), "idle");
        doc.apply(&Property::Name(" run ".into())).unwrap();
        assert_eq!(doc.name(), "run");

        doc.apply(&Property::Path(String::new())).unwrap();
        assert_eq!(doc.root().get(KEY_PATH), Some(&Node::null()));
        doc.apply(&Property::Path("x/y".into())).unwrap();
        assert_eq!(doc.path(), "x/y");
    }

    #[test]
    fn test_apply_loop_and_frame_count() {
        let mut doc = Document::parse(TWO_MATERIALS).unwrap();
        doc.apply(&Property::Loop(true)).unwrap();
        doc.apply(&Property::FrameCount(12)).unwrap();
        assert!(doc.loop_enabled());
        assert_eq!(doc.frame_count(), Some(12));
        assert!(doc.to_yaml().unwrap().starts_with("Name: idle\nPath: anims/idle\nLoop: true\nFrameCount: 12\n"));
    }

    #[test]
    fn test_is_constant_hits_first_pattern_of_each_material() {
        let mut doc = Document::parse(TWO_MATERIALS).unwrap();
        doc.apply(&Property::IsConstant(false)).unwrap();
        let root = doc.root();
        let configs = root.get(KEY_ANIM_CONFIGS).and_then(Node::as_seq).unwrap();
        let flag = |m: usize, p: usize| {
            configs[m].get(KEY_TEXTURE_PATTERNS).and_then(Node::as_seq).unwrap()[p]
                .get(KEY_IS_CONSTANT)
                .and_then(Node::as_bool)
        };
        assert_eq!(flag(0, 0), Some(false));
        assert_eq!(flag(0, 1), Some(false));
        assert_eq!(flag(1, 0), Some(false));

        doc.apply(&Property::IsConstant(true)).unwrap();
        let configs = doc.root().get(KEY_ANIM_CONFIGS).and_then(Node::as_seq).unwrap();
        let second = configs[0].get(KEY_TEXTURE_PATTERNS).and_then(Node::as_seq).unwrap()[1]
            .get(KEY_IS_CONSTANT)
            .and_then(Node::as_bool);
        assert_eq!(second, Some(false));
        assert!(doc.is_constant());
    }

    #[test]
    fn test_material_rename() {
        let mut doc = Document::parse(TWO_MATERIALS).unwrap();
        doc.apply(&Property::MaterialName { index: 1, name: "pupils".into() }).unwrap();
        assert_eq!(doc.materials()[1].name, "pupils");
        let err = doc.apply(&Property::MaterialName { index: 5, name: "x".into() });
        assert!(matches!(err, Err(EditorError::NotFound(_))));
    }

    #[test]
    fn test_apply_on_sequence_root() {
        let mut doc = Document::parse("- a\n- b\n").unwrap();
        assert!(matches!(
            doc.apply(&Property::Loop(true)),
            Err(EditorError::NotFound(_))
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idle.yaml");
        let doc = Document::parse(TWO_MATERIALS).unwrap();
        let written = doc.save(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), written);
        assert_eq!(Document::from_file(&path).unwrap(), doc);
    }

    #[test]
    fn test_missing_file() {
        let err = Document::from_file(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, EditorError::Io { .. }));
    }
}
