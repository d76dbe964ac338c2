//! Frame extraction and frame-order writing.
//!
//! Texture paths are found with two independent rules:
//!
//! 1. **Keyframe rule**: a map holding `MaterialAnimConfigs` is followed down
//!    `MaterialAnimConfigs[*].TexturePatternInfos[*].CurveData.KeyFrames`;
//!    every string value of each keyframe map is a frame, in the map's own
//!    order (keys are not sorted numerically).
//! 2. **Texture-key rule**: any map entry whose key contains `texture`
//!    (case-insensitive) and whose value is a string.
//!
//! Strings found directly inside sequences are frames too. The same path can
//! be collected more than once through different rules; duplicates are real
//! animation frames and are kept.
//!
//! The writer follows the keyframe rule to the *first* keyframe map and
//! replaces it with `"0".."N-1"` keys in frame-list order.

use indexmap::IndexSet;
use log::{debug, trace};
use std::path::Path;

use super::document::{Document, KEY_FRAME_COUNT, KEY_NAME};
use super::node::{Node, NodeMap, NodePath, PathSeg};

pub const KEY_ANIM_CONFIGS: &str = "MaterialAnimConfigs";
pub const KEY_TEXTURE_PATTERNS: &str = "TexturePatternInfos";
pub const KEY_CURVE_DATA: &str = "CurveData";
pub const KEY_KEY_FRAMES: &str = "KeyFrames";
pub const KEY_IS_CONSTANT: &str = "IsConstant";

/// One structural predicate applied to a single tree level.
#[derive(Clone, Copy, Debug)]
pub enum Step {
    /// Node is a map containing this key; descend into its value
    Key(&'static str),
    /// Node is a sequence; descend into every item
    Each,
    /// Node is a non-empty sequence; descend into its first item
    First,
}

/// Animation-config map → keyframe map
pub const KEYFRAME_RULE: &[Step] = &[
    Step::Key(KEY_ANIM_CONFIGS),
    Step::Each,
    Step::Key(KEY_TEXTURE_PATTERNS),
    Step::Each,
    Step::Key(KEY_CURVE_DATA),
    Step::Key(KEY_KEY_FRAMES),
];

/// Animation-config map → first texture pattern of every material
pub const FIRST_PATTERN_RULE: &[Step] = &[
    Step::Key(KEY_ANIM_CONFIGS),
    Step::Each,
    Step::Key(KEY_TEXTURE_PATTERNS),
    Step::First,
];

/// Collect every node reachable from `node` through `steps`, with its path
/// relative to `node`, in document order.
pub fn match_rule<'a>(node: &'a Node, steps: &[Step]) -> Vec<(NodePath, &'a Node)> {
    let mut out = Vec::new();
    let mut path = NodePath::new();
    walk_steps(node, steps, &mut path, &mut out);
    out
}

fn walk_steps<'a>(
    node: &'a Node,
    steps: &[Step],
    path: &mut NodePath,
    out: &mut Vec<(NodePath, &'a Node)>,
) {
    let Some((step, rest)) = steps.split_first() else {
        out.push((path.clone(), node));
        return;
    };
    match (*step, node) {
        (Step::Key(key), Node::Map(map)) => {
            if let Some(child) = map.get(key) {
                path.push(PathSeg::Key(key.to_string()));
                walk_steps(child, rest, path, out);
                path.pop();
            }
        }
        (Step::Each, Node::Seq(items)) => {
            for (i, item) in items.iter().enumerate() {
                path.push(PathSeg::Index(i));
                walk_steps(item, rest, path, out);
                path.pop();
            }
        }
        (Step::First, Node::Seq(items)) => {
            if let Some(item) = items.first() {
                path.push(PathSeg::Index(0));
                walk_steps(item, rest, path, out);
                path.pop();
            }
        }
        _ => {}
    }
}

/// Frames and unique textures found in a document
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extraction {
    /// Ordered frame list (duplicates allowed)
    pub frames: Vec<String>,
    /// Distinct texture paths in first-seen order
    pub unique: IndexSet<String>,
}

impl Extraction {
    fn push(&mut self, path: &str) {
        self.frames.push(path.to_string());
        self.unique.insert(path.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

fn is_texture_entry(key: &str, value: &Node) -> bool {
    value.as_str().is_some() && key.to_lowercase().contains("texture")
}

fn is_container(node: &Node) -> bool {
    matches!(node, Node::Map(_) | Node::Seq(_))
}

/// Walk the tree and collect frames. Pure: the tree is not touched.
pub fn extract(root: &Node) -> Extraction {
    let mut out = Extraction::default();
    visit(root, &mut out);
    out
}

fn visit(node: &Node, out: &mut Extraction) {
    match node {
        Node::Map(map) => {
            if map.contains_key(KEY_ANIM_CONFIGS) {
                for (path, keyframes) in match_rule(node, KEYFRAME_RULE) {
                    let Some(frames) = keyframes.as_map() else {
                        continue;
                    };
                    trace!("Keyframe map at {:?}: {} entries", path, frames.len());
                    for value in frames.values() {
                        if let Some(s) = value.as_str() {
                            out.push(s);
                        }
                    }
                }
            }
            for (key, value) in map {
                if is_texture_entry(key, value) {
                    if let Some(s) = value.as_str() {
                        out.push(s);
                    }
                } else if is_container(value) {
                    visit(value, out);
                }
            }
        }
        Node::Seq(items) => {
            for item in items {
                if let Some(s) = item.as_str() {
                    out.push(s);
                } else if is_container(item) {
                    visit(item, out);
                }
            }
        }
        Node::Scalar(_) => {}
    }
}

/// Extract frames and record the result on the document root:
/// `FrameCount` becomes the frame count and a blank `Name` is filled from
/// the source file stem.
///
/// A document whose root cannot take those fields yields an empty result,
/// the same as a document with no discoverable frames.
pub fn extract_into(doc: &mut Document, source: Option<&Path>) -> Extraction {
    let found = extract(doc.root());
    if found.is_empty() {
        return found;
    }
    let root = doc.root_mut();
    if root.as_map().is_none() {
        debug!("Document root is not a map, discarding {} frames", found.frames.len());
        return Extraction::default();
    }

    root.set(KEY_FRAME_COUNT, Node::uint(found.frames.len() as u64));

    let name_blank = root.get(KEY_NAME).is_none_or(Node::is_blank);
    if name_blank
        && let Some(stem) = source
            .and_then(|p| p.file_stem())
            .and_then(|s| s.to_str())
    {
        root.set(KEY_NAME, Node::string(stem));
    }

    debug!(
        "Extracted {} frames ({} unique textures)",
        found.frames.len(),
        found.unique.len()
    );
    found
}

/// Locate the first keyframe map: the first map in depth-first order that
/// holds `MaterialAnimConfigs`, then its first keyframe-rule match.
pub fn first_keyframes_path(root: &Node) -> Option<NodePath> {
    let mut prefix = NodePath::new();
    find_keyframes(root, &mut prefix)
}

fn find_keyframes(node: &Node, prefix: &mut NodePath) -> Option<NodePath> {
    match node {
        Node::Map(map) => {
            if map.contains_key(KEY_ANIM_CONFIGS)
                && let Some((rel, _)) = match_rule(node, KEYFRAME_RULE).into_iter().next()
            {
                let mut full = prefix.clone();
                full.extend(rel);
                return Some(full);
            }
            for (key, value) in map {
                prefix.push(PathSeg::Key(key.clone()));
                let found = find_keyframes(value, prefix);
                prefix.pop();
                if found.is_some() {
                    return found;
                }
            }
            None
        }
        Node::Seq(items) => {
            for (i, item) in items.iter().enumerate() {
                prefix.push(PathSeg::Index(i));
                let found = find_keyframes(item, prefix);
                prefix.pop();
                if found.is_some() {
                    return found;
                }
            }
            None
        }
        Node::Scalar(_) => None,
    }
}

/// Build a keyframe map with consecutive keys in list order
pub fn keyframe_map(frames: &[String]) -> NodeMap {
    frames
        .iter()
        .enumerate()
        .map(|(i, f)| (i.to_string(), Node::string(f.as_str())))
        .collect()
}

/// Rewrite the first keyframe map from `frames`.
///
/// Returns false (document untouched) when no keyframe structure exists.
pub fn write_order(doc: &mut Document, frames: &[String]) -> bool {
    let Some(path) = first_keyframes_path(doc.root()) else {
        debug!("No keyframe map in document, frame order not written");
        return false;
    };
    match doc.root_mut().at_path_mut(&path) {
        Some(slot) => {
            *slot = Node::Map(keyframe_map(frames));
            debug!("Wrote {} keyframes at {:?}", frames.len(), path);
            true
        }
        None => false,
    }
}

/// Values of the first keyframe map, in map order
pub fn read_keyframes(doc: &Document) -> Option<Vec<String>> {
    let path = first_keyframes_path(doc.root())?;
    let map = doc.root().at_path(&path)?.as_map()?;
    Some(
        map.values()
            .filter_map(Node::as_str)
            .map(str::to_string)
            .collect(),
    )
}
