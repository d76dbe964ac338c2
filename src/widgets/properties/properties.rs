//! Form buffers mirrored from the document.

use crate::entities::document::{Document, MaterialInfo};

pub const FRAME_COUNT_MIN: u32 = 1;
pub const FRAME_COUNT_MAX: u32 = 9999;

/// Editable copy of the document's properties.
///
/// Text fields are committed on focus loss, so the buffers can diverge from
/// the document while the user types. `sync` only refreshes them when the
/// session revision moved.
#[derive(Clone, Debug, Default)]
pub struct PropertiesForm {
    pub name: String,
    pub path: String,
    pub loop_enabled: bool,
    pub frame_count: u32,
    pub is_constant: bool,
    pub materials: Vec<MaterialInfo>,
    /// Text field values as of the last sync
    synced_name: String,
    synced_path: String,
    synced_materials: Vec<MaterialInfo>,
    revision: Option<u64>,
}

impl PropertiesForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh from `doc` when `revision` differs from the last sync
    pub fn sync(&mut self, doc: &Document, revision: u64) {
        if self.revision == Some(revision) {
            return;
        }
        self.name = doc.name();
        self.path = doc.path();
        self.loop_enabled = doc.loop_enabled();
        self.frame_count = doc
            .frame_count()
            .map(|n| n.clamp(u64::from(FRAME_COUNT_MIN), u64::from(FRAME_COUNT_MAX)) as u32)
            .unwrap_or(FRAME_COUNT_MIN);
        self.is_constant = doc.is_constant();
        self.materials = doc.materials();
        self.synced_name = self.name.clone();
        self.synced_path = self.path.clone();
        self.synced_materials = self.materials.clone();
        self.revision = Some(revision);
    }

    pub fn name_edited(&self) -> bool {
        self.name != self.synced_name
    }

    pub fn path_edited(&self) -> bool {
        self.path != self.synced_path
    }

    /// Whether the material at `slot` in `materials` was renamed since sync
    pub fn material_edited(&self, slot: usize) -> bool {
        match (self.materials.get(slot), self.synced_materials.get(slot)) {
            (Some(current), Some(synced)) => current.name != synced.name,
            (Some(_), None) => true,
            _ => false,
        }
    }

    /// Forget the document (closed or none open)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
Name: walk
Path: anims/walk
Loop: true
FrameCount: 120000
MaterialAnimConfigs:
- Name: body
  TexturePatternInfos:
  - IsConstant: true
- Name: face
";

    #[test]
    fn test_sync_reads_document() {
        let doc = Document::parse(DOC).unwrap();
        let mut form = PropertiesForm::new();
        form.sync(&doc, 1);
        assert_eq!(form.name, "walk");
        assert_eq!(form.path, "anims/walk");
        assert!(form.loop_enabled);
        assert_eq!(form.frame_count, FRAME_COUNT_MAX);
        assert!(form.is_constant);
        let names: Vec<_> = form.materials.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["body", "face"]);
    }

    #[test]
    fn test_sync_keeps_edits_until_revision_changes() {
        let doc = Document::parse(DOC).unwrap();
        let mut form = PropertiesForm::new();
        form.sync(&doc, 1);
        form.name = "typing...".into();
        form.sync(&doc, 1);
        assert_eq!(form.name, "typing...");
        form.sync(&doc, 2);
        assert_eq!(form.name, "walk");
    }

    #[test]
    fn test_untouched_fields_are_not_edited() {
        let doc = Document::parse(DOC).unwrap();
        let mut form = PropertiesForm::new();
        form.sync(&doc, 1);
        assert!(!form.name_edited());
        assert!(!form.path_edited());
        assert!(!form.material_edited(0));
        assert!(!form.material_edited(1));

        form.name = "run".into();
        form.materials[1].name = "head".into();
        assert!(form.name_edited());
        assert!(!form.path_edited());
        assert!(!form.material_edited(0));
        assert!(form.material_edited(1));

        // typing back the original value is not an edit
        form.name = "walk".into();
        assert!(!form.name_edited());

        form.sync(&doc, 2);
        assert!(!form.material_edited(1));
    }

    #[test]
    fn test_template_defaults() {
        let mut form = PropertiesForm::new();
        form.sync(&Document::template(), 7);
        assert_eq!(form.name, "");
        assert_eq!(form.path, "");
        assert_eq!(form.frame_count, 1);
        assert!(!form.is_constant);
        assert_eq!(form.materials.len(), 1);
    }
}
