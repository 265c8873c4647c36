//! Target location: which host layout is on screen, and where the editor
//! and its surrounding panels are.
//!
//! Pure queries over the live document. Every lookup tolerates absence:
//! mid-navigation the page routinely contains none of the expected
//! structure, and the right answer is "not this cycle".

use vromax_core::variant::{
    HORIZONTAL_SPLIT_MARKER, LayoutVariant, SCHEMA_AREA_MARKER, VariantProbes,
};
use web_sys::{Document, Element};

use crate::dom;

/// The detected editor root plus the layout variant it was found under.
///
/// Compared by element identity: SPA navigation replaces the editor element,
/// and identity is what decides reinstallation.
#[derive(Debug, Clone)]
pub struct EditorHandle {
    pub element: Element,
    pub variant: LayoutVariant,
}

impl PartialEq for EditorHandle {
    fn eq(&self, other: &Self) -> bool {
        self.element == other.element
    }
}

/// Probe the document for variant markers and classify.
#[must_use]
pub fn detect_variant(document: &Document) -> LayoutVariant {
    LayoutVariant::from_probes(&VariantProbes {
        horizontal_split_layout: dom::query(document, HORIZONTAL_SPLIT_MARKER).is_some(),
        schema_area: dom::query(document, SCHEMA_AREA_MARKER).is_some(),
    })
}

/// Resolve the editor root via the variant's fallback chain.
#[must_use]
pub fn find_editor() -> Option<EditorHandle> {
    let document = dom::document()?;
    let variant = detect_variant(&document);
    let element = dom::query_any(&document, variant.editor_selectors())?;
    Some(EditorHandle { element, variant })
}

/// Panels and chrome the toggle engine mutates. Any of them may be absent.
#[derive(Debug, Clone, Default)]
pub struct PanelSet {
    pub first_panel: Option<Element>,
    pub second_panel: Option<Element>,
    pub gutter: Option<Element>,
    pub chrome: Vec<Element>,
}

/// Resolve the variant's panel/chrome selectors against the live document.
/// Re-run on every toggle: the host rebuilds these elements freely.
#[must_use]
pub fn resolve_panels(document: &Document, variant: LayoutVariant) -> PanelSet {
    let selectors = variant.panel_selectors();
    let mut chrome: Vec<Element> = Vec::new();
    for selector in selectors.chrome {
        if let Some(element) = dom::query(document, selector) {
            if !chrome.contains(&element) {
                chrome.push(element);
            }
        }
    }
    PanelSet {
        first_panel: dom::query(document, selectors.first_panel),
        second_panel: dom::query(document, selectors.second_panel),
        gutter: dom::query_any(document, selectors.gutters),
        chrome,
    }
}
