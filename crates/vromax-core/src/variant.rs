//! Host layout variants and the selector tables that go with them.
//!
//! VCF Operations Orchestrator shipped two markups for its editor pages: the
//! Clarity-era layout ("legacy") and the VCF 9+ layout built around
//! `split-layout` / `.schema-area-container`. Which one is on screen decides
//! where the editor lives, which panels flank it, and which chrome has to be
//! hidden to reclaim vertical space. Detection is a pure function of two
//! marker probes and is recomputed on every scan; navigation can swap the
//! markup under us without a reload.

/// Marker selector whose presence indicates the VCF 9+ layout.
pub const HORIZONTAL_SPLIT_MARKER: &str = r#"split-layout[class*="horizontal"]"#;
/// Second VCF 9+ marker; either probe alone is sufficient.
pub const SCHEMA_AREA_MARKER: &str = ".schema-area-container";

/// Class on the first panel that marks an action view (editor in the first
/// panel, vertical split) rather than a workflow view.
pub const ACTION_VIEW_MARKER_CLASS: &str = "editor-area";

/// Outer editor container, common to both variants.
pub const EDITOR_BOX_SELECTOR: &str = ".editor-box";
/// Inner Monaco editor root, common to both variants.
pub const MONACO_EDITOR_SELECTOR: &str = ".monaco-editor";

/// Width applied to the sidebar panel while it animates out.
pub const COLLAPSED_FIRST_PANEL_WIDTH: &str = "5%";
/// Width applied to the editor panel during workflow-view expansion.
pub const EXPANDED_SECOND_PANEL_WIDTH: &str = "95%";

/// Which of the two host markups is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutVariant {
    /// Clarity-era markup, also covers action views routed to the old layout.
    Legacy,
    /// VCF Operations Orchestrator 9+.
    Vcf9,
}

/// Results of probing the document for variant markers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VariantProbes {
    /// `split-layout[class*="horizontal"]` matched.
    pub horizontal_split_layout: bool,
    /// `.schema-area-container` matched.
    pub schema_area: bool,
}

/// Per-variant selectors the toggle engine operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSelectors {
    pub split_layout: &'static str,
    pub first_panel: &'static str,
    pub second_panel: &'static str,
    /// Tried in order; horizontal before vertical before the bare class.
    pub gutters: &'static [&'static str],
    /// Toolbars, tab strips, parameter/action bars hidden during expansion.
    pub chrome: &'static [&'static str],
}

impl LayoutVariant {
    /// Classify from marker probes. Any VCF 9+ marker wins.
    #[must_use]
    pub fn from_probes(probes: &VariantProbes) -> Self {
        if probes.horizontal_split_layout || probes.schema_area {
            Self::Vcf9
        } else {
            Self::Legacy
        }
    }

    /// Editor root fallback chain, most specific first.
    #[must_use]
    pub const fn editor_selectors(self) -> &'static [&'static str] {
        match self {
            Self::Vcf9 => &[MONACO_EDITOR_SELECTOR, ".editor-panel", ".split-right"],
            Self::Legacy => &[
                MONACO_EDITOR_SELECTOR,
                "[data-mpt]",
                ".monaco-scrollable-element",
            ],
        }
    }

    /// Panel and chrome selectors for this variant.
    #[must_use]
    pub const fn panel_selectors(self) -> PanelSelectors {
        match self {
            Self::Vcf9 => PanelSelectors {
                split_layout: "split-layout.horizontal",
                first_panel: ".schema-area-container .firstPanel",
                second_panel: ".schema-area-container .secondPanel",
                gutters: &[
                    ".schema-area-container .gutter-horizontal",
                    ".schema-area-container .gutter",
                ],
                chrome: &[
                    ".button-bar",
                    ".prototypes > clr-tabs > ul",
                    "#parameter-pills",
                    ".actions",
                    ".collapse-element-container",
                    ".schema-area-container .button-bar",
                ],
            },
            Self::Legacy => PanelSelectors {
                split_layout: "split-layout",
                first_panel: ".firstPanel",
                second_panel: ".secondPanel",
                gutters: &[".gutter-horizontal", ".gutter-vertical", ".gutter"],
                chrome: &[
                    ".button-bar",
                    ".prototypes > clr-tabs > ul",
                    ".action-header",
                    "#parameter-pills",
                    ".actions",
                    ".collapse-element-container",
                ],
            },
        }
    }

    /// Viewport offset (px) for the outer `.editor-box` height.
    ///
    /// Legacy keeps its action header visible in some action views, so it
    /// reserves more room than VCF 9+.
    #[must_use]
    pub const fn container_offset_px(self) -> u32 {
        match self {
            Self::Vcf9 => 50,
            Self::Legacy => 60,
        }
    }

    /// Viewport offset (px) for the inner Monaco editor height.
    #[must_use]
    pub const fn editor_offset_px(self) -> u32 {
        match self {
            Self::Vcf9 => 70,
            Self::Legacy => 85,
        }
    }
}

/// Panel arrangement of the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// Horizontal split: sidebar/schema first, editor second.
    Workflow,
    /// Vertical split: editor first, logs/details second.
    Action,
}

impl ViewKind {
    /// Classify from whether the first panel carries the action-view marker
    /// class ([`ACTION_VIEW_MARKER_CLASS`]).
    #[must_use]
    pub fn classify(first_panel_is_editor_area: bool) -> Self {
        if first_panel_is_editor_area {
            Self::Action
        } else {
            Self::Workflow
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn any_vcf9_marker_selects_vcf9() {
        assert_eq!(
            LayoutVariant::from_probes(&VariantProbes {
                horizontal_split_layout: true,
                schema_area: false,
            }),
            LayoutVariant::Vcf9
        );
        assert_eq!(
            LayoutVariant::from_probes(&VariantProbes {
                horizontal_split_layout: false,
                schema_area: true,
            }),
            LayoutVariant::Vcf9
        );
    }

    #[test]
    fn no_markers_falls_back_to_legacy() {
        assert_eq!(
            LayoutVariant::from_probes(&VariantProbes::default()),
            LayoutVariant::Legacy
        );
    }

    #[test]
    fn editor_chain_starts_with_monaco_for_both_variants() {
        assert_eq!(
            LayoutVariant::Vcf9.editor_selectors()[0],
            MONACO_EDITOR_SELECTOR
        );
        assert_eq!(
            LayoutVariant::Legacy.editor_selectors()[0],
            MONACO_EDITOR_SELECTOR
        );
        assert_eq!(LayoutVariant::Vcf9.editor_selectors().len(), 3);
        assert_eq!(LayoutVariant::Legacy.editor_selectors().len(), 3);
    }

    #[test]
    fn vcf9_selectors_are_scoped_to_the_schema_area() {
        let panels = LayoutVariant::Vcf9.panel_selectors();
        assert!(panels.first_panel.starts_with(SCHEMA_AREA_MARKER));
        assert!(panels.second_panel.starts_with(SCHEMA_AREA_MARKER));
        for gutter in panels.gutters {
            assert!(gutter.starts_with(SCHEMA_AREA_MARKER));
        }
    }

    #[test]
    fn legacy_chrome_includes_the_action_header() {
        let panels = LayoutVariant::Legacy.panel_selectors();
        assert!(panels.chrome.contains(&".action-header"));
        assert!(!LayoutVariant::Vcf9.panel_selectors().chrome.contains(&".action-header"));
    }

    #[test]
    fn view_kind_follows_the_first_panel_marker() {
        assert_eq!(ViewKind::classify(true), ViewKind::Action);
        assert_eq!(ViewKind::classify(false), ViewKind::Workflow);
    }

    #[test]
    fn legacy_reserves_more_vertical_space() {
        assert!(LayoutVariant::Legacy.container_offset_px() > LayoutVariant::Vcf9.container_offset_px());
        assert!(LayoutVariant::Legacy.editor_offset_px() > LayoutVariant::Vcf9.editor_offset_px());
    }
}
