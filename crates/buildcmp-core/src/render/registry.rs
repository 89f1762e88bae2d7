//! Section renderer trait and registry.

use crate::compare::{ComparisonEntry, OutcomeComparison};
use crate::errors::{BuildCompareError, ExError, Result, Stage};
use crate::render::context::RenderContext;
use std::collections::BTreeMap;

/// Kind of one report section, derived from a result entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionKind {
    /// Compared archive pair (equal or different)
    Archive,
    /// Compared unknown pair
    Unknown,
    /// Outcome produced only by the source build
    SourceOnly,
    /// Outcome produced only by the target build
    TargetOnly,
}

impl SectionKind {
    pub fn of(entry: &ComparisonEntry) -> SectionKind {
        match entry {
            ComparisonEntry::Compared {
                comparison: OutcomeComparison::Archive(_),
            } => SectionKind::Archive,
            ComparisonEntry::Compared {
                comparison: OutcomeComparison::Unknown(_),
            } => SectionKind::Unknown,
            ComparisonEntry::SourceOnly { .. } => SectionKind::SourceOnly,
            ComparisonEntry::TargetOnly { .. } => SectionKind::TargetOnly,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Archive => "archive",
            SectionKind::Unknown => "unknown",
            SectionKind::SourceOnly => "source_only",
            SectionKind::TargetOnly => "target_only",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders one self-contained report fragment for a result entry.
pub trait SectionRenderer: Send + Sync {
    /// Section kinds this renderer handles
    fn sections(&self) -> Vec<SectionKind>;

    /// Append the fragment for `entry` to `out`.
    ///
    /// # Errors
    ///
    /// `RenderFailed` if the entry is not of a handled section kind.
    fn render(&self, entry: &ComparisonEntry, ctx: &RenderContext, out: &mut String)
        -> Result<()>;
}

/// At most one renderer per section kind.
#[derive(Default)]
pub struct RendererRegistry {
    renderers: Vec<Box<dyn SectionRenderer>>,
    by_section: BTreeMap<SectionKind, usize>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a renderer for every section kind it declares.
    ///
    /// # Errors
    ///
    /// `DuplicateRenderer` if any declared section already has a renderer;
    /// the registry is left unchanged in that case.
    pub fn register(
        &mut self,
        renderer: Box<dyn SectionRenderer>,
    ) -> std::result::Result<(), BuildCompareError> {
        let sections = renderer.sections();
        if let Some(taken) = sections.iter().find(|s| self.by_section.contains_key(*s)) {
            return Err(BuildCompareError::DuplicateRenderer {
                section: taken.to_string(),
            });
        }
        let idx = self.renderers.len();
        self.renderers.push(renderer);
        for section in sections {
            self.by_section.insert(section, idx);
        }
        Ok(())
    }

    /// Builder-style [`register`](Self::register)
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub fn with(
        mut self,
        renderer: impl SectionRenderer + 'static,
    ) -> std::result::Result<Self, BuildCompareError> {
        self.register(Box::new(renderer))?;
        Ok(self)
    }

    pub fn supports(&self, section: SectionKind) -> bool {
        self.by_section.contains_key(&section)
    }

    /// Render one entry with the renderer registered for its section.
    ///
    /// # Errors
    ///
    /// - `NoRenderer` if the section has no renderer
    /// - any error raised by the renderer
    pub fn render_entry(
        &self,
        entry: &ComparisonEntry,
        ctx: &RenderContext,
        out: &mut String,
    ) -> Result<()> {
        let section = SectionKind::of(entry);
        let renderer = self
            .by_section
            .get(&section)
            .and_then(|idx| self.renderers.get(*idx))
            .ok_or_else(|| {
                ExError::from(BuildCompareError::NoRenderer {
                    section: section.to_string(),
                    name: entry.key().name,
                })
            })?;
        renderer
            .render(entry, ctx, out)
            .map_err(|e| e.or_stage(Stage::Rendering))
    }
}

impl std::fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("sections", &self.by_section.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Error for a renderer handed an entry it does not handle
pub(crate) fn unexpected_entry(renderer: &str, entry: &ComparisonEntry) -> ExError {
    ExError::new(crate::errors::ExErrorKind::RenderFailed)
        .with_stage(Stage::Rendering)
        .with_op(renderer.to_string())
        .with_outcome_kind(SectionKind::of(entry).to_string())
        .with_outcome_name(entry.key().name)
        .with_message("renderer received an entry of a section kind it does not handle")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;
    use crate::outcome::{ArchiveOutcome, Outcome};
    use crate::render::{BuildDescriptor, UnassociatedSectionRenderer, UnknownSectionRenderer};
    use buildcmp_core_types::RunId;

    fn ctx() -> RenderContext {
        RenderContext::new(
            RunId::from_string("run-1".to_string()),
            BuildDescriptor::new("Source Build"),
            BuildDescriptor::new("Target Build"),
        )
    }

    #[test]
    fn test_section_of_entry() {
        let outcome: Outcome = ArchiveOutcome::new("a.zip", ":zip", "zip").into();
        assert_eq!(
            SectionKind::of(&ComparisonEntry::SourceOnly {
                outcome: outcome.clone()
            }),
            SectionKind::SourceOnly
        );
        assert_eq!(
            SectionKind::of(&ComparisonEntry::TargetOnly { outcome }),
            SectionKind::TargetOnly
        );
    }

    #[test]
    fn test_double_registration_is_rejected() {
        let result = RendererRegistry::new()
            .with(UnassociatedSectionRenderer)
            .and_then(|r| r.with(UnassociatedSectionRenderer));
        assert!(matches!(
            result,
            Err(BuildCompareError::DuplicateRenderer { .. })
        ));
    }

    #[test]
    fn test_missing_renderer_is_configuration_error() {
        let registry = RendererRegistry::new().with(UnknownSectionRenderer).unwrap();
        let entry = ComparisonEntry::SourceOnly {
            outcome: ArchiveOutcome::new("lib.jar", ":jar", "jar").into(),
        };
        let mut out = String::new();

        let err = registry.render_entry(&entry, &ctx(), &mut out).unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::NoRenderer);
        assert_eq!(err.stage(), Some(Stage::Rendering));
        assert_eq!(err.outcome_name(), Some("lib.jar"));
        assert!(out.is_empty());
    }
}
