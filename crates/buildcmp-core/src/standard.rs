//! Standard wiring of associators, comparators, and renderers.

use crate::associate::{ByKindAndNameAssociator, CompositeAssociator};
use crate::compare::{ArchiveComparator, ComparatorRegistry, UnknownComparator};
use crate::errors::Result;
use crate::orchestrator::BuildComparator;
use crate::outcome::OutcomeKind;
use crate::render::{
    ArchiveSectionRenderer, ComparisonHeadingRenderer, HeadRenderer, RendererRegistry,
    ReportAssembler, UnassociatedSectionRenderer, UnknownSectionRenderer,
};

pub const REPORT_CHARSET: &str = "UTF-8";
pub const DEFAULT_REPORT_TITLE: &str = "Build Comparison";

/// Associators for archive and unknown outcomes, both by kind and name
///
/// # Errors
///
/// `DuplicateRegistration` if two handlers claim the same kind.
pub fn standard_associator() -> Result<CompositeAssociator> {
    Ok(CompositeAssociator::new()
        .with(ByKindAndNameAssociator::new(OutcomeKind::Archive))?
        .with(ByKindAndNameAssociator::new(OutcomeKind::Unknown))?)
}

/// # Errors
///
/// `DuplicateRegistration` if two handlers claim the same kind.
pub fn standard_comparators() -> Result<ComparatorRegistry> {
    Ok(ComparatorRegistry::new()
        .with(ArchiveComparator::new())?
        .with(UnknownComparator)?)
}

/// Renderers covering every section kind
///
/// # Errors
///
/// `DuplicateRegistration` if two handlers claim the same kind.
pub fn standard_renderers() -> Result<RendererRegistry> {
    Ok(RendererRegistry::new()
        .with(ArchiveSectionRenderer)?
        .with(UnknownSectionRenderer)?
        .with(UnassociatedSectionRenderer)?)
}

/// # Errors
///
/// `DuplicateRegistration` if two handlers claim the same kind.
pub fn standard_build_comparator() -> Result<BuildComparator> {
    Ok(BuildComparator::new(
        standard_associator()?,
        standard_comparators()?,
    ))
}

/// # Errors
///
/// `DuplicateRegistration` if two handlers claim the same kind.
pub fn standard_report_assembler(title: &str) -> Result<ReportAssembler> {
    Ok(ReportAssembler::new(
        standard_renderers()?,
        HeadRenderer::new(title, REPORT_CHARSET),
        ComparisonHeadingRenderer::new(title),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SectionKind;

    #[test]
    fn test_standard_registries_cover_every_kind() {
        let comparators = standard_comparators().unwrap();
        assert!(comparators.supports(OutcomeKind::Archive));
        assert!(comparators.supports(OutcomeKind::Unknown));

        let renderers = standard_renderers().unwrap();
        for section in [
            SectionKind::Archive,
            SectionKind::Unknown,
            SectionKind::SourceOnly,
            SectionKind::TargetOnly,
        ] {
            assert!(renderers.supports(section), "missing {}", section);
        }
    }
}
