//! Point and range classification against a scanned document.

use super::content::DocumentContent;
use super::position::{Position, TextRange};
use super::region::{Region, RegionKind};

/// Check if `position` lies in some region of `kind`.
pub fn point_in_kind(position: Position, content: &DocumentContent, kind: RegionKind) -> bool {
    region_of_kind_at(position, content, kind).is_some()
}

/// Check if `range` overlaps some region of `kind`.
///
/// Ranges that merely touch a region's boundary do not count.
pub fn range_intersects_kind(range: TextRange, content: &DocumentContent, kind: RegionKind) -> bool {
    let view = content.regions_of(kind);
    // First region that ends after the range starts; earlier ones end at or
    // before `range.start` and cannot overlap.
    let first = view.partition_point(|r| r.end <= range.start);
    view.get(first).is_some_and(|r| r.intersects(&range))
}

/// The region of any kind containing `position`.
///
/// Returns `None` for positions no region covers: past the end of the
/// document, or inside an unterminated trailing block.
pub fn region_at(position: Position, content: &DocumentContent) -> Option<&Region> {
    let regions = content.regions();
    let idx = regions.partition_point(|r| r.end <= position);
    regions.get(idx).filter(|r| r.contains(position))
}

/// The kind of the region containing `position`, if any.
pub fn kind_at(position: Position, content: &DocumentContent) -> Option<RegionKind> {
    region_at(position, content).map(|r| r.kind)
}

fn region_of_kind_at(
    position: Position,
    content: &DocumentContent,
    kind: RegionKind,
) -> Option<&Region> {
    let view = content.regions_of(kind);
    let idx = view.partition_point(|r| r.end <= position);
    view.get(idx).filter(|r| r.contains(position))
}
