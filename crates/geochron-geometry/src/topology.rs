//! Re-deriving region topology while a vertex is dragged.
//!
//! Dragging vertex `i` moves the two edges `i-1 -> i` and `i -> i+1`. When
//! they cross other edges of the same region the region is cut in two;
//! when they cross edges of another region the two regions are welded.

use std::collections::BTreeSet;

use geochron_core::{Region, RegionSet};
use tracing::trace;

use crate::primitives::segments_cross;

/// Vertex indices at which the region should be cut because an edge
/// adjacent to `i` crosses a non-adjacent edge of the same region.
fn self_cuts(region: &Region, i: usize) -> Vec<usize> {
    let n = region.len();
    if n < 5 {
        return Vec::new();
    }
    let i0 = region.prev_index(i);
    let i1 = region.next_index(i);
    let mut cuts = BTreeSet::new();
    let mut prev = (i1 + 1) % n;
    let mut j = (prev + 1) % n;
    while j != i0 {
        if segments_cross(region[i], region[i1], region[prev], region[j]) {
            cuts.insert(i1);
            cuts.insert(j);
        }
        if segments_cross(region[i0], region[i], region[prev], region[j]) {
            cuts.insert(i);
            cuts.insert(j);
        }
        prev = j;
        j = (j + 1) % n;
    }
    cuts.into_iter().collect()
}

/// Indices of `other` whose incoming edge is crossed by an edge adjacent
/// to vertex `i` of `home`.
fn cuts_against(home: &Region, i: usize, other: &Region) -> Vec<usize> {
    let i0 = home.prev_index(i);
    let i1 = home.next_index(i);
    let mut cuts = BTreeSet::new();
    for (prev, j) in other.edges() {
        if segments_cross(home[i], home[i1], other[prev], other[j])
            || segments_cross(home[i0], home[i], other[prev], other[j])
        {
            cuts.insert(j);
        }
    }
    cuts.into_iter().collect()
}

/// Cut `region` immediately before each index in `cuts` (ascending) and
/// return the two largest runs, largest first. The run from the last cut
/// wraps round to the first. `None` when fewer than `min_parts` runs.
fn largest_parts(cuts: &[usize], region: &Region, min_parts: usize) -> Option<Vec<Region>> {
    if cuts.len() < min_parts || cuts.is_empty() {
        return None;
    }
    let v = &region.vertices;
    let first = cuts[0];
    let last = cuts[cuts.len() - 1];
    let mut parts: Vec<Region> = Vec::with_capacity(cuts.len());
    parts.push(v[last..].iter().chain(&v[..first]).copied().collect());
    for w in cuts.windows(2) {
        parts.push(Region::new(v[w[0]..w[1]].to_vec()));
    }
    parts.sort_by(|a, b| b.len().cmp(&a.len()));
    parts.truncate(2);
    Some(parts)
}

/// Split `region` in two if the edges next to vertex `i` cross its other
/// edges. Regions with fewer than five vertices never split.
pub fn split_region(region: &Region, i: usize) -> Option<[Region; 2]> {
    let cuts = self_cuts(region, i);
    let mut parts = largest_parts(&cuts, region, 2)?.into_iter();
    let (a, b) = (parts.next()?, parts.next()?);
    trace!(vertex = i, ?cuts, first = a.len(), second = b.len(), "split region");
    Some([a, b])
}

/// Replace vertex `i` of `home` with the longest run of `other` lying
/// outside the edges it crosses.
fn merge_region(home: &Region, i: usize, other: &Region) -> Option<Region> {
    let cuts = cuts_against(home, i, other);
    let part = largest_parts(&cuts, other, 1)?.into_iter().next()?;
    let v = &home.vertices;
    Some(
        v[..i]
            .iter()
            .chain(&part.vertices)
            .chain(&v[i + 1..])
            .copied()
            .collect(),
    )
}

/// Weld region `region_index` into the first other region (by index) that
/// its edges next to vertex `i` cross. The welded region takes the other
/// region's position. Unchanged when nothing crosses.
pub fn merge_regions(regions: &RegionSet, region_index: usize, i: usize) -> RegionSet {
    let home = &regions[region_index];
    let others = (0..region_index).chain(region_index + 1..regions.len());
    for oi in others {
        if let Some(merged) = merge_region(home, i, &regions[oi]) {
            trace!(region = region_index, into = oi, vertex = i, "merge regions");
            let mut out = regions.regions.clone();
            out[oi] = merged;
            out.remove(region_index);
            return RegionSet::new(out);
        }
    }
    regions.clone()
}

/// Re-derive the region set after vertex `i` of region `region_index` has
/// moved: split first, otherwise merge, otherwise unchanged.
pub fn reconfigure(regions: &RegionSet, region_index: usize, i: usize) -> RegionSet {
    match split_region(&regions[region_index], i) {
        Some(parts) => regions.splice(region_index, parts),
        None => merge_regions(regions, region_index, i),
    }
}

/// Drop vertex `i` of region `region_index`. A region that would be left
/// with a single vertex is removed entirely when other regions exist.
pub fn collapse_vertex(regions: &RegionSet, region_index: usize, i: usize) -> RegionSet {
    let region = &regions[region_index];
    if region.len() == 2 && regions.len() > 1 {
        trace!(region = region_index, "collapse removes region");
        return regions.splice(region_index, None::<Region>);
    }
    trace!(region = region_index, vertex = i, "collapse vertex");
    regions.splice(region_index, Some(region.without(i)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geochron_core::Vertex;

    fn region(points: &[(f64, f64)]) -> Region {
        points.iter().map(|&(x, y)| Vertex::new(x, y)).collect()
    }

    fn hexagon() -> Region {
        region(&[(0.0, 0.0), (2.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 2.0)])
    }

    #[test]
    fn cuts_are_numerically_sorted() {
        let mut r = region(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (3.0, 0.0),
            (4.0, 0.0),
            (5.0, 0.0),
            (6.0, 0.0),
            (7.0, 0.0),
            (8.0, 0.0),
            (9.0, 0.0),
            (10.0, 0.0),
            (10.0, 4.0),
            (0.0, 4.0),
        ]);
        // vertex 9 poked up through the top edge 11 -> 12
        r.vertices[9] = Vertex::new(9.0, 5.0);
        assert_eq!(self_cuts(&r, 9), vec![9, 10, 12]);
    }

    #[test]
    fn small_regions_never_split() {
        let mut r = region(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        r.vertices[0] = Vertex::new(5.0, 5.0);
        assert!(split_region(&r, 0).is_none());
    }

    #[test]
    fn vertex_dragged_through_opposite_edge_splits() {
        let mut r = hexagon();
        r.vertices[1] = Vertex::new(2.0, 5.0);
        assert_eq!(self_cuts(&r, 1), vec![1, 2, 4]);
        let [a, b] = split_region(&r, 1).unwrap();
        assert_eq!(a, region(&[(0.0, 4.0), (0.0, 2.0), (0.0, 0.0)]));
        assert_eq!(b, region(&[(4.0, 0.0), (4.0, 4.0)]));
    }

    #[test]
    fn wrap_part_runs_from_last_cut_to_first() {
        let r = hexagon();
        let parts = largest_parts(&[1, 3], &r, 2).unwrap();
        assert_eq!(parts[0], region(&[(4.0, 4.0), (0.0, 4.0), (0.0, 2.0), (0.0, 0.0)]));
        assert_eq!(parts[1], region(&[(2.0, 0.0), (4.0, 0.0)]));
        assert!(largest_parts(&[2], &r, 2).is_none());
        assert_eq!(largest_parts(&[2], &r, 1).unwrap()[0].len(), 6);
    }

    #[test]
    fn reconfigure_replaces_split_region_in_place() {
        let mut moved = hexagon();
        moved.vertices[1] = Vertex::new(2.0, 5.0);
        let other = region(&[(10.0, 0.0), (11.0, 0.0), (11.0, 1.0)]);
        let set = RegionSet::new(vec![other.clone(), moved]);
        let out = reconfigure(&set, 1, 1);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], other);
        assert_eq!(out[1].len(), 3);
        assert_eq!(out[2].len(), 2);
    }

    #[test]
    fn vertex_dragged_into_neighbour_welds_regions() {
        // left square, its right-middle vertex pushed across the right square's left edge
        let left = region(&[(0.0, 0.0), (2.0, 0.0), (3.0, 1.0), (2.0, 2.0), (0.0, 2.0)]);
        let right = region(&[(2.5, 0.0), (5.0, 0.0), (5.0, 2.0), (2.5, 2.0)]);
        let set = RegionSet::new(vec![left, right.clone()]);
        let out = reconfigure(&set, 0, 2);
        assert_eq!(out.len(), 1);
        assert_eq!(
            out[0],
            region(&[
                (0.0, 0.0),
                (2.0, 0.0),
                (2.5, 0.0),
                (5.0, 0.0),
                (5.0, 2.0),
                (2.5, 2.0),
                (2.0, 2.0),
                (0.0, 2.0),
            ])
        );
    }

    #[test]
    fn merge_prefers_lower_index_then_higher() {
        let probe = region(&[(0.0, 0.0), (2.0, 0.0), (3.0, 1.0), (2.0, 2.0), (0.0, 2.0)]);
        let hit = region(&[(2.5, 0.0), (5.0, 0.0), (5.0, 2.0), (2.5, 2.0)]);
        let far = region(&[(20.0, 0.0), (21.0, 0.0), (21.0, 1.0)]);
        let set = RegionSet::new(vec![far.clone(), probe, hit]);
        let out = merge_regions(&set, 1, 2);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], far);
        assert_eq!(out[1].len(), 8);
    }

    #[test]
    fn no_crossing_leaves_set_unchanged() {
        let a = region(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let b = region(&[(5.0, 0.0), (6.0, 0.0), (6.0, 1.0)]);
        let set = RegionSet::new(vec![a, b]);
        assert_eq!(reconfigure(&set, 0, 1), set);
    }

    #[test]
    fn collapse_drops_vertex_or_region() {
        let tri = region(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let pair = region(&[(3.0, 0.0), (3.0, 0.0)]);
        let single = RegionSet::new(vec![tri.clone()]);
        assert_eq!(collapse_vertex(&single, 0, 1)[0], region(&[(0.0, 0.0), (1.0, 1.0)]));

        let two = RegionSet::new(vec![tri.clone(), pair.clone()]);
        let out = collapse_vertex(&two, 1, 0);
        assert_eq!(out, RegionSet::new(vec![tri.clone()]));

        let lonely = RegionSet::new(vec![pair]);
        assert_eq!(collapse_vertex(&lonely, 0, 0)[0].len(), 1);
    }
}
