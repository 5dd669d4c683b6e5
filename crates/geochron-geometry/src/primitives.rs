use geochron_core::{Region, RegionSet, ScreenPoint, Vertex};

/// Even-odd ray casting. The closing edge from the last vertex to the
/// first is included; horizontal edges never count as crossings.
pub fn point_in_polygon(p: Vertex, vertices: &[Vertex]) -> bool {
    let mut inside = false;
    let Some(&last) = vertices.last() else {
        return false;
    };
    let mut j = last;
    for &i in vertices {
        if (i.y > p.y) != (j.y > p.y) && p.x < (j.x - i.x) * (p.y - i.y) / (j.y - i.y) + i.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// True when `p` lies inside at least one region.
pub fn contains_any(regions: &RegionSet, p: Vertex) -> bool {
    regions.iter().any(|r| point_in_polygon(p, &r.vertices))
}

/// True when `p` lies inside an odd number of regions, so a region drawn
/// inside another one cuts a hole in it.
pub fn contains_even_odd(regions: &RegionSet, p: Vertex) -> bool {
    regions
        .iter()
        .filter(|r| point_in_polygon(p, &r.vertices))
        .count()
        % 2
        == 1
}

// With a = a_start + at * ad and b = b_start + bt * bd, the crossing point
// satisfies at * (ad x bd) = s x bd and bt * (ad x bd) = s x ad where
// s = b_start - a_start. Both scaled parameters must lie strictly between
// 0 and ad x bd, so touching endpoints, parallel and zero-length segments
// never cross.
pub fn segments_cross(a_start: Vertex, a_end: Vertex, b_start: Vertex, b_end: Vertex) -> bool {
    let ad = [a_end.x - a_start.x, a_end.y - a_start.y];
    let bd = [b_end.x - b_start.x, b_end.y - b_start.y];
    let s = [b_start.x - a_start.x, b_start.y - a_start.y];
    let denom = ad[0] * bd[1] - ad[1] * bd[0];
    let (min, max) = if denom < 0.0 { (denom, 0.0) } else { (0.0, denom) };
    let at = s[0] * bd[1] - s[1] * bd[0];
    if at <= min || max <= at {
        return false;
    }
    let bt = s[0] * ad[1] - s[1] * ad[0];
    min < bt && bt < max
}

/// Chebyshev distance below `threshold`, in screen pixels.
pub fn points_close(a: ScreenPoint, b: ScreenPoint, threshold: f64) -> bool {
    (a.x - b.x).abs().max((a.y - b.y).abs()) < threshold
}

/// Shoelace area; positive when the vertices run counter-clockwise.
pub fn signed_area(region: &Region) -> f64 {
    let mut sum = 0.0;
    for (j, i) in region.edges() {
        let (a, b) = (region[j], region[i]);
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}
