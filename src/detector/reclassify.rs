//! White-seam reclassification
//!
//! Quantization leaves thin white seams between touching balls of the same
//! color. Before the final clustering pass, white pixels within a bounded
//! 8-connected distance of a large red or blue cluster are repainted in that
//! cluster's color on a working copy of the buffer.
//!
//! Discovery and border search read the untouched input; only the returned
//! working copy is modified, so clusters processed later never see pixels
//! converted on behalf of earlier ones.

use super::connected_components::{Cluster, ClusterFinder};
use crate::config::DetectionParameters;
use crate::models::{BallColor, PixelBuffer, PixelCoord, PixelMask};
use crate::utils::color::PixelClass;
use std::collections::{BTreeMap, HashSet, VecDeque};

const NEIGHBORS_8: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Output of the reclassification pass
#[derive(Debug, Clone)]
pub struct Reclassification {
    /// Copy of the input with converted pixels repainted
    pub working: PixelBuffer,
    /// Converted pixels in row-major order
    pub converted: Vec<(PixelCoord, BallColor)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Claim {
    Only(BallColor),
    Contested,
}

/// Run discovery, border expansion and repainting on `original`
pub fn reclassify_white_pixels(
    original: &PixelBuffer,
    params: &DetectionParameters,
) -> Reclassification {
    let mut visited = PixelMask::new(original.width(), original.height());
    let clusters = ClusterFinder::new(original)
        .find_all(&[PixelClass::Red, PixelClass::Blue], &mut visited);

    let mut claims: BTreeMap<usize, Claim> = BTreeMap::new();
    let mut expanded = 0usize;

    for color in BallColor::ALL {
        for cluster in select_clusters(&clusters, color, params) {
            expanded += 1;
            for index in reachable_white(original, cluster, params.white_pixel_expansion_distance)
            {
                claims
                    .entry(index)
                    .and_modify(|claim| {
                        if *claim != Claim::Only(color) {
                            *claim = Claim::Contested;
                        }
                    })
                    .or_insert(Claim::Only(color));
            }
        }
    }

    let mut working = original.clone();
    let mut converted = Vec::new();
    let mut contested = 0usize;
    for (index, claim) in claims {
        match claim {
            Claim::Only(color) => {
                let at = PixelCoord::from_index(index, original.width());
                working.paint(at, color);
                converted.push((at, color));
            }
            Claim::Contested => contested += 1,
        }
    }

    tracing::debug!(
        clusters = clusters.len(),
        expanded,
        converted = converted.len(),
        contested,
        "white reclassification"
    );

    Reclassification { working, converted }
}

/// Largest clusters of one color that qualify for expansion
fn select_clusters<'c>(
    clusters: &'c [Cluster],
    color: BallColor,
    params: &DetectionParameters,
) -> Vec<&'c Cluster> {
    let class = PixelClass::from(color);
    let mut selected: Vec<&Cluster> = clusters
        .iter()
        .filter(|c| c.class == class && c.len() >= params.min_cluster_size_to_expand)
        .collect();
    selected.sort_by(|a, b| b.len().cmp(&a.len()).then(a.seed.cmp(&b.seed)));
    selected.truncate(params.max_clusters_to_expand);
    selected
}

/// Members with at least one 8-neighbour outside the cluster
pub fn border_pixels(
    cluster: &Cluster,
    members: &HashSet<usize>,
    width: usize,
    height: usize,
) -> Vec<usize> {
    cluster
        .pixels
        .iter()
        .filter(|p| {
            NEIGHBORS_8.iter().any(|&(dx, dy)| {
                match offset(p.x, p.y, dx, dy, width, height) {
                    Some(n) => !members.contains(&n),
                    None => true,
                }
            })
        })
        .map(|p| p.index(width))
        .collect()
}

/// White pixels reachable from the cluster border within `max_distance` steps
fn reachable_white(original: &PixelBuffer, cluster: &Cluster, max_distance: usize) -> Vec<usize> {
    let width = original.width();
    let height = original.height();
    let members: HashSet<usize> = cluster.pixels.iter().map(|p| p.index(width)).collect();

    let mut seen = members.clone();
    let mut queue: VecDeque<(usize, usize)> = border_pixels(cluster, &members, width, height)
        .into_iter()
        .map(|i| (i, 0))
        .collect();
    let mut white = Vec::new();

    while let Some((index, dist)) = queue.pop_front() {
        if dist >= max_distance {
            continue;
        }
        let p = PixelCoord::from_index(index, width);
        for &(dx, dy) in &NEIGHBORS_8 {
            let Some(n) = offset(p.x, p.y, dx, dy, width, height) else {
                continue;
            };
            if !seen.insert(n) {
                continue;
            }
            if original.classify_index(n) == PixelClass::White {
                white.push(n);
            }
            // Conversion does not block the frontier
            queue.push_back((n, dist + 1));
        }
    }

    white
}

fn offset(x: usize, y: usize, dx: isize, dy: isize, width: usize, height: usize) -> Option<usize> {
    let nx = x.checked_add_signed(dx)?;
    let ny = y.checked_add_signed(dy)?;
    (nx < width && ny < height).then(|| ny * width + nx)
}
