//! Duplicate-segment merging for one orientation collection.

use super::types::{sqdist, LineSegment};

/// Greedily clusters segments whose *both* endpoints lie within `tol_sq`
/// squared pixels of the cluster representative's endpoints, and replaces
/// each cluster by the coordinate average of its members.
///
/// The input is treated as an immutable snapshot; a fresh collection is
/// returned. This removes duplicate or broken detections of the same
/// physical grid line.
pub fn merge_duplicates(lines: &[LineSegment], tol_sq: f32) -> Vec<LineSegment> {
    let mut consumed = vec![false; lines.len()];
    let mut out = Vec::with_capacity(lines.len());
    for i in 0..lines.len() {
        if consumed[i] {
            continue;
        }
        let rep = lines[i];
        let mut acc0 = rep.p0;
        let mut acc1 = rep.p1;
        let mut count = 1.0f32;
        for (j, other) in lines.iter().enumerate().skip(i + 1) {
            if consumed[j] {
                continue;
            }
            if sqdist(rep.p0, other.p0) < tol_sq && sqdist(rep.p1, other.p1) < tol_sq {
                acc0[0] += other.p0[0];
                acc0[1] += other.p0[1];
                acc1[0] += other.p1[0];
                acc1[1] += other.p1[1];
                count += 1.0;
                consumed[j] = true;
            }
        }
        out.push(LineSegment::new(
            [acc0[0] / count, acc0[1] / count],
            [acc1[0] / count, acc1[1] / count],
        ));
    }
    out
}
