use super::WorldPos;

/// Find the candidate closest to `origin` on the water plane, strictly inside `max_radius`.
///
/// Candidates are scanned in the order given. A candidate only replaces the current
/// best when it is strictly closer, so equal distances keep whichever came first.
pub fn nearest<T>(
    candidates: impl IntoIterator<Item = (T, WorldPos)>,
    origin: &WorldPos,
    max_radius: f32,
) -> Option<(T, f32)> {
    let mut best: Option<(T, f32)> = None;

    for (candidate, pos) in candidates {
        let distance = origin.planar_distance(&pos);
        if distance >= max_radius {
            continue;
        }

        if best.as_ref().is_none_or(|(_, d)| distance < *d) {
            best = Some((candidate, distance));
        }
    }

    best
}
