use crate::domain::{GroupKey, SongInfo};

/// First index of the run containing `idx`.
pub fn group_start<S: SongInfo>(tracks: &[S], idx: usize, key: GroupKey) -> usize {
    let anchor = &tracks[idx];
    let mut start = idx;

    while start > 0 && key.same_group(&tracks[start - 1], anchor) {
        start -= 1;
    }
    start
}

/// First index after `idx` whose key differs, or `idx` when the current
/// group runs to the end of the playlist.
pub fn step_to_next_group<S: SongInfo>(tracks: &[S], idx: usize, key: GroupKey) -> usize {
    let anchor = &tracks[idx];

    tracks[idx + 1..]
        .iter()
        .position(|t| !key.same_group(t, anchor))
        .map(|offset| idx + 1 + offset)
        .unwrap_or(idx)
}

/// Head of the group before the one containing `idx`, or `idx` when no
/// earlier group exists.
pub fn step_back_to_prior_group<S: SongInfo>(tracks: &[S], idx: usize, key: GroupKey) -> usize {
    let anchor = &tracks[idx];

    match tracks[..idx]
        .iter()
        .rposition(|t| !key.same_group(t, anchor))
    {
        Some(prior_tail) => group_start(tracks, prior_tail, key),
        None => idx,
    }
}
