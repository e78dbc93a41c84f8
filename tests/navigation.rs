use cadence::{
    Direction::{Next, Previous},
    GroupKey, Track,
    navigation::{advance, clamp_offset, group_start, step_back_to_prior_group},
};

fn by_album(albums: &[&str]) -> Vec<Track> {
    albums
        .iter()
        .enumerate()
        .map(|(i, a)| Track::new(&format!("track {i}"), "artist", a))
        .collect()
}

#[test]
fn ungrouped_skip_is_exact_clamp() {
    for len in 1..6usize {
        let tracks = by_album(&vec!["A"; len]);
        for start in 0..len {
            for count in 0..8u32 {
                let next = advance(&tracks, start, Next, count, GroupKey::None);
                let prev = advance(&tracks, start, Previous, count, GroupKey::None);

                let expect_next = (start + count as usize).min(len - 1);
                let expect_prev = start.saturating_sub(count as usize);
                assert_eq!(next, expect_next, "len {len} start {start} count {count}");
                assert_eq!(prev, expect_prev, "len {len} start {start} count {count}");
                assert_eq!(clamp_offset(start as i64, Next, count, len), expect_next);
            }
        }
    }
}

#[test]
fn distinct_keys_make_next_a_single_step() {
    let tracks = by_album(&["A", "B", "C", "D", "E"]);
    for start in 0..tracks.len() - 1 {
        assert_eq!(advance(&tracks, start, Next, 1, GroupKey::Album), start + 1);
    }
}

#[test]
fn single_group_never_moves_forward() {
    let tracks = by_album(&["A"; 6]);
    for start in 0..tracks.len() {
        assert_eq!(advance(&tracks, start, Next, 1, GroupKey::Album), start);
    }
}

#[test]
fn previous_rewinds_then_leaves() {
    let tracks = by_album(&["A", "A", "B", "B", "B", "C"]);

    // Mid-group: first to the head of B, then to the head of A
    let first = advance(&tracks, 4, Previous, 1, GroupKey::Album);
    assert_eq!(first, 2);
    let second = advance(&tracks, first, Previous, 1, GroupKey::Album);
    assert_eq!(second, 0);
    // And no further
    assert_eq!(advance(&tracks, second, Previous, 1, GroupKey::Album), 0);
}

#[test]
fn previous_then_next_returns_to_group_head() {
    let tracks = by_album(&["A", "A", "B", "B", "C", "C", "C"]);

    for head in [2usize, 4] {
        let back = advance(&tracks, head, Previous, 1, GroupKey::Album);
        assert_eq!(advance(&tracks, back, Next, 1, GroupKey::Album), head);
    }
}

#[test]
fn start_of_playlist_stays_put() {
    let tracks = by_album(&["A", "B", "B"]);
    assert_eq!(advance(&tracks, 0, Previous, 1, GroupKey::Album), 0);
    assert_eq!(advance(&tracks, 0, Previous, 5, GroupKey::Album), 0);
}

#[test]
fn worked_example() {
    let tracks = by_album(&["A", "A", "A", "B", "B", "C"]);
    let album = GroupKey::Album;

    assert_eq!(advance(&tracks, 0, Next, 1, album), 3);
    assert_eq!(advance(&tracks, 3, Next, 1, album), 5);
    assert_eq!(advance(&tracks, 5, Next, 1, album), 5);
    assert_eq!(advance(&tracks, 2, Previous, 1, album), 0);
    assert_eq!(advance(&tracks, 0, Previous, 1, album), 0);
    assert_eq!(advance(&tracks, 3, Previous, 1, album), 0);
    assert_eq!(advance(&tracks, 0, Next, 2, album), 5);
}

#[test]
fn grouped_results_always_in_range() {
    let layouts: [&[&str]; 4] = [
        &["A"],
        &["A", "B", "A", "B"],
        &["", "", "A", "", "B", "B"],
        &["X", "X", "X", "Y", "Z", "Z", "X"],
    ];

    for albums in layouts {
        let tracks = by_album(albums);
        for start in 0..tracks.len() {
            for count in 1..5 {
                for dir in [Next, Previous] {
                    let target = advance(&tracks, start, dir, count, GroupKey::Album);
                    assert!(target < tracks.len());

                    // Every grouped landing spot is the head of a group,
                    // unless the hop had nowhere to go
                    if target != start {
                        assert_eq!(group_start(&tracks, target, GroupKey::Album), target);
                    }
                }
            }
        }
    }
}

#[test]
fn phases_are_separately_usable() {
    let tracks = by_album(&["A", "A", "B", "B"]);
    assert_eq!(group_start(&tracks, 3, GroupKey::Album), 2);
    assert_eq!(step_back_to_prior_group(&tracks, 2, GroupKey::Album), 0);
    assert_eq!(step_back_to_prior_group(&tracks, 0, GroupKey::Album), 0);
}
