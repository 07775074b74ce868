//! Column packing for overlapping events.
//!
//! Events are grouped into overlap clusters: the maximal sets reachable from
//! one another by direct or transitive overlap of their clamped intervals.
//! Every event in a cluster shares one greedy first-fit packing, so two
//! overlapping events always get distinct columns from the same lane set.
//! Greedy first-fit in start order is optimal for interval graphs: the lane
//! count of a cluster equals its largest set of mutually overlapping events.
//!
//! Events in different clusters never interact, and each event reports the
//! lane count of its own cluster, not a global maximum.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::event::NormalizedEvent;

/// The lane an event occupies and the lane count of its overlap cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColumnAssignment {
    pub column_index: usize,
    pub num_columns: usize,
}

/// Assign a column to every event, keyed by event id.
///
/// Total over any input: no events gives an empty map, a lone event gets
/// `column_index = 0, num_columns = 1`. The result does not depend on the
/// order of `events`.
pub fn assign_columns(events: &[NormalizedEvent]) -> BTreeMap<String, ColumnAssignment> {
    let mut assignments = BTreeMap::new();
    for cluster in overlap_clusters(events) {
        let lanes = pack_lanes(&cluster);
        let num_columns = lanes.iter().copied().max().map_or(1, |max| max + 1);
        tracing::debug!(
            size = cluster.len(),
            num_columns,
            "packed overlap cluster"
        );
        for (event, column_index) in cluster.iter().zip(lanes) {
            assignments.insert(
                event.id.clone(),
                ColumnAssignment {
                    column_index,
                    num_columns,
                },
            );
        }
    }
    assignments
}

/// Split `events` into overlap clusters, each sorted in packing order.
///
/// Clusters are returned in chronological order. Touching endpoints do not
/// join two clusters.
pub fn overlap_clusters(events: &[NormalizedEvent]) -> Vec<Vec<&NormalizedEvent>> {
    let mut sorted: Vec<&NormalizedEvent> = events.iter().collect();
    sorted.sort_by(|a, b| packing_order(a, b));

    let mut clusters: Vec<Vec<&NormalizedEvent>> = Vec::new();
    let mut cluster_end: Option<DateTime<Utc>> = None;
    for event in sorted {
        match (clusters.last_mut(), cluster_end) {
            (Some(cluster), Some(end)) if event.clamped_start < end => {
                cluster.push(event);
                cluster_end = Some(end.max(event.clamped_end));
                continue;
            }
            _ => {}
        }
        clusters.push(vec![event]);
        cluster_end = Some(event.clamped_end);
    }
    clusters
}

/// Greedy first-fit lane assignment over events already in packing order.
///
/// Each event takes the first lane whose last end is at or before its start,
/// opening a new lane when none is free. Returns one lane index per event.
fn pack_lanes(sorted: &[&NormalizedEvent]) -> Vec<usize> {
    let mut lane_ends: Vec<DateTime<Utc>> = Vec::new();
    sorted
        .iter()
        .map(|event| {
            match lane_ends
                .iter()
                .position(|&end| end <= event.clamped_start)
            {
                Some(lane) => {
                    lane_ends[lane] = event.clamped_end;
                    lane
                }
                None => {
                    lane_ends.push(event.clamped_end);
                    lane_ends.len() - 1
                }
            }
        })
        .collect()
}

/// Start ascending, then zero-length events, then longer events first, then
/// id, then input position.
///
/// A zero-length event overlaps nothing that starts at the same instant, so
/// it must be packed before those events to leave their lane free.
fn packing_order(a: &NormalizedEvent, b: &NormalizedEvent) -> Ordering {
    let has_length = |e: &NormalizedEvent| e.clamped_end > e.clamped_start;
    a.clamped_start
        .cmp(&b.clamped_start)
        .then_with(|| has_length(a).cmp(&has_length(b)))
        .then_with(|| b.clamped_end.cmp(&a.clamped_end))
        .then_with(|| a.id.cmp(&b.id))
        .then_with(|| a.input_index.cmp(&b.input_index))
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 16, h, m, 0).unwrap()
    }

    fn ev(id: &str, start: (u32, u32), end: (u32, u32)) -> NormalizedEvent {
        NormalizedEvent {
            id: id.to_string(),
            name: None,
            status: None,
            original_start: at(start.0, start.1),
            original_end: at(end.0, end.1),
            clamped_start: at(start.0, start.1),
            clamped_end: at(end.0, end.1),
            input_index: 0,
        }
    }

    fn col(index: usize, count: usize) -> ColumnAssignment {
        ColumnAssignment {
            column_index: index,
            num_columns: count,
        }
    }

    // ── assign_columns ──────────────────────────────────────────────────

    #[test]
    fn test_empty_input() {
        assert!(assign_columns(&[]).is_empty());
    }

    #[test]
    fn test_single_event_full_width() {
        let map = assign_columns(&[ev("a", (9, 0), (10, 0))]);
        assert_eq!(map["a"], col(0, 1));
    }

    #[test]
    fn test_two_overlapping_events() {
        let map = assign_columns(&[ev("a", (9, 0), (10, 0)), ev("b", (9, 30), (10, 30))]);
        assert_eq!(map["a"], col(0, 2));
        assert_eq!(map["b"], col(1, 2));
    }

    #[test]
    fn test_touching_events_share_column() {
        let map = assign_columns(&[ev("a", (9, 0), (10, 0)), ev("b", (10, 0), (11, 0))]);
        assert_eq!(map["a"], col(0, 1));
        assert_eq!(map["b"], col(0, 1));
    }

    #[test]
    fn test_lane_reuse_inside_cluster() {
        // a and c do not overlap, b overlaps both: two lanes suffice.
        let map = assign_columns(&[
            ev("a", (9, 0), (10, 0)),
            ev("b", (9, 30), (11, 0)),
            ev("c", (10, 0), (10, 30)),
        ]);
        assert_eq!(map["a"], col(0, 2));
        assert_eq!(map["b"], col(1, 2));
        assert_eq!(map["c"], col(0, 2));
    }

    #[test]
    fn test_transitive_neighbor_shares_packing() {
        // c overlaps a but not b. Packing a's and b's direct neighbors
        // separately would put both a and b in column 1.
        let map = assign_columns(&[
            ev("a", (9, 0), (10, 0)),
            ev("b", (9, 30), (10, 30)),
            ev("c", (8, 0), (9, 15)),
        ]);
        assert_ne!(map["a"].column_index, map["b"].column_index);
        assert_eq!(map["c"], col(0, 2));
        assert_eq!(map["a"], col(1, 2));
        assert_eq!(map["b"], col(0, 2));
    }

    #[test]
    fn test_separate_clusters_have_own_column_counts() {
        let map = assign_columns(&[
            ev("a", (9, 0), (10, 0)),
            ev("b", (9, 0), (10, 0)),
            ev("c", (9, 0), (10, 0)),
            ev("d", (14, 0), (15, 0)),
        ]);
        assert_eq!(map["a"].num_columns, 3);
        assert_eq!(map["d"], col(0, 1));
    }

    #[test]
    fn test_equal_start_longer_event_goes_left() {
        let map = assign_columns(&[ev("short", (9, 0), (9, 30)), ev("long", (9, 0), (11, 0))]);
        assert_eq!(map["long"].column_index, 0);
        assert_eq!(map["short"].column_index, 1);
    }

    #[test]
    fn test_identical_intervals_ordered_by_id() {
        let map = assign_columns(&[ev("z", (9, 0), (10, 0)), ev("m", (9, 0), (10, 0))]);
        assert_eq!(map["m"].column_index, 0);
        assert_eq!(map["z"].column_index, 1);
    }

    #[test]
    fn test_zero_duration_event_inside_longer_event() {
        let map = assign_columns(&[ev("long", (9, 0), (11, 0)), ev("point", (10, 0), (10, 0))]);
        assert_eq!(map["long"], col(0, 2));
        assert_eq!(map["point"], col(1, 2));
    }

    #[test]
    fn test_zero_duration_event_at_start_of_another_shares_column() {
        let map = assign_columns(&[ev("next", (10, 0), (11, 0)), ev("point", (10, 0), (10, 0))]);
        assert_eq!(map["next"], col(0, 1));
        assert_eq!(map["point"], col(0, 1));
    }

    // ── overlap_clusters ────────────────────────────────────────────────

    #[test]
    fn test_clusters_chain_through_transitive_overlap() {
        let events = [
            ev("a", (9, 0), (10, 0)),
            ev("b", (9, 45), (11, 0)),
            ev("c", (10, 30), (12, 0)),
            ev("d", (12, 0), (13, 0)),
        ];
        let clusters = overlap_clusters(&events);
        let ids: Vec<Vec<&str>> = clusters
            .iter()
            .map(|c| c.iter().map(|e| e.id.as_str()).collect())
            .collect();
        assert_eq!(ids, vec![vec!["a", "b", "c"], vec!["d"]]);
    }

    #[test]
    fn test_clusters_independent_of_input_order() {
        let forward = [
            ev("a", (9, 0), (10, 0)),
            ev("b", (9, 30), (10, 30)),
            ev("c", (13, 0), (14, 0)),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();
        assert_eq!(assign_columns(&forward), assign_columns(&reversed));
    }
}
