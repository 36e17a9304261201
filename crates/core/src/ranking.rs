//! Ranking arithmetic for ranked content collections.
//!
//! A ranking change is a list splice: the target leaves its old slot, the
//! rows between the old and new slot shift by one, and the target lands in
//! the new slot. The repository layer turns a [`RankShift`] into a single
//! range `UPDATE`; [`splice`] applies the same rule to an in-memory list.

use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// How a requested rank is treated when it lies beyond the collection size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankBounds {
    /// Store the requested rank as-is; a gap may remain at the end.
    #[default]
    Free,
    /// Clamp the requested rank to `live_count - 1`.
    Clamp,
}

impl FromStr for RankBounds {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(RankBounds::Free),
            "clamp" => Ok(RankBounds::Clamp),
            other => Err(CoreError::Validation(format!(
                "Onbekende rangschikkingsmodus '{other}'. Kies 'free' of 'clamp'"
            ))),
        }
    }
}

/// The sibling update implied by moving one row from `old` to `new`.
///
/// Rows with a rank in `from..=to` (excluding the target) receive `delta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankShift {
    pub from: i32,
    pub to: i32,
    pub delta: i32,
}

/// Compute the sibling shift for moving a row from `old` to `new`.
///
/// Returns `None` when the rank is unchanged.
///
/// ```
/// use ontdek_core::ranking::{plan_shift, RankShift};
///
/// // Moving up: rows in [1, 3) are pushed back.
/// assert_eq!(plan_shift(3, 1), Some(RankShift { from: 1, to: 2, delta: 1 }));
/// // Moving down: rows in (1, 3] are pulled forward.
/// assert_eq!(plan_shift(1, 3), Some(RankShift { from: 2, to: 3, delta: -1 }));
/// assert_eq!(plan_shift(2, 2), None);
/// ```
pub fn plan_shift(old: i32, new: i32) -> Option<RankShift> {
    use std::cmp::Ordering;

    match new.cmp(&old) {
        Ordering::Equal => None,
        Ordering::Less => Some(RankShift {
            from: new,
            to: old - 1,
            delta: 1,
        }),
        Ordering::Greater => Some(RankShift {
            from: old + 1,
            to: new,
            delta: -1,
        }),
    }
}

/// Resolve the rank actually stored for a request, given the live row count.
///
/// Negative ranks are rejected under every policy.
pub fn resolve_target(requested: i32, live_count: i64, bounds: RankBounds) -> Result<i32, CoreError> {
    if requested < 0 {
        return Err(CoreError::Validation(
            "Rangschikking mag niet negatief zijn".into(),
        ));
    }
    match bounds {
        RankBounds::Free => Ok(requested),
        RankBounds::Clamp => {
            let max = i32::try_from((live_count - 1).max(0)).unwrap_or(i32::MAX);
            Ok(requested.min(max))
        }
    }
}

/// Rank given to a new row when the request does not specify one.
pub fn next_slot(live_count: i64) -> i32 {
    i32::try_from(live_count).unwrap_or(i32::MAX)
}

/// Apply a ranking change to an in-memory list of `(id, rank)` pairs.
///
/// Mirrors the repository update exactly. Returns the ids whose rank moved
/// (target included), or an empty list when `target` is absent or unchanged.
pub fn splice(ranks: &mut [(DbId, i32)], target: DbId, new: i32) -> Vec<DbId> {
    let Some(old) = ranks.iter().find(|(id, _)| *id == target).map(|(_, r)| *r) else {
        return Vec::new();
    };
    let Some(shift) = plan_shift(old, new) else {
        return Vec::new();
    };

    let mut touched = Vec::new();
    for (id, rank) in ranks.iter_mut() {
        if *id == target {
            *rank = new;
            touched.push(*id);
        } else if (shift.from..=shift.to).contains(rank) {
            *rank += shift.delta;
            touched.push(*id);
        }
    }
    touched
}

/// Whether the ranks form exactly `{0, 1, ..., n-1}`.
pub fn is_contiguous(ranks: &[(DbId, i32)]) -> bool {
    let mut sorted: Vec<i32> = ranks.iter().map(|(_, r)| *r).collect();
    sorted.sort_unstable();
    sorted
        .iter()
        .enumerate()
        .all(|(i, r)| i32::try_from(i).is_ok_and(|i| i == *r))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn collection(n: i32) -> Vec<(DbId, i32)> {
        (0..n).map(|r| (DbId::from(r) + 100, r)).collect()
    }

    fn rank_of(ranks: &[(DbId, i32)], id: DbId) -> i32 {
        ranks.iter().find(|(i, _)| *i == id).unwrap().1
    }

    #[test]
    fn moving_to_front_pushes_siblings_back() {
        let mut ranks = collection(2);
        // "Gdańsk" (rank 1) becomes first; "Kraków" moves to rank 1.
        let touched = splice(&mut ranks, 101, 0);
        assert_eq!(rank_of(&ranks, 101), 0);
        assert_eq!(rank_of(&ranks, 100), 1);
        assert_eq!(touched.len(), 2);
    }

    #[test]
    fn moving_down_pulls_siblings_forward() {
        let mut ranks = collection(5);
        splice(&mut ranks, 101, 3);
        assert_eq!(rank_of(&ranks, 101), 3);
        assert_eq!(rank_of(&ranks, 102), 1);
        assert_eq!(rank_of(&ranks, 103), 2);
        assert_eq!(rank_of(&ranks, 104), 4);
        assert!(is_contiguous(&ranks));
    }

    #[test]
    fn unchanged_rank_touches_nothing() {
        let mut ranks = collection(3);
        assert!(splice(&mut ranks, 102, 2).is_empty());
        assert!(splice(&mut ranks, 999, 0).is_empty());
    }

    #[test]
    fn serial_splices_stay_contiguous() {
        let mut ranks = collection(7);
        let moves = [(103, 0), (100, 6), (106, 2), (104, 4), (105, 1), (101, 5), (102, 3), (100, 0)];
        for (id, new) in moves {
            splice(&mut ranks, id, new);
            assert!(is_contiguous(&ranks), "gap or duplicate after moving {id} to {new}");
        }
    }

    #[test]
    fn free_bounds_keep_large_ranks() {
        assert_eq!(resolve_target(40, 3, RankBounds::Free).unwrap(), 40);
    }

    #[test]
    fn clamp_bounds_cap_at_last_slot() {
        assert_eq!(resolve_target(40, 3, RankBounds::Clamp).unwrap(), 2);
        assert_eq!(resolve_target(1, 3, RankBounds::Clamp).unwrap(), 1);
        assert_eq!(resolve_target(5, 0, RankBounds::Clamp).unwrap(), 0);
    }

    #[test]
    fn negative_rank_is_rejected() {
        assert_matches!(
            resolve_target(-1, 3, RankBounds::Free),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn bounds_parse_from_env_values() {
        assert_eq!("Clamp".parse::<RankBounds>().unwrap(), RankBounds::Clamp);
        assert_eq!("free".parse::<RankBounds>().unwrap(), RankBounds::Free);
        assert!("sorted".parse::<RankBounds>().is_err());
    }

    #[test]
    fn next_slot_appends() {
        assert_eq!(next_slot(0), 0);
        assert_eq!(next_slot(4), 4);
    }
}
