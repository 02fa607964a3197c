//! Spot reconciliation: copying a peer's records into a user's collection
//! without introducing duplicates.

use std::collections::HashSet;

use anyhow::Result;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::spot::{NewSpot, SpotRow};
use crate::spots::store::SpotStore;

/// Identity of a spot for dedup purposes: the full observation tuple,
/// ignoring owner and row id. Two spots with equal keys denote the same
/// real-world observation. Coordinates compare by exact stored value.
fn spot_key(spot: &SpotRow) -> String {
    format!(
        "{}_{}_{}_{}_{}_{}",
        spot.latitude,
        spot.longitude,
        field(&spot.fish_type),
        field(&spot.bait),
        field(&spot.rod),
        field(&spot.environment),
    )
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("null")
}

/// Computes the source records missing from the destination, as insert
/// proposals attributed to `new_owner` with the source's coordinates and
/// fields. Inputs are not mutated and nothing is inserted here.
///
/// The comparison set is the destination snapshot as given — it is never
/// updated mid-pass. Duplicates within the source batch are collapsed via a
/// separate proposed-key set, so each distinct novel identity appears at
/// most once in the result.
pub fn diff_spots(source: &[SpotRow], destination: &[SpotRow], new_owner: Uuid) -> Vec<NewSpot> {
    let existing: HashSet<String> = destination.iter().map(spot_key).collect();
    let mut proposed: HashSet<String> = HashSet::new();

    source
        .iter()
        .filter(|spot| {
            let key = spot_key(spot);
            !existing.contains(&key) && proposed.insert(key)
        })
        .map(|spot| NewSpot {
            user_id: new_owner,
            latitude: spot.latitude,
            longitude: spot.longitude,
            fish_type: spot.fish_type.clone(),
            bait: spot.bait.clone(),
            environment: spot.environment.clone(),
            rod: spot.rod.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Novel records proposed by the diff.
    pub candidates: usize,
    /// Records actually inserted. Less than `candidates` when storage
    /// rejected individual inserts; a failed insert never aborts the rest.
    pub merged: usize,
}

/// One reconciliation pass: fetch both collections, diff, insert the novel
/// records one by one. Insert failures are logged and skipped.
pub async fn copy_novel_spots(
    store: &dyn SpotStore,
    from_user: Uuid,
    to_user: Uuid,
) -> Result<MergeOutcome> {
    let source = store.spots_by_user(from_user).await?;
    let destination = store.spots_by_user(to_user).await?;

    let proposals = diff_spots(&source, &destination, to_user);
    let candidates = proposals.len();

    let mut merged = 0;
    for spot in &proposals {
        match store.insert(spot).await {
            Ok(_) => merged += 1,
            Err(e) => warn!("Skipping one spot copy for user {to_user}: {e}"),
        }
    }

    info!("Merged {merged} of {candidates} candidate spots from {from_user} into {to_user}");
    Ok(MergeOutcome { candidates, merged })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    fn spot(id: i64, owner: Uuid, latitude: f64, fish: Option<&str>) -> SpotRow {
        SpotRow {
            id,
            user_id: owner,
            latitude,
            longitude: 121.0,
            fish_type: fish.map(String::from),
            bait: Some("蚯蚓".to_string()),
            environment: None,
            rod: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_novel_records_proposed_in_source_order() {
        let peer = Uuid::new_v4();
        let me = Uuid::new_v4();
        let source = vec![
            spot(1, peer, 31.1, Some("鲫鱼")),
            spot(2, peer, 31.2, Some("鲤鱼")),
        ];
        let destination: Vec<SpotRow> = vec![];

        let proposals = diff_spots(&source, &destination, me);
        assert_eq!(proposals.len(), 2);
        assert_eq!(proposals[0].fish_type.as_deref(), Some("鲫鱼"));
        assert_eq!(proposals[1].fish_type.as_deref(), Some("鲤鱼"));
        assert!(proposals.iter().all(|p| p.user_id == me));
    }

    #[test]
    fn test_source_duplicates_collapse_to_one_proposal() {
        // [A, B, A] against [B]: A is proposed exactly once, B not at all.
        let peer = Uuid::new_v4();
        let me = Uuid::new_v4();
        let a1 = spot(1, peer, 31.1, Some("鲫鱼"));
        let b = spot(2, peer, 31.2, Some("鲤鱼"));
        let a2 = spot(3, peer, 31.1, Some("鲫鱼"));
        let source = vec![a1, b, a2];
        let destination = vec![spot(9, me, 31.2, Some("鲤鱼"))];

        let proposals = diff_spots(&source, &destination, me);
        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].fish_type.as_deref(), Some("鲫鱼"));
    }

    #[test]
    fn test_identity_ignores_owner_and_row_id() {
        let peer = Uuid::new_v4();
        let me = Uuid::new_v4();
        // Same observation tuple, different owner and id: not novel.
        let source = vec![spot(1, peer, 31.1, Some("鲫鱼"))];
        let destination = vec![spot(42, me, 31.1, Some("鲫鱼"))];

        assert!(diff_spots(&source, &destination, me).is_empty());
    }

    #[test]
    fn test_none_and_sentinel_fields_are_distinct_identities() {
        let peer = Uuid::new_v4();
        let me = Uuid::new_v4();
        let source = vec![spot(1, peer, 31.1, Some("未知鱼种"))];
        let destination = vec![spot(2, me, 31.1, None)];

        assert_eq!(diff_spots(&source, &destination, me).len(), 1);
    }

    #[test]
    fn test_fields_copied_verbatim() {
        let peer = Uuid::new_v4();
        let me = Uuid::new_v4();
        let mut original = spot(1, peer, 31.1, Some("鲈鱼"));
        original.rod = Some("路亚竿".to_string());
        original.environment = Some("晴天, 微风".to_string());

        let proposals = diff_spots(&[original.clone()], &[], me);
        assert_eq!(proposals.len(), 1);
        let p = &proposals[0];
        assert_eq!(p.latitude, original.latitude);
        assert_eq!(p.longitude, original.longitude);
        assert_eq!(p.rod, original.rod);
        assert_eq!(p.environment, original.environment);
        assert_eq!(p.user_id, me);
    }

    /// In-memory store for exercising the merge pass without a database.
    struct MemStore {
        rows: Mutex<Vec<SpotRow>>,
        fail_on_call: Vec<usize>,
        insert_calls: Mutex<usize>,
    }

    impl MemStore {
        fn new(rows: Vec<SpotRow>) -> Self {
            Self {
                rows: Mutex::new(rows),
                fail_on_call: Vec::new(),
                insert_calls: Mutex::new(0),
            }
        }

        fn failing_on(rows: Vec<SpotRow>, fail_on_call: Vec<usize>) -> Self {
            Self {
                rows: Mutex::new(rows),
                fail_on_call,
                insert_calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl SpotStore for MemStore {
        async fn spots_by_user(&self, user_id: Uuid) -> Result<Vec<SpotRow>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|s| s.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn insert(&self, new_spot: &NewSpot) -> Result<SpotRow> {
            let call = {
                let mut calls = self.insert_calls.lock().unwrap();
                let current = *calls;
                *calls += 1;
                current
            };
            if self.fail_on_call.contains(&call) {
                bail!("simulated storage failure");
            }
            let mut rows = self.rows.lock().unwrap();
            let row = SpotRow {
                id: rows.len() as i64 + 1,
                user_id: new_spot.user_id,
                latitude: new_spot.latitude,
                longitude: new_spot.longitude,
                fish_type: new_spot.fish_type.clone(),
                bait: new_spot.bait.clone(),
                environment: new_spot.environment.clone(),
                rod: new_spot.rod.clone(),
                created_at: Utc::now(),
            };
            rows.push(row.clone());
            Ok(row)
        }
    }

    #[tokio::test]
    async fn test_copy_pass_inserts_only_novel_records() {
        let peer = Uuid::new_v4();
        let me = Uuid::new_v4();
        let store = MemStore::new(vec![
            spot(1, peer, 31.1, Some("鲫鱼")),
            spot(2, peer, 31.2, Some("鲤鱼")),
            spot(3, me, 31.2, Some("鲤鱼")),
        ]);

        let outcome = copy_novel_spots(&store, peer, me).await.unwrap();
        assert_eq!(
            outcome,
            MergeOutcome {
                candidates: 1,
                merged: 1
            }
        );

        let mine = store.spots_by_user(me).await.unwrap();
        assert_eq!(mine.len(), 2);
    }

    #[tokio::test]
    async fn test_insert_failure_does_not_abort_remaining_copies() {
        let peer = Uuid::new_v4();
        let me = Uuid::new_v4();
        let store = MemStore::failing_on(
            vec![
                spot(1, peer, 31.1, Some("鲫鱼")),
                spot(2, peer, 31.2, Some("鲤鱼")),
                spot(3, peer, 31.3, Some("草鱼")),
            ],
            vec![1], // second insert fails
        );

        let outcome = copy_novel_spots(&store, peer, me).await.unwrap();
        assert_eq!(outcome.candidates, 3);
        assert_eq!(outcome.merged, 2);

        let mine = store.spots_by_user(me).await.unwrap();
        assert_eq!(mine.len(), 2);
    }

    #[tokio::test]
    async fn test_second_pass_is_a_no_op() {
        let peer = Uuid::new_v4();
        let me = Uuid::new_v4();
        let store = MemStore::new(vec![spot(1, peer, 31.1, Some("鲫鱼"))]);

        let first = copy_novel_spots(&store, peer, me).await.unwrap();
        assert_eq!(first.merged, 1);

        let second = copy_novel_spots(&store, peer, me).await.unwrap();
        assert_eq!(
            second,
            MergeOutcome {
                candidates: 0,
                merged: 0
            }
        );
    }
}
