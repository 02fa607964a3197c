//! Proximity filter over candidate user locations.

use uuid::Uuid;

use crate::geo::distance_meters;
use crate::models::user::UserRow;

/// Returns the candidates within `radius_m` meters of the requester.
///
/// The requester is excluded by identity, offline candidates are excluded,
/// and the boundary is inclusive (`distance <= radius_m`). The result keeps
/// the candidate iteration order; callers wanting a distance sort do it
/// themselves. The default radius of 50 m means "currently co-located", not
/// general nearby search.
pub fn nearby_users(
    requester_id: Uuid,
    latitude: f64,
    longitude: f64,
    candidates: &[UserRow],
    radius_m: f64,
) -> Vec<UserRow> {
    candidates
        .iter()
        .filter(|u| u.id != requester_id)
        .filter(|u| u.is_online)
        .filter(|u| distance_meters(latitude, longitude, u.latitude, u.longitude) <= radius_m)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: Uuid, latitude: f64, longitude: f64, is_online: bool) -> UserRow {
        UserRow {
            id,
            name: "钓友".to_string(),
            latitude,
            longitude,
            last_seen: Utc::now(),
            is_online,
            is_sharing: true,
        }
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let requester = Uuid::new_v4();
        let at_edge = user(Uuid::new_v4(), 31.00045, 121.0, true);
        let beyond = user(Uuid::new_v4(), 31.00046, 121.0, true);

        // Pin the radius to the edge candidate's exact distance: it must be
        // included, while the next candidate out must not.
        let radius = distance_meters(31.0, 121.0, at_edge.latitude, at_edge.longitude);
        let result = nearby_users(
            requester,
            31.0,
            121.0,
            &[at_edge.clone(), beyond.clone()],
            radius,
        );

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, at_edge.id);
    }

    #[test]
    fn test_fifty_meter_default_semantics() {
        let requester = Uuid::new_v4();
        // 0.00044° of latitude is ~49 m, 0.00046° is ~51 m.
        let inside = user(Uuid::new_v4(), 31.00044, 121.0, true);
        let outside = user(Uuid::new_v4(), 31.00046, 121.0, true);

        let result = nearby_users(requester, 31.0, 121.0, &[inside.clone(), outside], 50.0);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, inside.id);
    }

    #[test]
    fn test_requester_excluded_by_identity() {
        let requester = Uuid::new_v4();
        let own_row = user(requester, 31.0, 121.0, true);

        let result = nearby_users(requester, 31.0, 121.0, &[own_row], 50.0);
        assert!(result.is_empty());
    }

    #[test]
    fn test_offline_candidates_excluded() {
        let requester = Uuid::new_v4();
        let offline = user(Uuid::new_v4(), 31.0, 121.0, false);

        let result = nearby_users(requester, 31.0, 121.0, &[offline], 50.0);
        assert!(result.is_empty());
    }

    #[test]
    fn test_candidate_order_preserved() {
        let requester = Uuid::new_v4();
        // Farther candidate listed first; no distance sort may reorder them.
        let farther = user(Uuid::new_v4(), 31.0003, 121.0, true);
        let nearer = user(Uuid::new_v4(), 31.0001, 121.0, true);

        let result = nearby_users(
            requester,
            31.0,
            121.0,
            &[farther.clone(), nearer.clone()],
            50.0,
        );

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, farther.id);
        assert_eq!(result[1].id, nearer.id);
    }
}
