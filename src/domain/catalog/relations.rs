//! Back-reference planning for movie writes.
//!
//! Every movie create, update, or delete must rewrite the derived `movies`
//! lists on the referenced producer and actors. The plan computed here is the
//! minimal set of list insertions and removals for one movie operation:
//!
//! - a producer swap removes the movie id from the old producer and adds it
//!   to the new one; re-asserting the current producer changes nothing;
//! - an actors change removes the id from actors dropped from the list and
//!   adds it to actors newly in the list, leaving unchanged actors untouched;
//! - additions append without deduplication and removals drop every
//!   occurrence, matching how the stored lists behave.
//!
//! The plan is pure data; the service layer applies it through the store,
//! removals before additions, each side as one bulk write per collection.

use uuid::Uuid;

use super::Movie;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct BackRefPlan {
    pub producer_remove: Option<Uuid>,
    pub producer_add: Option<Uuid>,
    pub actor_removes: Vec<Uuid>,
    pub actor_adds: Vec<Uuid>,
}

impl BackRefPlan {
    /// A new movie registers itself with its producer and every actor.
    pub fn for_create(movie: &Movie) -> Self {
        BackRefPlan {
            producer_add: Some(movie.producer),
            actor_adds: movie.actors.clone(),
            ..Default::default()
        }
    }

    /// Compares the stored record against the merged update result. Fields
    /// the patch did not touch compare equal and contribute nothing.
    pub fn for_update(existing: &Movie, updated: &Movie) -> Self {
        let mut plan = BackRefPlan::default();

        if updated.producer != existing.producer {
            plan.producer_remove = Some(existing.producer);
            plan.producer_add = Some(updated.producer);
        }

        if updated.actors != existing.actors {
            plan.actor_removes = existing
                .actors
                .iter()
                .filter(|id| !updated.actors.contains(id))
                .copied()
                .collect();
            plan.actor_adds = updated
                .actors
                .iter()
                .filter(|id| !existing.actors.contains(id))
                .copied()
                .collect();
        }

        plan
    }

    /// A deleted movie withdraws itself from its producer and every actor.
    pub fn for_delete(movie: &Movie) -> Self {
        BackRefPlan {
            producer_remove: Some(movie.producer),
            actor_removes: movie.actors.clone(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.producer_remove.is_none()
            && self.producer_add.is_none()
            && self.actor_removes.is_empty()
            && self.actor_adds.is_empty()
    }
}
