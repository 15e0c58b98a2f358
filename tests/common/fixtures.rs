//! Test fixtures and data factories
//!
//! Records are inserted directly through SeaORM so bulk operations have something to act on.

use admin_bulk::storage::database::entities::{caretaker, family};
use chrono::Utc;
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

/// Insert `n` active families in the `ifashe` program
pub async fn seed_families(db: &DatabaseConnection, n: usize) -> Vec<Uuid> {
    seed_families_in(db, n, "ifashe").await
}

/// Insert `n` active families in the given program
pub async fn seed_families_in(db: &DatabaseConnection, n: usize, program: &str) -> Vec<Uuid> {
    let now = Utc::now().fixed_offset();
    let ids: Vec<Uuid> = (0..n).map(|_| Uuid::new_v4()).collect();
    let models: Vec<family::ActiveModel> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| family::ActiveModel {
            id: Set(*id),
            name: Set(format!("Family {}", i)),
            program: Set(program.to_string()),
            status: Set("active".to_string()),
            archived_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .collect();

    family::Entity::insert_many(models)
        .exec(db)
        .await
        .expect("Failed to seed families");
    ids
}

/// Insert `n` active caretakers with phone numbers
pub async fn seed_caretakers(db: &DatabaseConnection, n: usize) -> Vec<Uuid> {
    let now = Utc::now().fixed_offset();
    let ids: Vec<Uuid> = (0..n).map(|_| Uuid::new_v4()).collect();
    let models: Vec<caretaker::ActiveModel> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| caretaker::ActiveModel {
            id: Set(*id),
            full_name: Set(format!("Caretaker {}", i)),
            phone: Set(Some(format!("+25078800{:04}", i))),
            status: Set("active".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .collect();

    caretaker::Entity::insert_many(models)
        .exec(db)
        .await
        .expect("Failed to seed caretakers");
    ids
}

/// Load families by id, in no particular order
pub async fn families(db: &DatabaseConnection, ids: &[Uuid]) -> Vec<family::Model> {
    use sea_orm::{ColumnTrait, QueryFilter};

    family::Entity::find()
        .filter(family::Column::Id.is_in(ids.iter().copied()))
        .all(db)
        .await
        .expect("Failed to load families")
}
