//! Repository for the `motivation` block and `motivation_image_locations`.

use ontdek_core::types::DbId;
use sqlx::PgPool;

use crate::models::motivation::{
    Motivation, MotivationImageLocation, UpdateMotivation, UpsertMotivationImageLocation,
};

const COLUMNS: &str = "id, title, description, button_text, button_action, image, published, \
                       updated_by, created_at, updated_at";

const LOCATION_COLUMNS: &str = "id, location_name, image, created_at, updated_at";

pub struct MotivationRepo;

impl MotivationRepo {
    pub async fn get(pool: &PgPool) -> Result<Motivation, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM motivation WHERE id = 1");
        sqlx::query_as::<_, Motivation>(&query).fetch_one(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        input: &UpdateMotivation,
        updated_by: Option<DbId>,
    ) -> Result<Motivation, sqlx::Error> {
        let query = format!(
            "UPDATE motivation SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                button_text = COALESCE($3, button_text),
                button_action = COALESCE($4, button_action),
                image = COALESCE($5, image),
                published = COALESCE($6, published),
                updated_by = $7
             WHERE id = 1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Motivation>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.button_text)
            .bind(&input.button_action)
            .bind(&input.image)
            .bind(input.published)
            .bind(updated_by)
            .fetch_one(pool)
            .await
    }

    // -- Image locations --

    pub async fn list_image_locations(
        pool: &PgPool,
    ) -> Result<Vec<MotivationImageLocation>, sqlx::Error> {
        let query =
            format!("SELECT {LOCATION_COLUMNS} FROM motivation_image_locations ORDER BY location_name");
        sqlx::query_as::<_, MotivationImageLocation>(&query)
            .fetch_all(pool)
            .await
    }

    /// Assign `image` to a location, replacing any earlier assignment.
    pub async fn upsert_image_location(
        pool: &PgPool,
        input: &UpsertMotivationImageLocation,
    ) -> Result<MotivationImageLocation, sqlx::Error> {
        let query = format!(
            "INSERT INTO motivation_image_locations (location_name, image)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_motivation_image_locations_location_name
             DO UPDATE SET image = EXCLUDED.image
             RETURNING {LOCATION_COLUMNS}"
        );
        sqlx::query_as::<_, MotivationImageLocation>(&query)
            .bind(&input.location_name)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    pub async fn delete_image_location(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM motivation_image_locations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
