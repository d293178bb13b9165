use chrono::{DateTime, Utc};
use diesel::prelude::*;
use larder_core::Actor;
use uuid::Uuid;

/// A user as needed for authentication and authorization. The profile
/// image bytes are only loaded by the endpoints that serve them.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_superuser: bool,
    pub image_content_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn actor(&self) -> Actor {
        Actor {
            id: self.id,
            is_superuser: self.is_superuser,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub is_superuser: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sessions)]
pub struct NewSession<'a> {
    pub user_id: Uuid,
    pub token_hash: &'a str,
    pub expires_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Category {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::categories)]
pub struct CategoryChanges<'a> {
    pub title: Option<&'a str>,
    pub slug: Option<&'a str>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory<'a> {
    pub title: &'a str,
    pub slug: &'a str,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Recipe {
    pub id: Uuid,
    pub author_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub instructions: String,
    pub slug: String,
    pub published: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub author_id: Uuid,
    pub category_id: Uuid,
    pub title: &'a str,
    pub instructions: &'a str,
    pub slug: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::recipes)]
pub struct RecipeChanges<'a> {
    pub category_id: Option<Uuid>,
    pub title: Option<&'a str>,
    pub instructions: Option<&'a str>,
    pub slug: Option<&'a str>,
    pub updated: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Ingredient {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub name: String,
    pub slug: String,
    pub quantity: i32,
    pub units_of_measurement: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ingredients)]
pub struct NewIngredient<'a> {
    pub recipe_id: Uuid,
    pub name: &'a str,
    pub slug: &'a str,
    pub quantity: i32,
    pub units_of_measurement: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::ingredients)]
pub struct IngredientChanges<'a> {
    pub name: Option<&'a str>,
    pub slug: Option<&'a str>,
    pub quantity: Option<i32>,
    /// Outer `None` leaves the unit alone, `Some(None)` clears it.
    pub units_of_measurement: Option<Option<&'a str>>,
}

/// Image row without the image bytes.
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::recipe_images)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeImage {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub content_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipe_images)]
pub struct NewRecipeImage<'a> {
    pub recipe_id: Uuid,
    pub content_type: &'a str,
    pub data: &'a [u8],
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Review {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub published: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct NewReview<'a> {
    pub recipe_id: Uuid,
    pub author_id: Uuid,
    pub content: &'a str,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::ratings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Rating {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub author_id: Uuid,
    pub value: i16,
    pub published: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ratings)]
pub struct NewRating {
    pub recipe_id: Uuid,
    pub author_id: Uuid,
    pub value: i16,
}
