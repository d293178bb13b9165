//! Hyperlinks embedded in responses. Every resource carries a `url` to
//! itself and links to its related resources.

use uuid::Uuid;

pub fn category(id: Uuid) -> String {
    format!("/api/categories/{}", id)
}

pub fn category_recipes(id: Uuid) -> String {
    format!("/api/categories/{}/recipes", id)
}

pub fn recipe(id: Uuid) -> String {
    format!("/api/recipes/{}", id)
}

pub fn recipe_average_rating(id: Uuid) -> String {
    format!("/api/recipes/{}/average-rating", id)
}

pub fn ingredients(recipe_id: Uuid) -> String {
    format!("/api/recipes/{}/ingredients", recipe_id)
}

pub fn ingredient(recipe_id: Uuid, id: Uuid) -> String {
    format!("/api/recipes/{}/ingredients/{}", recipe_id, id)
}

pub fn images(recipe_id: Uuid) -> String {
    format!("/api/recipes/{}/images", recipe_id)
}

pub fn image(recipe_id: Uuid, id: Uuid) -> String {
    format!("/api/recipes/{}/images/{}", recipe_id, id)
}

pub fn image_file(recipe_id: Uuid, id: Uuid) -> String {
    format!("/api/recipes/{}/images/{}/file", recipe_id, id)
}

pub fn reviews(recipe_id: Uuid) -> String {
    format!("/api/recipes/{}/reviews", recipe_id)
}

pub fn review(recipe_id: Uuid, id: Uuid) -> String {
    format!("/api/recipes/{}/reviews/{}", recipe_id, id)
}

pub fn ratings(recipe_id: Uuid) -> String {
    format!("/api/recipes/{}/ratings", recipe_id)
}

pub fn rating(recipe_id: Uuid, id: Uuid) -> String {
    format!("/api/recipes/{}/ratings/{}", recipe_id, id)
}

pub fn author(id: Uuid) -> String {
    format!("/api/authors/{}", id)
}

pub fn author_recipes(id: Uuid) -> String {
    format!("/api/authors/{}/recipes", id)
}

pub fn author_image(id: Uuid) -> String {
    format!("/api/authors/{}/image", id)
}
