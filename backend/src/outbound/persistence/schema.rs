//! Diesel table definitions for the recipe store.
//!
//! Kept in sync by hand with `backend/migrations`.

diesel::table! {
    /// Registered identities. `email` is unique after normalisation.
    users (id) {
        id -> Uuid,
        email -> Varchar,
        name -> Varchar,
        password_hash -> Text,
        is_active -> Bool,
        is_staff -> Bool,
    }
}

diesel::table! {
    /// Recipes; `id` is a bigserial so higher ids are newer.
    recipes (id) {
        id -> Int8,
        user_id -> Uuid,
        title -> Varchar,
        time_minutes -> Int4,
        price -> Numeric,
        description -> Text,
        link -> Nullable<Varchar>,
    }
}

diesel::table! {
    tags (id) {
        id -> Int8,
        user_id -> Uuid,
        name -> Varchar,
    }
}

diesel::table! {
    ingredients (id) {
        id -> Int8,
        user_id -> Uuid,
        name -> Varchar,
    }
}

diesel::table! {
    /// Recipe to tag links; rows cascade with either side.
    recipe_tags (recipe_id, tag_id) {
        recipe_id -> Int8,
        tag_id -> Int8,
    }
}

diesel::table! {
    /// Recipe to ingredient links; rows cascade with either side.
    recipe_ingredients (recipe_id, ingredient_id) {
        recipe_id -> Int8,
        ingredient_id -> Int8,
    }
}

diesel::joinable!(recipes -> users (user_id));
diesel::joinable!(tags -> users (user_id));
diesel::joinable!(ingredients -> users (user_id));
diesel::joinable!(recipe_tags -> recipes (recipe_id));
diesel::joinable!(recipe_tags -> tags (tag_id));
diesel::joinable!(recipe_ingredients -> recipes (recipe_id));
diesel::joinable!(recipe_ingredients -> ingredients (ingredient_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    recipes,
    tags,
    ingredients,
    recipe_tags,
    recipe_ingredients,
);
