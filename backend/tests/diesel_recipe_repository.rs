//! Integration tests for `DieselRecipeRepository` against embedded PostgreSQL.
//!
//! Covers owner scoping, attribute get-or-create inside the recipe
//! transaction, and link replacement on update.

use recipe_backend::domain::ports::{AttributeRepository, RecipeRepository};
use recipe_backend::domain::{
    AttributeKind, AttributeName, Recipe, RecipeChanges, RecipeDraft, RecipeFields, RecipeFilter,
    RecipeLink, RecipeTitle, TimeMinutes, UserId,
};
use recipe_backend::outbound::persistence::{DieselAttributeRepository, DieselRecipeRepository};
use rstest::rstest;

mod support;

use support::{TestDatabase, test_database};

fn names(values: &[&str]) -> Vec<AttributeName> {
    values
        .iter()
        .map(|value| AttributeName::new(*value).expect("valid attribute name"))
        .collect()
}

fn draft(title: &str, tags: &[&str], ingredients: &[&str]) -> RecipeDraft {
    RecipeDraft {
        fields: RecipeFields {
            title: RecipeTitle::new(title).expect("valid title"),
            time_minutes: TimeMinutes::new(25).expect("valid time"),
            price: "7.5".parse().expect("valid price"),
            description: String::from("Weeknight staple"),
            link: Some(RecipeLink::new("https://example.com/curry").expect("valid link")),
        },
        tags: names(tags),
        ingredients: names(ingredients),
    }
}

fn attribute_names(recipe_attributes: &[recipe_backend::domain::RecipeAttribute]) -> Vec<String> {
    recipe_attributes.iter().map(ToString::to_string).collect()
}

struct Fixture {
    db: TestDatabase,
    owner: UserId,
    recipes: DieselRecipeRepository,
    attributes: DieselAttributeRepository,
}

impl Fixture {
    fn create(&self, draft: &RecipeDraft) -> Recipe {
        self.db
            .runtime
            .block_on(self.recipes.create(&self.owner, draft))
            .expect("create succeeds")
    }
}

fn fixture() -> Option<Fixture> {
    let db = test_database()?;
    let owner = db.insert_user("owner@example.com");
    let recipes = DieselRecipeRepository::new(db.pool.clone());
    let attributes = DieselAttributeRepository::new(db.pool.clone());
    Some(Fixture {
        db,
        owner,
        recipes,
        attributes,
    })
}

#[rstest]
fn create_persists_fields_and_sorted_attributes() {
    let Some(fx) = fixture() else { return };
    let created = fx.create(&draft("Chicken curry", &["Spicy", "Dinner"], &["Garlic"]));

    assert_eq!(created.owner(), &fx.owner);
    assert_eq!(created.fields().price.to_string(), "7.50");
    assert_eq!(attribute_names(created.tags()), ["Dinner", "Spicy"]);
    assert_eq!(attribute_names(created.ingredients()), ["Garlic"]);

    let found = fx
        .db
        .runtime
        .block_on(fx.recipes.find(&fx.owner, created.id()))
        .expect("lookup succeeds")
        .expect("recipe exists");
    assert_eq!(found, created);
}

#[rstest]
fn existing_attribute_names_are_reused() {
    let Some(fx) = fixture() else { return };
    let first = fx.create(&draft("Curry", &["Dinner"], &["Rice"]));
    let second = fx.create(&draft("Risotto", &["Dinner"], &["Rice"]));

    assert_eq!(first.tags()[0].id(), second.tags()[0].id());
    assert_eq!(first.ingredients()[0].id(), second.ingredients()[0].id());

    let tags = fx
        .db
        .runtime
        .block_on(fx.attributes.list(&fx.owner, AttributeKind::Tag, false))
        .expect("list succeeds");
    assert_eq!(tags.len(), 1);
}

#[rstest]
fn recipes_are_scoped_to_their_owner() {
    let Some(fx) = fixture() else { return };
    let created = fx.create(&draft("Private soup", &[], &[]));
    let intruder = fx.db.insert_user("intruder@example.com");

    let runtime = &fx.db.runtime;
    let listed = runtime
        .block_on(fx.recipes.list(&intruder, &RecipeFilter::default()))
        .expect("list succeeds");
    assert!(listed.is_empty());

    let found = runtime
        .block_on(fx.recipes.find(&intruder, created.id()))
        .expect("lookup succeeds");
    assert!(found.is_none());

    let updated = runtime
        .block_on(fx.recipes.update(&intruder, created.id(), &RecipeChanges::default()))
        .expect("update succeeds");
    assert!(updated.is_none());

    let deleted = runtime
        .block_on(fx.recipes.delete(&intruder, created.id()))
        .expect("delete succeeds");
    assert!(!deleted);
}

#[rstest]
fn list_is_newest_first_and_filters_by_any_attribute() {
    let Some(fx) = fixture() else { return };
    let curry = fx.create(&draft("Curry", &["Dinner"], &["Garlic"]));
    let salad = fx.create(&draft("Salad", &["Lunch"], &["Lettuce"]));
    let toast = fx.create(&draft("Toast", &["Breakfast"], &["Garlic"]));

    let runtime = &fx.db.runtime;
    let all = runtime
        .block_on(fx.recipes.list(&fx.owner, &RecipeFilter::default()))
        .expect("list succeeds");
    let ids: Vec<_> = all.iter().map(Recipe::id).collect();
    assert_eq!(ids, [toast.id(), salad.id(), curry.id()]);

    let by_tags = RecipeFilter {
        tag_ids: vec![curry.tags()[0].id(), salad.tags()[0].id()],
        ingredient_ids: Vec::new(),
    };
    let tagged = runtime
        .block_on(fx.recipes.list(&fx.owner, &by_tags))
        .expect("list succeeds");
    let ids: Vec<_> = tagged.iter().map(Recipe::id).collect();
    assert_eq!(ids, [salad.id(), curry.id()]);

    let both = RecipeFilter {
        tag_ids: vec![curry.tags()[0].id(), toast.tags()[0].id()],
        ingredient_ids: vec![salad.ingredients()[0].id()],
    };
    let none = runtime
        .block_on(fx.recipes.list(&fx.owner, &both))
        .expect("list succeeds");
    assert!(none.is_empty());
}

#[rstest]
fn update_replaces_only_supplied_associations() {
    let Some(fx) = fixture() else { return };
    let created = fx.create(&draft("Curry", &["Dinner"], &["Garlic", "Rice"]));

    let changes = RecipeChanges {
        title: Some(RecipeTitle::new("Green curry").expect("valid title")),
        link: Some(None),
        tags: Some(names(&["Thai", "Dinner"])),
        ..RecipeChanges::default()
    };
    let updated = fx
        .db
        .runtime
        .block_on(fx.recipes.update(&fx.owner, created.id(), &changes))
        .expect("update succeeds")
        .expect("recipe exists");

    assert_eq!(updated.title().as_ref(), "Green curry");
    assert_eq!(updated.fields().link, None);
    assert_eq!(updated.fields().time_minutes, created.fields().time_minutes);
    assert_eq!(attribute_names(updated.tags()), ["Dinner", "Thai"]);
    assert_eq!(attribute_names(updated.ingredients()), ["Garlic", "Rice"]);
}

#[rstest]
fn update_with_empty_list_clears_links() {
    let Some(fx) = fixture() else { return };
    let created = fx.create(&draft("Curry", &["Dinner"], &["Garlic"]));

    let changes = RecipeChanges {
        ingredients: Some(Vec::new()),
        ..RecipeChanges::default()
    };
    let updated = fx
        .db
        .runtime
        .block_on(fx.recipes.update(&fx.owner, created.id(), &changes))
        .expect("update succeeds")
        .expect("recipe exists");
    assert!(updated.ingredients().is_empty());
    assert_eq!(updated.tags().len(), 1);
}

#[rstest]
fn delete_removes_recipe_but_keeps_attributes() {
    let Some(fx) = fixture() else { return };
    let created = fx.create(&draft("Curry", &["Dinner"], &[]));

    let runtime = &fx.db.runtime;
    let deleted = runtime
        .block_on(fx.recipes.delete(&fx.owner, created.id()))
        .expect("delete succeeds");
    assert!(deleted);

    let again = runtime
        .block_on(fx.recipes.delete(&fx.owner, created.id()))
        .expect("delete succeeds");
    assert!(!again);

    let tags = runtime
        .block_on(fx.attributes.list(&fx.owner, AttributeKind::Tag, false))
        .expect("list succeeds");
    assert_eq!(attribute_names(&tags), ["Dinner"]);
}
