//! Integration tests for the repository layer against a real database:
//! - Entity creation (user -> address -> home / location)
//! - Owned-address deletion and FK cascades
//! - Unique constraint violations
//! - Update and list operations

use sqlx::PgPool;
use nearby_core::roles::Role;
use nearby_db::models::address::CreateAddress;
use nearby_db::models::location::CreateLocation;
use nearby_db::repositories::{
    AddressRepo, DistanceRepo, HomeRepo, LocationRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_address(street: &str) -> CreateAddress {
    CreateAddress {
        street: street.to_string(),
        city: "Springfield".to_string(),
        postal_code: "12345".to_string(),
        country: "USA".to_string(),
        latitude: None,
        longitude: None,
    }
}

fn new_location(name: &str) -> CreateLocation {
    CreateLocation {
        name: name.to_string(),
        summary: None,
        description: "Somewhere to go".to_string(),
        price_estimate_min: 5,
        price_estimate_max: 20,
        address: new_address("9 Side St"),
    }
}

async fn seed_user(pool: &PgPool, email: &str) -> i64 {
    UserRepo::create(pool, email, "$argon2id$stub", Role::User)
        .await
        .expect("user creation should succeed")
        .id
}

async fn seed_home(pool: &PgPool, user_id: i64, name: &str) -> (i64, i64) {
    let address = AddressRepo::create(pool, &new_address("1 Main St"), 4.9, 52.37)
        .await
        .expect("address creation should succeed");
    let home = HomeRepo::create(pool, name, address.id, user_id)
        .await
        .expect("home creation should succeed");
    (home.id, address.id)
}

async fn seed_location(pool: &PgPool, user_id: i64, name: &str) -> (i64, i64) {
    let address = AddressRepo::create(pool, &new_address("9 Side St"), 4.91, 52.36)
        .await
        .expect("address creation should succeed");
    let location = LocationRepo::create(pool, &new_location(name), address.id, user_id)
        .await
        .expect("location creation should succeed");
    (location.id, address.id)
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Duplicate emails violate the unique constraint.
#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_user_email_is_rejected(pool: PgPool) {
    seed_user(&pool, "dup@example.com").await;

    let result = UserRepo::create(&pool, "dup@example.com", "$argon2id$stub", Role::User).await;
    let err = result.expect_err("duplicate email must fail");
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_users_email"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

/// The role column round-trips through its string form.
#[sqlx::test(migrations = "../../db/migrations")]
async fn user_role_round_trips(pool: PgPool) {
    let user = UserRepo::create(&pool, "admin@example.com", "$argon2id$stub", Role::Admin)
        .await
        .expect("user creation should succeed");

    let found = UserRepo::find_by_email(&pool, "admin@example.com")
        .await
        .expect("lookup should succeed")
        .expect("user should exist");
    assert_eq!(found.id, user.id);
    assert_eq!(found.role.parse::<Role>().unwrap(), Role::Admin);
}

/// Deleting a user cascades to their homes, addresses aside.
#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_user_cascades_to_homes(pool: PgPool) {
    let user_id = seed_user(&pool, "owner@example.com").await;
    let (home_id, _) = seed_home(&pool, user_id, "Flat A").await;

    let deleted = UserRepo::delete(&pool, user_id)
        .await
        .expect("delete should succeed");
    assert!(deleted);

    let home = HomeRepo::find_by_id(&pool, home_id)
        .await
        .expect("lookup should succeed");
    assert!(home.is_none(), "home must cascade with its owner");
}

/// Deleting a user also removes the address rows owned by their
/// cascaded homes and locations, not just the entities.
#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_user_removes_owned_addresses(pool: PgPool) {
    let user_id = seed_user(&pool, "owner@example.com").await;
    let (_, home_address_id) = seed_home(&pool, user_id, "Flat A").await;
    let (_, location_address_id) = seed_location(&pool, user_id, "Cafe").await;

    let other_id = seed_user(&pool, "other@example.com").await;
    let (_, kept_address_id) = seed_home(&pool, other_id, "Flat B").await;

    let deleted = UserRepo::delete(&pool, user_id)
        .await
        .expect("delete should succeed");
    assert!(deleted);

    for orphan in [home_address_id, location_address_id] {
        let address = AddressRepo::find_by_id(&pool, orphan)
            .await
            .expect("lookup should succeed");
        assert!(address.is_none(), "owned address must go with its entity");
    }

    let kept = AddressRepo::find_by_id(&pool, kept_address_id)
        .await
        .expect("lookup should succeed");
    assert!(kept.is_some(), "other users' addresses must survive");
}

// ---------------------------------------------------------------------------
// Homes
// ---------------------------------------------------------------------------

/// Create, rename, and list.
#[sqlx::test(migrations = "../../db/migrations")]
async fn home_crud(pool: PgPool) {
    let user_id = seed_user(&pool, "owner@example.com").await;
    let (home_id, _) = seed_home(&pool, user_id, "Old name").await;

    let renamed = HomeRepo::rename(&pool, home_id, "New name")
        .await
        .expect("rename should succeed")
        .expect("home should exist");
    assert_eq!(renamed.name, "New name");

    let all = HomeRepo::list(&pool).await.expect("list should succeed");
    assert_eq!(all.len(), 1);

    assert!(HomeRepo::exists(&pool, home_id).await.unwrap());
    assert!(!HomeRepo::exists(&pool, home_id + 1).await.unwrap());
}

/// Deleting a home removes its owned address in the same transaction.
#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_home_removes_owned_address(pool: PgPool) {
    let user_id = seed_user(&pool, "owner@example.com").await;
    let (home_id, address_id) = seed_home(&pool, user_id, "Flat A").await;

    let deleted = HomeRepo::delete(&pool, home_id)
        .await
        .expect("delete should succeed");
    assert!(deleted);

    let address = AddressRepo::find_by_id(&pool, address_id)
        .await
        .expect("lookup should succeed");
    assert!(address.is_none(), "owned address must go with the home");

    // A second delete finds nothing.
    let deleted = HomeRepo::delete(&pool, home_id)
        .await
        .expect("delete should succeed");
    assert!(!deleted);
}

/// Endpoints join the owning address's coordinates onto the entity id.
#[sqlx::test(migrations = "../../db/migrations")]
async fn home_endpoints_carry_coordinates(pool: PgPool) {
    let user_id = seed_user(&pool, "owner@example.com").await;
    let (home_id, _) = seed_home(&pool, user_id, "Flat A").await;

    let endpoints = HomeRepo::list_endpoints(&pool)
        .await
        .expect("list should succeed");
    assert_eq!(endpoints.len(), 1);
    assert_eq!(endpoints[0].id, home_id);
    assert_eq!(endpoints[0].longitude, 4.9);
    assert_eq!(endpoints[0].latitude, 52.37);

    let single = HomeRepo::endpoint(&pool, home_id)
        .await
        .expect("lookup should succeed")
        .expect("endpoint should exist");
    assert_eq!(single.id, home_id);
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

/// Scalar-field update leaves the address untouched.
#[sqlx::test(migrations = "../../db/migrations")]
async fn location_update_fields(pool: PgPool) {
    let user_id = seed_user(&pool, "owner@example.com").await;
    let (location_id, address_id) = seed_location(&pool, user_id, "Cafe").await;

    let mut input = new_location("Bigger Cafe");
    input.summary = Some("Now with terrace".to_string());
    input.price_estimate_max = 45;

    let updated = LocationRepo::update_fields(&pool, location_id, &input)
        .await
        .expect("update should succeed")
        .expect("location should exist");
    assert_eq!(updated.name, "Bigger Cafe");
    assert_eq!(updated.summary.as_deref(), Some("Now with terrace"));
    assert_eq!(updated.price_estimate_max, 45);
    assert_eq!(updated.address_id, address_id);
}

/// The price range check constraint rejects min above max.
#[sqlx::test(migrations = "../../db/migrations")]
async fn location_price_range_is_checked(pool: PgPool) {
    let user_id = seed_user(&pool, "owner@example.com").await;
    let address = AddressRepo::create(&pool, &new_address("9 Side St"), 4.91, 52.36)
        .await
        .expect("address creation should succeed");

    let mut input = new_location("Backwards");
    input.price_estimate_min = 50;
    input.price_estimate_max = 10;

    let result = LocationRepo::create(&pool, &input, address.id, user_id).await;
    assert!(result.is_err(), "inverted price range must violate the check");
}

// ---------------------------------------------------------------------------
// Distances
// ---------------------------------------------------------------------------

/// Upsert converges repeated writes for a pair onto one row.
#[sqlx::test(migrations = "../../db/migrations")]
async fn distance_upsert_converges(pool: PgPool) {
    let user_id = seed_user(&pool, "owner@example.com").await;
    let (home_id, _) = seed_home(&pool, user_id, "Flat A").await;
    let (location_id, _) = seed_location(&pool, user_id, "Cafe").await;

    let first = DistanceRepo::upsert(&pool, home_id, location_id, 12)
        .await
        .expect("upsert should succeed");
    let second = DistanceRepo::upsert(&pool, home_id, location_id, 14)
        .await
        .expect("upsert should succeed");

    assert_eq!(first.id, second.id, "the pair must keep a single row");
    assert_eq!(second.walking_distance_minutes, 14);

    let rows = DistanceRepo::list_by_home(&pool, home_id)
        .await
        .expect("list should succeed");
    assert_eq!(rows.len(), 1);
}

/// Both list directions see the same rows.
#[sqlx::test(migrations = "../../db/migrations")]
async fn distance_lists_by_home_and_location(pool: PgPool) {
    let user_id = seed_user(&pool, "owner@example.com").await;
    let (home_id, _) = seed_home(&pool, user_id, "Flat A").await;
    let (location_a, _) = seed_location(&pool, user_id, "Cafe").await;
    let (location_b, _) = seed_location(&pool, user_id, "Gym").await;

    DistanceRepo::upsert(&pool, home_id, location_a, 12)
        .await
        .unwrap();
    DistanceRepo::upsert(&pool, home_id, location_b, 25)
        .await
        .unwrap();

    let by_home = DistanceRepo::list_by_home(&pool, home_id).await.unwrap();
    assert_eq!(by_home.len(), 2);

    let by_location = DistanceRepo::list_by_location(&pool, location_a)
        .await
        .unwrap();
    assert_eq!(by_location.len(), 1);
    assert_eq!(by_location[0].source_home_id, home_id);

    let removed = DistanceRepo::delete_by_home(&pool, home_id).await.unwrap();
    assert_eq!(removed, 2);
}
