//! Database seeder for Atrium development and testing.
//!
//! Seeds one account per role plus a second employee so the approval
//! flows can be exercised locally. All accounts share the password
//! `password123`.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use atrium_core::auth::hash_password;
use atrium_db::entities::{sea_orm_active_enums::UserRole, users};

const DEMO_PASSWORD: &str = "password123";

const DEMO_USERS: &[(&str, &str, UserRole)] = &[
    ("Admin User", "admin@company.com", UserRole::Admin),
    ("Manager User", "manager@company.com", UserRole::Manager),
    ("Employee One", "employee1@company.com", UserRole::Employee),
    ("Employee Two", "employee2@company.com", UserRole::Employee),
];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = atrium_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo accounts...");
    let password_hash = hash_password(DEMO_PASSWORD).expect("Failed to hash demo password");

    for (name, email, role) in DEMO_USERS {
        seed_user(&db, name, email, *role, &password_hash).await;
    }

    println!("Seeding complete!");
}

async fn seed_user(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    role: UserRole,
    password_hash: &str,
) {
    let existing = users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await
        .ok()
        .flatten();
    if existing.is_some() {
        println!("  {email} already exists, skipping...");
        return;
    }

    let now = Utc::now().into();
    let user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        password_hash: Set(password_hash.to_string()),
        role: Set(role),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };

    if let Err(e) = user.insert(db).await {
        eprintln!("Failed to insert {email}: {e}");
    } else {
        println!("  Created {email}");
    }
}
