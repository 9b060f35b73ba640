//! Database seeder for Procura development and testing.
//!
//! Seeds an admin user, a sample project, and a sample vendor for local
//! development.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use procura_db::entities::{
    StringList, projects, users, vendors,
    sea_orm_active_enums::{ProjectStatus, UserRole},
};

/// Seed admin user ID (consistent for all seeds)
const ADMIN_USER_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Seed project ID (consistent for all seeds)
const SAMPLE_PROJECT_ID: &str = "00000000-0000-0000-0000-000000000002";
/// Seed vendor ID (consistent for all seeds)
const SAMPLE_VENDOR_ID: &str = "00000000-0000-0000-0000-000000000003";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = procura_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding admin user...");
    seed_admin_user(&db).await;

    println!("Seeding sample project...");
    seed_sample_project(&db).await;

    println!("Seeding sample vendor...");
    seed_sample_vendor(&db).await;

    println!("Seeding complete!");
}

fn admin_user_id() -> Uuid {
    Uuid::parse_str(ADMIN_USER_ID).unwrap()
}

fn sample_project_id() -> Uuid {
    Uuid::parse_str(SAMPLE_PROJECT_ID).unwrap()
}

fn sample_vendor_id() -> Uuid {
    Uuid::parse_str(SAMPLE_VENDOR_ID).unwrap()
}

/// Seeds an admin user for development.
async fn seed_admin_user(db: &DatabaseConnection) {
    if users::Entity::find_by_id(admin_user_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Admin user already exists, skipping...");
        return;
    }

    let user = users::ActiveModel {
        id: Set(admin_user_id()),
        display_name: Set("Admin".to_string()),
        email: Set("admin@procura.dev".to_string()),
        role: Set(UserRole::Admin),
        is_active: Set(true),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    };

    if let Err(e) = user.insert(db).await {
        eprintln!("Failed to insert admin user: {e}");
    } else {
        println!("  Created admin user: admin@procura.dev");
    }
}

/// Seeds a sample project for development.
async fn seed_sample_project(db: &DatabaseConnection) {
    if projects::Entity::find_by_id(sample_project_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Sample project already exists, skipping...");
        return;
    }

    let project = projects::ActiveModel {
        id: Set(sample_project_id()),
        name: Set("Warehouse Extension".to_string()),
        code: Set("WH-EXT".to_string()),
        budget: Set(dec!(1000000)),
        status: Set(ProjectStatus::InProgress),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    };

    if let Err(e) = project.insert(db).await {
        eprintln!("Failed to insert sample project: {e}");
    } else {
        println!("  Created sample project: WH-EXT");
    }
}

/// Seeds a sample vendor for development.
async fn seed_sample_vendor(db: &DatabaseConnection) {
    if vendors::Entity::find_by_id(sample_vendor_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Sample vendor already exists, skipping...");
        return;
    }

    let vendor = vendors::ActiveModel {
        id: Set(sample_vendor_id()),
        name: Set("Siam Steel Supply".to_string()),
        tax_id: Set(Some("0105551234567".to_string())),
        contact_name: Set(Some("Somchai".to_string())),
        phone: Set(Some("02-123-4567".to_string())),
        email: Set(Some("sales@siamsteel.example".to_string())),
        address: Set(None),
        map_url: Set(None),
        categories: Set(StringList(vec!["steel".to_string(), "material".to_string()])),
        is_active: Set(true),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    };

    if let Err(e) = vendor.insert(db).await {
        eprintln!("Failed to insert sample vendor: {e}");
    } else {
        println!("  Created sample vendor: Siam Steel Supply");
    }
}
