//! Database seeder for Talentscan development and testing.
//!
//! Seeds a student account (`S123`), a handful of companies, and scan/save
//! activity so the profile and history endpoints have something to return.
//! Prints a session cookie for the seeded student.
//!
//! Usage: cargo run --bin seeder

use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use talentscan_db::entities::{
    companies, saved_students, scans, sea_orm_active_enums::UserRole, students, users,
};
use talentscan_shared::{AppConfig, JwtConfig, JwtService, Role};
use uuid::Uuid;

/// Seeded student user ID (consistent for all seeds)
const STUDENT_USER_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0001);
/// Seeded student code
const STUDENT_CODE: &str = "S123";

const COMPANIES: [(u128, &str); 4] = [
    (0x0000_0000_0000_0000_0000_0000_0000_0101, "Acme Robotics"),
    (0x0000_0000_0000_0000_0000_0000_0000_0102, "Nimbus Cloud"),
    (0x0000_0000_0000_0000_0000_0000_0000_0103, "Ferrous Systems"),
    (0x0000_0000_0000_0000_0000_0000_0000_0104, "Blue Harbor Bank"),
];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().expect("Failed to load configuration");

    println!("Connecting to database...");
    let db = talentscan_db::connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding student...");
    seed_student(&db).await;

    println!("Seeding companies...");
    seed_companies(&db).await;

    println!("Seeding activity...");
    seed_activity(&db).await;

    let jwt = JwtService::new(JwtConfig {
        secret: config.session.secret.clone(),
        ..JwtConfig::default()
    });
    match jwt.generate_session_token(STUDENT_USER_ID, Role::Student, Some(STUDENT_CODE)) {
        Ok(token) => println!("Session cookie: {}={token}", config.session.cookie_name),
        Err(e) => eprintln!("Failed to mint session token: {e}"),
    }

    println!("Seeding complete!");
}

/// Seeds the student user and profile.
async fn seed_student(db: &DatabaseConnection) {
    if students::Entity::find_by_id(STUDENT_CODE.to_string())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Student {STUDENT_CODE} already exists, skipping...");
        return;
    }

    let now = Utc::now();
    let user = users::ActiveModel {
        id: Set(STUDENT_USER_ID),
        email: Set("ana.silva@students.talentscan.dev".to_string()),
        role: Set(UserRole::Student),
        created_at: Set(now.into()),
    };
    if let Err(e) = user.insert(db).await {
        eprintln!("Failed to insert student user: {e}");
        return;
    }

    let student = students::ActiveModel {
        code: Set(STUDENT_CODE.to_string()),
        user_id: Set(Some(STUDENT_USER_ID)),
        name: Set("Ana Silva".to_string()),
        year: Set(3),
        image: Set(None),
        cv: Set(None),
        bio: Set(Some("Third-year CS student into distributed systems.".to_string())),
        linkedin: Set(Some("https://www.linkedin.com/in/ana-silva".to_string())),
        github: Set(Some("https://github.com/anasilva".to_string())),
        interests: Set(serde_json::json!(["backend", "databases"])),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };

    if let Err(e) = student.insert(db).await {
        eprintln!("Failed to insert student: {e}");
    } else {
        println!("  Created student: {STUDENT_CODE}");
    }
}

/// Seeds the companies attending the fair.
async fn seed_companies(db: &DatabaseConnection) {
    for (id, name) in COMPANIES {
        let id = Uuid::from_u128(id);
        if companies::Entity::find_by_id(id)
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            continue;
        }

        let company = companies::ActiveModel {
            id: Set(id),
            user_id: Set(None),
            name: Set(name.to_string()),
            created_at: Set(Utc::now().into()),
        };
        if let Err(e) = company.insert(db).await {
            eprintln!("Failed to insert company {name}: {e}");
        } else {
            println!("  Created company: {name}");
        }
    }
}

/// Seeds scans by the first three companies and saves by two of them.
async fn seed_activity(db: &DatabaseConnection) {
    let now = Utc::now();

    for (i, (id, _)) in COMPANIES.iter().take(3).enumerate() {
        let hours = i64::try_from(i).unwrap_or_default();
        let scan = scans::ActiveModel {
            id: Set(Uuid::now_v7()),
            student_code: Set(STUDENT_CODE.to_string()),
            company_id: Set(Uuid::from_u128(*id)),
            scanned_at: Set((now - Duration::hours(hours + 1)).into()),
        };
        if let Err(e) = scan.insert(db).await {
            eprintln!("Failed to insert scan: {e}");
        }
    }

    for (i, (id, name)) in COMPANIES.iter().take(2).enumerate() {
        let minutes = i64::try_from(i).unwrap_or_default() * 30;
        let save = saved_students::ActiveModel {
            id: Set(Uuid::now_v7()),
            student_code: Set(STUDENT_CODE.to_string()),
            company_id: Set(Uuid::from_u128(*id)),
            saved_at: Set((now - Duration::minutes(minutes)).into()),
        };
        if let Err(e) = save.insert(db).await {
            eprintln!("Failed to insert save by {name}: {e}");
        } else {
            println!("  {name} saved {STUDENT_CODE}");
        }
    }
}
