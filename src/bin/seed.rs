use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum_storefront::{config::AppConfig, db::create_pool};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let admin_id = ensure_user(
        &pool,
        "Storefront Admin",
        "admin@example.com",
        "admin123",
        "admin",
    )
    .await?;
    let user_id = ensure_user(
        &pool,
        "Sample Shopper",
        "user@example.com",
        "user123",
        "user",
    )
    .await?;
    seed_catalog(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<i64> {
    let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO users (name, email, password_hash, role) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

async fn seed_catalog(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let items = [
        ("Chess", "$20", "https://images.example.com/chess.png"),
        ("Backgammon", "$35", "https://images.example.com/backgammon.png"),
        ("Go", "$25", "https://images.example.com/go.png"),
    ];

    for (name, price, image_url) in items {
        let existing: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM catalog_items WHERE name = $1")
                .bind(name)
                .fetch_optional(pool)
                .await?;
        if existing.is_some() {
            continue;
        }
        sqlx::query("INSERT INTO catalog_items (name, price, image_url) VALUES ($1, $2, $3)")
            .bind(name)
            .bind(price)
            .bind(image_url)
            .execute(pool)
            .await?;
    }

    Ok(())
}
