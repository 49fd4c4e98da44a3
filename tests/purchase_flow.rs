use axum_storefront::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
    dto::auth::RegisterRequest,
    dto::catalog::CreateCatalogItemRequest,
    entity::{AuditLogs, CartEntries, CatalogItems, users::ActiveModel as UserActive},
    error::AppError,
    gateway::PaymentGateway,
    middleware::auth::AuthUser,
    pricing,
    services::{auth_service, cart_service, catalog_service, checkout_service},
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};

// Integration flow: register -> privileged catalog create -> double cart-add
// -> snapshot isolation -> remove -> finalize (idempotent replay).
#[tokio::test]
async fn register_stock_cart_and_purchase_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    // Safety: test-only env mutation before any token is issued.
    unsafe { std::env::set_var("JWT_SECRET", "integration-secret") };

    let state = setup_state(&database_url).await?;

    // Register a shopper; re-registering the same email is refused and no
    // second record appears.
    let (user, _token) = auth_service::register_user(
        &state,
        RegisterRequest {
            name: "Sample Shopper".into(),
            email: "shopper@example.com".into(),
            password: "hunter2".into(),
        },
    )
    .await?;

    let duplicate = auth_service::register_user(
        &state,
        RegisterRequest {
            name: "Impostor".into(),
            email: "shopper@example.com".into(),
            password: "other".into(),
        },
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::DuplicateIdentity)));

    let user_count = axum_storefront::entity::Users::find().count(&state.orm).await?;
    assert_eq!(user_count, 1);

    // Login round-trips with the same credentials.
    let (logged_in, _token) = auth_service::login_user(
        &state,
        axum_storefront::dto::auth::LoginRequest {
            email: "shopper@example.com".into(),
            password: "hunter2".into(),
        },
    )
    .await?;
    assert_eq!(logged_in.id, user.id);

    // Privileged account, provisioned out-of-band.
    let admin = UserActive {
        id: NotSet,
        name: Set("Storefront Admin".into()),
        email: Set("admin@example.com".into()),
        password_hash: Set("dummy".into()),
        role: Set("admin".into()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    let auth_user = AuthUser {
        user_id: user.id,
        role: user.role.clone(),
    };
    let auth_admin = AuthUser {
        user_id: admin.id,
        role: "admin".into(),
    };

    // Non-privileged creation is Forbidden and creates nothing.
    let refused = catalog_service::create_item(
        &state,
        &auth_user,
        CreateCatalogItemRequest {
            name: "Sneaky".into(),
            price: "$1".into(),
            image_url: "https://images.example.com/sneaky.png".into(),
        },
    )
    .await;
    assert!(matches!(refused, Err(AppError::Forbidden)));
    assert_eq!(CatalogItems::find().count(&state.orm).await?, 0);

    // Fractional prices are rejected at creation time, not at checkout.
    let bad_price = catalog_service::create_item(
        &state,
        &auth_admin,
        CreateCatalogItemRequest {
            name: "Chess".into(),
            price: "$4.99".into(),
            image_url: "https://images.example.com/chess.png".into(),
        },
    )
    .await;
    assert!(matches!(bad_price, Err(AppError::Validation(_))));

    let item = catalog_service::create_item(
        &state,
        &auth_admin,
        CreateCatalogItemRequest {
            name: "Chess".into(),
            price: "$20".into(),
            image_url: "https://images.example.com/chess.png".into(),
        },
    )
    .await?;

    // Adding the same item twice yields two independent entries with
    // identical snapshots.
    let first = cart_service::add_entry(&state, &auth_user, item.id).await?;
    let second = cart_service::add_entry(&state, &auth_user, item.id).await?;
    assert_ne!(first.id, second.id);
    for entry in [&first, &second] {
        assert_eq!(entry.catalog_item_id, item.id);
        assert_eq!(entry.name, "Chess");
        assert_eq!(entry.price, "$20");
        assert_eq!(entry.image_url, item.image_url);
    }

    // Adding a missing item is a structured not-found.
    let missing = cart_service::add_entry(&state, &auth_user, item.id + 999).await;
    assert!(matches!(missing, Err(AppError::NotFound)));

    // A later catalog price change must not leak into existing snapshots.
    sqlx::query("UPDATE catalog_items SET price = '$99' WHERE id = $1")
        .bind(item.id)
        .execute(&state.pool)
        .await?;
    let frozen = cart_service::get_entry(&state, first.id).await?;
    assert_eq!(frozen.price, "$20");
    assert_eq!(pricing::minor_units(&frozen.price)?, 2000);

    // Explicit removal; repeating it is a structured not-found.
    cart_service::remove_entry(&state, &auth_user, second.id).await?;
    let again = cart_service::remove_entry(&state, &auth_user, second.id).await;
    assert!(matches!(again, Err(AppError::NotFound)));

    // Checkout against a vanished entry is a terminal not-found; the
    // lookup fails before the gateway is ever dialed.
    let gone = checkout_service::initiate_checkout(&state, second.id).await;
    assert!(matches!(gone, Err(AppError::NotFound)));

    // Finalize consumes exactly the one entry and leaves the catalog alone.
    let confirmed = checkout_service::finalize_success(&state, &auth_user, first.id)
        .await?
        .expect("first finalize returns the snapshot");
    assert_eq!(confirmed.name, "Chess");
    assert_eq!(CartEntries::find().count(&state.orm).await?, 0);
    assert!(
        CatalogItems::find_by_id(item.id)
            .one(&state.orm)
            .await?
            .is_some()
    );

    // Replayed success redirect is a no-op, not an error.
    let replay = checkout_service::finalize_success(&state, &auth_user, first.id).await?;
    assert!(replay.is_none());

    // The flow left an audit trail behind.
    assert!(AuditLogs::find().count(&state.orm).await? > 0);

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    sqlx::query(
        "TRUNCATE TABLE cart_entries, audit_logs, catalog_items, users RESTART IDENTITY CASCADE",
    )
    .execute(&pool)
    .await?;

    let config = AppConfig {
        database_url: database_url.to_string(),
        host: "127.0.0.1".into(),
        port: 3000,
        public_base_url: "http://127.0.0.1:3000".into(),
        payment_api_key: "sk_test_unused".into(),
        // Never dialed by these tests; checkout initiation is covered by
        // the gateway unit tests instead.
        payment_api_base: "http://127.0.0.1:9".into(),
        payment_timeout_secs: 1,
        cart_scope_to_user: false,
    };
    let gateway = PaymentGateway::new(&config)?;

    Ok(AppState {
        pool,
        orm,
        gateway,
        config,
    })
}
