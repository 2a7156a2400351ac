use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use salesdesk_core::cache::RecordCache;
use salesdesk_core::db::DbPool;
use salesdesk_core::deals::deals_repository::SqliteDealRepository;
use salesdesk_core::deals::deals_service::DealService;
use salesdesk_core::targets::targets_repository::SqliteTargetRepository;
use salesdesk_core::targets::targets_service::TargetService;
use salesdesk_core::users::users_model::User;
use salesdesk_core::users::users_repository::SqliteUserRepository;
use salesdesk_core::users::users_service::UserService;

use crate::api;

const USER_CACHE_TTL: Duration = Duration::from_secs(300);
const USER_CACHE_CAPACITY: u64 = 10_000;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct AppState {
    pub deal_service: Arc<DealService<SqliteDealRepository>>,
    pub target_service: Arc<TargetService<SqliteTargetRepository>>,
    pub user_service: Arc<UserService<SqliteUserRepository>>,
    pub user_repository: Arc<SqliteUserRepository>,
    pub user_cache: RecordCache<User>,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        let deal_repository = Arc::new(SqliteDealRepository::new(pool.clone()));
        let target_repository = Arc::new(SqliteTargetRepository::new(pool.clone()));
        let user_repository = Arc::new(SqliteUserRepository::new(pool));

        AppState {
            deal_service: Arc::new(DealService::new(deal_repository)),
            target_service: Arc::new(TargetService::new(target_repository)),
            user_service: Arc::new(UserService::new(Arc::clone(&user_repository))),
            user_repository,
            user_cache: RecordCache::new(USER_CACHE_TTL, USER_CACHE_CAPACITY),
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(api::deals::router())
        .merge(api::targets::router())
        .merge(api::users::router())
        .merge(api::performance::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
        )
        .with_state(state)
}
