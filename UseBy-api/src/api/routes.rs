use std::sync::Arc;

use axum::{
    extract::FromRef,
    routing::{get, post},
    Extension, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::debug;

use use_by_domain::health::HealthService as BackendHealthService;
use use_by_domain::repository::ReminderBackend;
use use_by_domain::services::{MedicineScheduleService, SimulatedScanner};

use crate::api::handlers::{
    drafts, health,
    health::HealthService,
    products::{self, ProductScanner},
    schedules::{self, ScheduleService},
};
use crate::config::AppConfig;
use crate::openapi::configure_swagger_routes;

/// Services shared by the API handlers
#[derive(Clone, FromRef)]
pub struct AppState {
    pub schedules: ScheduleService,
    pub scanner: ProductScanner,
}

/// Create the application router over a fresh in-memory reminder backend
pub fn create_app(config: &AppConfig) -> Router {
    debug!("Creating application router");

    // The schedule service and the health probe must see the same backend
    let backend = ReminderBackend::new();
    let state = AppState {
        schedules: Arc::new(MedicineScheduleService::new(backend.clone())),
        scanner: Arc::new(SimulatedScanner::new(config.scan_delay)),
    };
    let health_service: HealthService = Arc::new(BackendHealthService::new(backend));

    create_app_with_state(state, health_service, config)
}

/// Create the application router around the given services
pub fn create_app_with_state(state: AppState, health_service: HealthService, config: &AppConfig) -> Router {
    let draft_routes: Router<AppState> = Router::new()
        .route("/drafts", post(drafts::create_draft))
        .route("/drafts/reminder-times", post(drafts::add_reminder_time))
        .route("/drafts/reminder-times/update", post(drafts::update_reminder_time))
        .route("/drafts/reminder-times/remove", post(drafts::remove_reminder_time))
        .route("/drafts/weekdays/toggle", post(drafts::toggle_weekday))
        .route("/drafts/recurrence", post(drafts::set_recurrence))
        .route("/drafts/validate", post(drafts::validate_draft));

    let schedule_routes: Router<AppState> = Router::new()
        .route(
            "/schedules",
            get(schedules::list_schedules).post(schedules::submit_schedule),
        )
        .route("/schedules/:id", get(schedules::get_schedule))
        .route("/schedules/:id/revise", post(schedules::revise_schedule))
        .route("/schedules/:id/occurrences", get(schedules::schedule_occurrences))
        .route("/schedules/:id/next", get(schedules::next_occurrence));

    let product_routes: Router<AppState> = Router::new()
        .route("/products/categories", get(products::list_categories))
        .route("/products/scan", post(products::scan_product));

    debug!("API routes configured");

    let api_routes: Router = Router::new()
        .merge(draft_routes)
        .merge(schedule_routes)
        .merge(product_routes)
        .with_state(state);

    let public_routes: Router = Router::new()
        .route("/health", get(health::health_check))
        .layer(Extension(health_service))
        .layer(Extension(Arc::new(config.clone())));

    let app = Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .merge(configure_swagger_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    debug!("Swagger UI merged");

    health::initialize_server_start_time();
    app
}
