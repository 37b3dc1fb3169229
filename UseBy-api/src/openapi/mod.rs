use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Draft endpoints
        crate::api::handlers::drafts::create_draft,
        crate::api::handlers::drafts::add_reminder_time,
        crate::api::handlers::drafts::update_reminder_time,
        crate::api::handlers::drafts::remove_reminder_time,
        crate::api::handlers::drafts::toggle_weekday,
        crate::api::handlers::drafts::set_recurrence,
        crate::api::handlers::drafts::validate_draft,

        // Schedule endpoints
        crate::api::handlers::schedules::submit_schedule,
        crate::api::handlers::schedules::list_schedules,
        crate::api::handlers::schedules::get_schedule,
        crate::api::handlers::schedules::revise_schedule,
        crate::api::handlers::schedules::schedule_occurrences,
        crate::api::handlers::schedules::next_occurrence,

        // Product endpoints
        crate::api::handlers::products::list_categories,
        crate::api::handlers::products::scan_product
    ),
    components(
        schemas(
            // Domain value objects
            use_by_domain::entities::Schedule,
            use_by_domain::entities::ReminderTime,
            use_by_domain::entities::Weekday,
            use_by_domain::entities::IntakeRelation,
            use_by_domain::entities::RecurrenceMode,
            use_by_domain::entities::ScannedProduct,
            use_by_domain::entities::PriceQuote,
            use_by_domain::entities::ProductCategory,

            // Entities
            crate::entities::common::ErrorResponse,
            crate::entities::common::ValidationErrorDetail,
            crate::entities::drafts::AddReminderTimeRequest,
            crate::entities::drafts::UpdateReminderTimeRequest,
            crate::entities::drafts::RemoveReminderTimeRequest,
            crate::entities::drafts::ToggleWeekdayRequest,
            crate::entities::drafts::SetRecurrenceRequest,
            crate::entities::drafts::ValidationReport,
            crate::entities::schedules::CommittedScheduleResponse,
            crate::entities::schedules::OccurrencesResponse,
            crate::entities::schedules::NextOccurrenceResponse,
            crate::entities::products::CategoryResponse,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentHealthStatus
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "drafts", description = "Editing medicine schedule drafts"),
        (name = "schedules", description = "Committed medicine schedules"),
        (name = "products", description = "Product categories and barcode scanning")
    ),
    info(
        title = "UseBy API",
        version = "0.1.0",
        description = "API for medicine reminder schedules and product expiry tracking",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_doc_generation() {
        let openapi = ApiDoc::openapi();

        assert_eq!(openapi.info.title, "UseBy API");
        assert_eq!(openapi.info.version, "0.1.0");

        let tags = openapi.tags.as_ref().unwrap();
        for name in ["health", "drafts", "schedules", "products"] {
            assert!(tags.iter().any(|tag| tag.name == name), "missing tag {}", name);
        }

        for path in [
            "/health",
            "/api/v1/drafts",
            "/api/v1/drafts/reminder-times/remove",
            "/api/v1/drafts/validate",
            "/api/v1/schedules",
            "/api/v1/schedules/{id}",
            "/api/v1/schedules/{id}/occurrences",
            "/api/v1/schedules/{id}/next",
            "/api/v1/products/scan",
        ] {
            assert!(openapi.paths.paths.contains_key(path), "missing path {}", path);
        }
    }

    #[test]
    fn test_value_objects_are_documented_as_strings_and_ordinals() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schemas = &json["components"]["schemas"];
        assert_eq!(schemas["ReminderTime"]["type"], "string");
        assert_eq!(schemas["Weekday"]["type"], "integer");
    }
}
