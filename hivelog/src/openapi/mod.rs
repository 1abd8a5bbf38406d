//! OpenAPI documentation for the hivelog API.
//!
//! [`ApiDoc`] collects every handler's `#[utoipa::path]` annotation and the request/response
//! schemas. It is served as JSON at `/api-docs/openapi.json` and rendered by Scalar at `/docs`.

use utoipa::OpenApi;

use crate::api::{handlers, models};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "hivelog",
        description = "Record keeping for apiaries, hives, hive inspections and follow-up hive actions."
    ),
    paths(
        handlers::apiaries::list_apiaries,
        handlers::apiaries::create_apiary,
        handlers::apiaries::update_apiary,
        handlers::apiaries::delete_apiary,
        handlers::hives::list_hives,
        handlers::hives::create_hive,
        handlers::hives::update_hive,
        handlers::hives::delete_hive,
        handlers::inspections::list_inspections,
        handlers::inspections::get_inspection,
        handlers::inspections::create_inspection,
        handlers::hive_actions::list_hive_actions,
        handlers::hive_actions::create_hive_action,
        handlers::hive_actions::update_hive_action,
        handlers::stats::hive_distribution,
    ),
    components(
        schemas(
            models::MessageResponse,
            models::apiaries::ApiaryCreate,
            models::apiaries::ApiaryUpdate,
            models::apiaries::ApiaryResponse,
            models::hives::HiveCreate,
            models::hives::HiveUpdate,
            models::hives::HiveResponse,
            models::inspections::InspectionCreate,
            models::inspections::InspectionAction,
            models::inspections::QueenStatus,
            models::inspections::BroodPresence,
            models::inspections::ColonyStrength,
            models::inspections::InspectionResponse,
            models::inspections::InspectionDetailsResponse,
            models::inspections::QueenStatusResponse,
            models::inspections::BroodPresenceResponse,
            models::inspections::ColonyStrengthResponse,
            models::hive_actions::HiveActionCreate,
            models::hive_actions::HiveActionUpdate,
            models::hive_actions::HiveActionResponse,
            models::stats::HiveDistributionResponse,
            models::stats::ApiaryHiveCountResponse,
        )
    ),
    tags(
        (name = "apiaries", description = "Bee yards"),
        (name = "hives", description = "Colonies, optionally assigned to an apiary"),
        (name = "inspections", description = "Dated hive observations"),
        (name = "hive_actions", description = "Follow-up tasks raised by inspections"),
        (name = "stats", description = "Dashboard aggregates"),
    )
)]
pub struct ApiDoc;
