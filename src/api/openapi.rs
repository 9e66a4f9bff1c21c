//! OpenAPI document assembled from the handler annotations.

use utoipa::OpenApi;

use crate::api::dto::{
    ColorFailureDto, ColorRoleDto, CreatePaletteRequest, CreatePaletteResponse,
    DeletePaletteResponse, HealthResponse, HistoryResponse, PaletteEntryDto, PaletteListResponse,
    SplashEventDto, SplashRequest, SplashResponse,
};
use crate::api::handlers::{palette, splash, system};
use crate::domain::PaletteColor;
use crate::error::{ErrorBody, ErrorResponse};

/// Path under which the JSON document is served.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// OpenAPI description of the command surface.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "holi-bot",
        description = "Holi color-role palette and splash ledger for chat-platform guilds."
    ),
    paths(
        palette::create_palette,
        palette::delete_palette,
        palette::list_palette,
        palette::resolve_color,
        splash::splash,
        splash::splash_history,
        system::health_handler,
        system::palette_handler,
    ),
    components(schemas(
        PaletteColor,
        CreatePaletteRequest,
        CreatePaletteResponse,
        DeletePaletteResponse,
        PaletteListResponse,
        ColorRoleDto,
        ColorFailureDto,
        SplashRequest,
        SplashResponse,
        SplashEventDto,
        HistoryResponse,
        PaletteEntryDto,
        HealthResponse,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "Palette", description = "Create, delete, and list a guild's color roles"),
        (name = "Splash", description = "Splash members and read the splash ledger"),
        (name = "System", description = "Health and static configuration"),
    )
)]
pub struct ApiDoc;
