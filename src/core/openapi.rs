use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::coupons::{dtos as coupons_dtos, handlers as coupons_handlers};
use crate::features::notifications::{
    dtos as notifications_dtos, handlers as notifications_handlers,
};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::features::sliders::{dtos as sliders_dtos, handlers as sliders_handlers};
use crate::features::uploads::{dtos as uploads_dtos, handlers as uploads_handlers};
use crate::features::vendors::{
    dtos as vendors_dtos, handlers as vendors_handlers, models as vendors_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::get_me,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Sliders
        sliders_handlers::list_sliders,
        sliders_handlers::get_slider,
        sliders_handlers::create_slider,
        sliders_handlers::update_slider,
        sliders_handlers::delete_slider,
        // Coupons
        coupons_handlers::list_coupons,
        coupons_handlers::get_coupon,
        coupons_handlers::create_coupon,
        coupons_handlers::update_coupon,
        coupons_handlers::delete_coupon,
        // Products
        products_handlers::list_products,
        products_handlers::get_product,
        products_handlers::create_product,
        products_handlers::update_product,
        products_handlers::delete_product,
        // Notifications
        notifications_handlers::list_notifications,
        notifications_handlers::create_notification,
        notifications_handlers::delete_notification,
        // Vendors
        vendors_handlers::list_vendors,
        vendors_handlers::product_owner_facet,
        // Uploads
        uploads_handlers::upload_image,
        uploads_handlers::delete_upload,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::Actor,
            auth::model::ActorRole,
            ApiResponse<auth::model::Actor>,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::CategoryResponseDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            // Sliders
            sliders_dtos::CreateSliderDto,
            sliders_dtos::UpdateSliderDto,
            sliders_dtos::SliderResponseDto,
            ApiResponse<Vec<sliders_dtos::SliderResponseDto>>,
            ApiResponse<sliders_dtos::SliderResponseDto>,
            // Coupons
            coupons_dtos::CreateCouponDto,
            coupons_dtos::UpdateCouponDto,
            coupons_dtos::CouponResponseDto,
            ApiResponse<Vec<coupons_dtos::CouponResponseDto>>,
            ApiResponse<coupons_dtos::CouponResponseDto>,
            // Products
            products_dtos::CreateProductDto,
            products_dtos::UpdateProductDto,
            products_dtos::ProductResponseDto,
            ApiResponse<Vec<products_dtos::ProductResponseDto>>,
            ApiResponse<products_dtos::ProductResponseDto>,
            // Notifications
            notifications_dtos::CreateNotificationDto,
            notifications_dtos::NotificationResponseDto,
            ApiResponse<Vec<notifications_dtos::NotificationResponseDto>>,
            ApiResponse<notifications_dtos::NotificationResponseDto>,
            // Vendors
            vendors_models::Vendor,
            vendors_models::VendorStatus,
            vendors_dtos::OwnerFacetDto,
            ApiResponse<Vec<vendors_models::Vendor>>,
            ApiResponse<Vec<vendors_dtos::OwnerFacetDto>>,
            // Uploads
            uploads_dtos::UploadImageForm,
            uploads_dtos::DeleteUploadByUrlDto,
            uploads_dtos::UploadResponseDto,
            ApiResponse<uploads_dtos::UploadResponseDto>,
        )
    ),
    tags(
        (name = "auth", description = "Token introspection"),
        (name = "categories", description = "Hierarchical menu categories (up to three levels)"),
        (name = "sliders", description = "Promotional slider banners"),
        (name = "coupons", description = "Discount coupons with activity windows"),
        (name = "products", description = "Menu products with promotional offers"),
        (name = "vendors", description = "Vendor directory and owner facets"),
        (name = "notifications", description = "Marketplace announcements"),
        (name = "uploads", description = "Image blob uploads"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Platera Admin API",
        version = "0.1.0",
        description = "Role-scoped administration API for the Platera restaurant marketplace",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
