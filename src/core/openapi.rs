use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::catalog::{dtos as catalog_dtos, handlers as catalog_handlers};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::enquiries::{
    dtos as enquiries_dtos, handlers as enquiries_handlers, models as enquiries_models,
};
use crate::features::pages::{dtos as pages_dtos, handlers as pages_handlers, models as pages_models};
use crate::features::projects::{dtos as projects_dtos, handlers as projects_handlers};
use crate::features::sitemap::handler as sitemap_handler;
use crate::features::templates::{dtos as templates_dtos, handlers as templates_handlers};
use crate::shared::types::{ApiResponse, Meta, SortDirection};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::get_current_user,
        // Catalog (public)
        catalog_handlers::list_categories,
        catalog_handlers::get_category,
        catalog_handlers::list_services,
        catalog_handlers::get_service,
        catalog_handlers::list_features,
        catalog_handlers::get_feature,
        // Catalog (admin)
        catalog_handlers::admin_list_categories,
        catalog_handlers::create_category,
        catalog_handlers::update_category,
        catalog_handlers::delete_category,
        catalog_handlers::admin_list_services,
        catalog_handlers::create_service,
        catalog_handlers::update_service,
        catalog_handlers::delete_service,
        catalog_handlers::admin_list_features,
        catalog_handlers::create_feature,
        catalog_handlers::update_feature,
        catalog_handlers::delete_feature,
        // Pages
        pages_handlers::get_published_page,
        pages_handlers::list_pages,
        pages_handlers::get_page,
        pages_handlers::create_page,
        pages_handlers::update_page,
        pages_handlers::update_page_status,
        pages_handlers::delete_page,
        pages_handlers::bulk_pages,
        // Templates
        templates_handlers::list_templates,
        templates_handlers::get_template,
        templates_handlers::create_template,
        templates_handlers::update_template,
        templates_handlers::delete_template,
        // Projects
        projects_handlers::list_projects,
        projects_handlers::get_project,
        projects_handlers::admin_list_projects,
        projects_handlers::create_project,
        projects_handlers::update_project,
        projects_handlers::delete_project,
        // Enquiries
        enquiries_handlers::submit_enquiry,
        enquiries_handlers::list_enquiries,
        enquiries_handlers::update_enquiry,
        // Dashboard
        dashboard_handlers::get_stats,
        // Sitemap
        sitemap_handler::get_sitemap,
    ),
    components(
        schemas(
            // Shared
            Meta,
            SortDirection,
            // Auth
            auth::model::AuthenticatedUser,
            ApiResponse<auth::model::AuthenticatedUser>,
            // Catalog
            catalog_dtos::CreateServiceCategoryDto,
            catalog_dtos::UpdateServiceCategoryDto,
            catalog_dtos::ServiceCategoryResponseDto,
            catalog_dtos::CreateServiceDto,
            catalog_dtos::UpdateServiceDto,
            catalog_dtos::ServiceResponseDto,
            catalog_dtos::CreateFeatureDto,
            catalog_dtos::UpdateFeatureDto,
            catalog_dtos::FeatureResponseDto,
            ApiResponse<catalog_dtos::ServiceCategoryResponseDto>,
            ApiResponse<Vec<catalog_dtos::ServiceCategoryResponseDto>>,
            ApiResponse<catalog_dtos::ServiceResponseDto>,
            ApiResponse<Vec<catalog_dtos::ServiceResponseDto>>,
            ApiResponse<catalog_dtos::FeatureResponseDto>,
            ApiResponse<Vec<catalog_dtos::FeatureResponseDto>>,
            // Pages
            pages_models::PageStatus,
            pages_dtos::CreatePageDto,
            pages_dtos::UpdatePageDto,
            pages_dtos::UpdatePageStatusDto,
            pages_dtos::PageSortField,
            pages_dtos::PageResponseDto,
            pages_dtos::BulkPageAction,
            pages_dtos::BulkPageActionDto,
            pages_dtos::BulkPageResultDto,
            ApiResponse<pages_dtos::PageResponseDto>,
            ApiResponse<Vec<pages_dtos::PageResponseDto>>,
            ApiResponse<pages_dtos::BulkPageResultDto>,
            // Templates
            templates_dtos::CreateTemplateDto,
            templates_dtos::UpdateTemplateDto,
            templates_dtos::TemplateResponseDto,
            ApiResponse<templates_dtos::TemplateResponseDto>,
            ApiResponse<Vec<templates_dtos::TemplateResponseDto>>,
            // Projects
            projects_dtos::CreateProjectDto,
            projects_dtos::UpdateProjectDto,
            projects_dtos::ProjectResponseDto,
            ApiResponse<projects_dtos::ProjectResponseDto>,
            ApiResponse<Vec<projects_dtos::ProjectResponseDto>>,
            // Enquiries
            enquiries_models::EnquiryStatus,
            enquiries_dtos::CreateEnquiryDto,
            enquiries_dtos::EnquiryReceiptDto,
            enquiries_dtos::UpdateEnquiryDto,
            enquiries_dtos::EnquiryResponseDto,
            ApiResponse<enquiries_dtos::EnquiryReceiptDto>,
            ApiResponse<enquiries_dtos::EnquiryResponseDto>,
            ApiResponse<Vec<enquiries_dtos::EnquiryResponseDto>>,
            // Dashboard
            dashboard_dtos::DashboardStatsDto,
            ApiResponse<dashboard_dtos::DashboardStatsDto>,
        )
    ),
    tags(
        (name = "auth", description = "Authenticated user"),
        (name = "catalog", description = "Service categories, services and features (public)"),
        (name = "catalog-admin", description = "Catalog management (editor, admin for deletes)"),
        (name = "pages", description = "CMS pages with structured content and SEO metadata"),
        (name = "templates", description = "Reusable page content templates"),
        (name = "projects", description = "Portfolio projects"),
        (name = "enquiries", description = "Contact form submissions"),
        (name = "dashboard", description = "Admin dashboard statistics"),
        (name = "sitemap", description = "XML sitemap"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "IeNet API",
        version = "0.1.0",
        description = "Content and marketing-site API for IeNet",
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_content_endpoints() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/pages",
            "/api/pages/{id}/status",
            "/api/services/{category_slug}/{service_slug}",
            "/api/admin/service-categories",
            "/sitemap.xml",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn swagger_info_is_overridden_from_config() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "IeNet staging".into(),
            version: "2.0.0".into(),
            description: "staging".into(),
        }
        .modify(&mut doc);
        assert_eq!(doc.info.title, "IeNet staging");
        assert_eq!(doc.info.version, "2.0.0");
    }
}
