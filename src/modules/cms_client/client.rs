use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use validator::Validate;

use super::cache::QueryCache;
use super::error::ClientError;
use crate::core::error::validation_messages;
use crate::features::catalog::dtos::{
    CreateFeatureDto, CreateServiceCategoryDto, CreateServiceDto, FeatureResponseDto,
    ListFeaturesQuery, ListServicesQuery, ServiceCategoryResponseDto, ServiceResponseDto,
    UpdateFeatureDto, UpdateServiceCategoryDto, UpdateServiceDto,
};
use crate::features::dashboard::dtos::DashboardStatsDto;
use crate::features::enquiries::dtos::{CreateEnquiryDto, EnquiryReceiptDto};
use crate::features::pages::dtos::{
    BulkPageActionDto, BulkPageResultDto, CreatePageDto, PageQueryParams, PageResponseDto,
    UpdatePageDto, UpdatePageStatusDto,
};
use crate::features::pages::models::PageStatus;
use crate::features::projects::dtos::{ListProjectsQuery, ProjectResponseDto};
use crate::features::templates::dtos::{TemplateQuery, TemplateResponseDto};
use crate::modules::page_editor::{PageDraft, PageSink};
use crate::shared::constants::DEFAULT_LOGIN_PATH;
use crate::shared::types::ApiResponse;

const PAGES: &str = "/api/pages";
const TEMPLATES: &str = "/api/templates";
const PROJECTS: &str = "/api/projects";
const CONTACT: &str = "/api/contact";
const DASHBOARD_STATS: &str = "/api/dashboard/stats";
const ADMIN_CATEGORIES: &str = "/api/admin/service-categories";
const ADMIN_SERVICES: &str = "/api/admin/services";
const ADMIN_FEATURES: &str = "/api/admin/features";

/// Every path whose responses embed catalog data. Slugs of categories and
/// services appear in nested lookups, so any catalog write drops all of them.
const CATALOG_PATHS: &[&str] = &[
    "/api/service-categories",
    "/api/services",
    "/api/features",
    ADMIN_CATEGORIES,
    ADMIN_SERVICES,
    ADMIN_FEATURES,
    DASHBOARD_STATS,
];

/// Paths whose responses reflect page rows; the dashboard counts them by status
const PAGE_PATHS: &[&str] = &[PAGES, DASHBOARD_STATS];

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

/// Typed HTTP client for the content API, used by admin tooling and the
/// page editor.
///
/// Reads go through a [`QueryCache`]; writes validate locally, send, then
/// invalidate the cached paths of the resource they touched.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    login_path: String,
    cache: QueryCache,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            cache: QueryCache::new(DEFAULT_CACHE_TTL),
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_login_path(mut self, login_path: impl Into<String>) -> Self {
        self.login_path = login_path.into();
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = QueryCache::new(ttl);
        self
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    // ---------------------------------------------------------------------
    // Pages
    // ---------------------------------------------------------------------

    pub async fn list_pages(
        &self,
        params: &PageQueryParams,
    ) -> Result<Vec<PageResponseDto>, ClientError> {
        self.get_cached(PAGES, &query_pairs(params)).await
    }

    pub async fn get_page(&self, id: i64) -> Result<PageResponseDto, ClientError> {
        self.get_cached(&format!("{PAGES}/{id}"), &[]).await
    }

    pub async fn create_page(&self, dto: &CreatePageDto) -> Result<PageResponseDto, ClientError> {
        check(dto)?;
        let page = self.send_json(Method::POST, PAGES, dto).await?;
        self.invalidate_pages().await;
        Ok(page)
    }

    pub async fn update_page(
        &self,
        id: i64,
        dto: &UpdatePageDto,
    ) -> Result<PageResponseDto, ClientError> {
        check(dto)?;
        let page = self
            .send_json(Method::PUT, &format!("{PAGES}/{id}"), dto)
            .await?;
        self.invalidate_pages().await;
        Ok(page)
    }

    pub async fn update_page_status(
        &self,
        id: i64,
        status: PageStatus,
    ) -> Result<PageResponseDto, ClientError> {
        let page = self
            .send_json(
                Method::PATCH,
                &format!("{PAGES}/{id}/status"),
                &UpdatePageStatusDto { status },
            )
            .await?;
        self.invalidate_pages().await;
        Ok(page)
    }

    pub async fn delete_page(&self, id: i64) -> Result<(), ClientError> {
        self.send_empty(Method::DELETE, &format!("{PAGES}/{id}")).await?;
        self.invalidate_pages().await;
        Ok(())
    }

    pub async fn bulk_pages(
        &self,
        dto: &BulkPageActionDto,
    ) -> Result<BulkPageResultDto, ClientError> {
        check(dto)?;
        let result = self
            .send_json(Method::POST, &format!("{PAGES}/bulk"), dto)
            .await?;
        self.invalidate_pages().await;
        Ok(result)
    }

    // ---------------------------------------------------------------------
    // Catalog
    // ---------------------------------------------------------------------

    pub async fn list_service_categories(
        &self,
    ) -> Result<Vec<ServiceCategoryResponseDto>, ClientError> {
        self.get_cached(ADMIN_CATEGORIES, &[]).await
    }

    pub async fn create_service_category(
        &self,
        dto: &CreateServiceCategoryDto,
    ) -> Result<ServiceCategoryResponseDto, ClientError> {
        check(dto)?;
        let category = self.send_json(Method::POST, ADMIN_CATEGORIES, dto).await?;
        self.invalidate_catalog().await;
        Ok(category)
    }

    pub async fn update_service_category(
        &self,
        id: i64,
        dto: &UpdateServiceCategoryDto,
    ) -> Result<ServiceCategoryResponseDto, ClientError> {
        check(dto)?;
        let category = self
            .send_json(Method::PUT, &format!("{ADMIN_CATEGORIES}/{id}"), dto)
            .await?;
        self.invalidate_catalog().await;
        Ok(category)
    }

    pub async fn delete_service_category(&self, id: i64) -> Result<(), ClientError> {
        self.send_empty(Method::DELETE, &format!("{ADMIN_CATEGORIES}/{id}"))
            .await?;
        self.invalidate_catalog().await;
        Ok(())
    }

    /// Public services list, filtered by category id or slug
    pub async fn list_services(
        &self,
        query: &ListServicesQuery,
    ) -> Result<Vec<ServiceResponseDto>, ClientError> {
        self.get_cached("/api/services", &query_pairs(query)).await
    }

    pub async fn list_all_services(&self) -> Result<Vec<ServiceResponseDto>, ClientError> {
        self.get_cached(ADMIN_SERVICES, &[]).await
    }

    pub async fn create_service(
        &self,
        dto: &CreateServiceDto,
    ) -> Result<ServiceResponseDto, ClientError> {
        check(dto)?;
        let service = self.send_json(Method::POST, ADMIN_SERVICES, dto).await?;
        self.invalidate_catalog().await;
        Ok(service)
    }

    pub async fn update_service(
        &self,
        id: i64,
        dto: &UpdateServiceDto,
    ) -> Result<ServiceResponseDto, ClientError> {
        check(dto)?;
        let service = self
            .send_json(Method::PUT, &format!("{ADMIN_SERVICES}/{id}"), dto)
            .await?;
        self.invalidate_catalog().await;
        Ok(service)
    }

    pub async fn delete_service(&self, id: i64) -> Result<(), ClientError> {
        self.send_empty(Method::DELETE, &format!("{ADMIN_SERVICES}/{id}"))
            .await?;
        self.invalidate_catalog().await;
        Ok(())
    }

    pub async fn list_features(
        &self,
        query: &ListFeaturesQuery,
    ) -> Result<Vec<FeatureResponseDto>, ClientError> {
        self.get_cached("/api/features", &query_pairs(query)).await
    }

    pub async fn create_feature(
        &self,
        dto: &CreateFeatureDto,
    ) -> Result<FeatureResponseDto, ClientError> {
        check(dto)?;
        let feature = self.send_json(Method::POST, ADMIN_FEATURES, dto).await?;
        self.invalidate_catalog().await;
        Ok(feature)
    }

    pub async fn update_feature(
        &self,
        id: i64,
        dto: &UpdateFeatureDto,
    ) -> Result<FeatureResponseDto, ClientError> {
        check(dto)?;
        let feature = self
            .send_json(Method::PUT, &format!("{ADMIN_FEATURES}/{id}"), dto)
            .await?;
        self.invalidate_catalog().await;
        Ok(feature)
    }

    pub async fn delete_feature(&self, id: i64) -> Result<(), ClientError> {
        self.send_empty(Method::DELETE, &format!("{ADMIN_FEATURES}/{id}"))
            .await?;
        self.invalidate_catalog().await;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Templates, projects, enquiries, dashboard
    // ---------------------------------------------------------------------

    pub async fn list_templates(
        &self,
        query: &TemplateQuery,
    ) -> Result<Vec<TemplateResponseDto>, ClientError> {
        self.get_cached(TEMPLATES, &query_pairs(query)).await
    }

    pub async fn list_projects(
        &self,
        query: &ListProjectsQuery,
    ) -> Result<Vec<ProjectResponseDto>, ClientError> {
        self.get_cached(PROJECTS, &query_pairs(query)).await
    }

    pub async fn submit_enquiry(
        &self,
        dto: &CreateEnquiryDto,
    ) -> Result<EnquiryReceiptDto, ClientError> {
        check(dto)?;
        let receipt = self.send_json(Method::POST, CONTACT, dto).await?;
        self.cache.invalidate_prefix(DASHBOARD_STATS).await;
        Ok(receipt)
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStatsDto, ClientError> {
        self.get_cached(DASHBOARD_STATS, &[]).await
    }

    // ---------------------------------------------------------------------
    // Transport
    // ---------------------------------------------------------------------

    async fn invalidate_pages(&self) {
        for path in PAGE_PATHS {
            self.cache.invalidate_prefix(path).await;
        }
    }

    async fn invalidate_catalog(&self) {
        for path in CATALOG_PATHS {
            self.cache.invalidate_prefix(path).await;
        }
    }

    async fn get_cached<T>(&self, path: &str, query: &[(String, String)]) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Serialize,
    {
        let key = cache_key(path, query);
        if let Some(hit) = self.cache.get::<T>(&key).await {
            tracing::debug!("Cache hit for {}", key);
            return Ok(hit);
        }

        let request = self.request(Method::GET, path).query(query);
        let envelope: ApiResponse<T> = self.execute(&Method::GET, path, request).await?;
        let data = require_data(envelope, path)?;
        self.cache.insert(&key, &data).await;
        Ok(data)
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(method.clone(), path).json(body);
        let envelope: ApiResponse<T> = self.execute(&method, path, request).await?;
        require_data(envelope, path)
    }

    async fn send_empty(&self, method: Method, path: &str) -> Result<(), ClientError> {
        let request = self.request(method.clone(), path);
        let _: ApiResponse<Value> = self.execute(&method, path, request).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: &Method,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<ApiResponse<T>, ClientError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("{} {} failed to send: {}", method, path, e);
            ClientError::Transport(e)
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::debug!("{} {} returned 401, redirecting to {}", method, path, self.login_path);
            return Err(ClientError::Unauthorized {
                login_path: self.login_path.clone(),
            });
        }

        let body = response.bytes().await?;

        if !status.is_success() {
            let envelope = serde_json::from_slice::<ApiResponse<Value>>(&body).ok();
            if status == StatusCode::BAD_REQUEST {
                if let Some(errors) = envelope.as_ref().and_then(|e| e.errors.clone()) {
                    return Err(ClientError::Validation(errors));
                }
            }
            let message = envelope
                .and_then(|e| e.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());
            tracing::error!("{} {} returned {}: {}", method, path, status, message);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|e| {
            tracing::error!("Failed to decode {} {} response: {}", method, path, e);
            ClientError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl PageSink for ApiClient {
    async fn save_page(&self, draft: &PageDraft) -> Result<i64, ClientError> {
        let page = match draft.id {
            Some(id) => self.update_page(id, &draft.to_update_dto()).await?,
            None => self.create_page(&draft.to_create_dto()).await?,
        };
        Ok(page.id)
    }
}

fn check<T: Validate>(dto: &T) -> Result<(), ClientError> {
    dto.validate()
        .map_err(|errors| ClientError::Validation(validation_messages(&errors)))
}

fn require_data<T>(envelope: ApiResponse<T>, path: &str) -> Result<T, ClientError> {
    envelope
        .data
        .ok_or_else(|| ClientError::Decode(format!("{path} returned no data")))
}

/// Flatten a query struct into `(key, value)` pairs, skipping unset fields.
/// Keys come out sorted, which keeps cache keys stable.
fn query_pairs<T: Serialize>(params: &T) -> Vec<(String, String)> {
    let Ok(Value::Object(map)) = serde_json::to_value(params) else {
        return Vec::new();
    };

    map.into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key, s)),
            other => Some((key, other.to_string())),
        })
        .collect()
}

fn cache_key(path: &str, query: &[(String, String)]) -> String {
    if query.is_empty() {
        return path.to_string();
    }
    let encoded: Vec<String> = query
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect();
    format!("{}?{}", path, encoded.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::cms_client::GENERIC_FAILURE;
    use crate::shared::types::Meta;
    use axum::{
        extract::{Path, State},
        http::StatusCode as HttpStatus,
        routing::{get, patch},
        Json, Router,
    };
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct Hits {
        list: AtomicUsize,
        create: AtomicUsize,
    }

    fn page(id: i64, status: PageStatus) -> PageResponseDto {
        PageResponseDto {
            id,
            title: "About Us".to_string(),
            slug: "about-us".to_string(),
            content: None,
            status,
            meta_title: None,
            meta_description: None,
            canonical_url: None,
            og_title: None,
            og_description: None,
            og_image: None,
            author_id: Some("test-sub".to_string()),
            parent_id: None,
            sort_order: 0,
            view_count: 0,
            published_at: (status == PageStatus::Published).then(Utc::now),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn stub_api(hits: Arc<Hits>) -> String {
        let router = Router::new()
            .route(
                "/api/pages",
                get(|State(hits): State<Arc<Hits>>| async move {
                    hits.list.fetch_add(1, Ordering::SeqCst);
                    Json(ApiResponse::collection(vec![page(1, PageStatus::Draft)]))
                })
                .post(|State(hits): State<Arc<Hits>>, Json(dto): Json<CreatePageDto>| async move {
                    hits.create.fetch_add(1, Ordering::SeqCst);
                    let mut created = page(7, dto.status.unwrap_or_default());
                    created.title = dto.title;
                    created.slug = dto.slug;
                    (
                        HttpStatus::CREATED,
                        Json(ApiResponse::success(Some(created), Some("Page created".into()), None)),
                    )
                }),
            )
            .route(
                "/api/pages/{id}/status",
                patch(|Path(id): Path<i64>, Json(dto): Json<UpdatePageStatusDto>| async move {
                    Json(ApiResponse::success(Some(page(id, dto.status)), None, None))
                }),
            )
            .route(
                "/api/dashboard/stats",
                get(|| async {
                    (
                        HttpStatus::INTERNAL_SERVER_ERROR,
                        Json(ApiResponse::<()>::error(Some("Database error occurred".into()), None)),
                    )
                }),
            )
            .route(
                "/api/admin/service-categories",
                get(|| async { HttpStatus::UNAUTHORIZED }).post(|| async {
                    (
                        HttpStatus::BAD_REQUEST,
                        Json(ApiResponse::<()>::error(
                            Some("Validation failed".into()),
                            Some(vec!["Slug already in use".into()]),
                        )),
                    )
                }),
            )
            .with_state(hits);
        serve(router).await
    }

    fn about_us() -> CreatePageDto {
        serde_json::from_value(serde_json::json!({
            "title": "About Us",
            "slug": "about-us",
            "status": "draft"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn empty_title_fails_before_any_request() {
        let hits = Arc::new(Hits::default());
        let client = ApiClient::new(stub_api(hits.clone()).await).unwrap();

        let mut dto = about_us();
        dto.title = String::new();
        let err = client.create_page(&dto).await.unwrap_err();

        match err {
            ClientError::Validation(messages) => {
                assert_eq!(messages, vec!["Title is required".to_string()])
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(hits.create.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn create_returns_draft_page() {
        let hits = Arc::new(Hits::default());
        let client = ApiClient::new(stub_api(hits.clone()).await).unwrap();

        let created = client.create_page(&about_us()).await.unwrap();

        assert_eq!(created.id, 7);
        assert_eq!(created.slug, "about-us");
        assert_eq!(created.status, PageStatus::Draft);
        assert_eq!(hits.create.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn list_is_cached_until_a_mutation() {
        let hits = Arc::new(Hits::default());
        let client = ApiClient::new(stub_api(hits.clone()).await).unwrap();
        let params = PageQueryParams::default();

        client.list_pages(&params).await.unwrap();
        client.list_pages(&params).await.unwrap();
        assert_eq!(hits.list.load(Ordering::SeqCst), 1);

        let published = client
            .update_page_status(1, PageStatus::Published)
            .await
            .unwrap();
        assert_eq!(published.status, PageStatus::Published);
        assert!(published.published_at.is_some());

        client.list_pages(&params).await.unwrap();
        assert_eq!(hits.list.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn page_mutation_drops_cached_dashboard_stats() {
        let hits = Arc::new(Hits::default());
        let client = ApiClient::new(stub_api(hits).await).unwrap();
        client
            .cache()
            .insert(DASHBOARD_STATS, &serde_json::json!({ "draftPages": 1 }))
            .await;

        client
            .update_page_status(1, PageStatus::Published)
            .await
            .unwrap();

        assert!(client.cache().get::<Value>(DASHBOARD_STATS).await.is_none());
    }

    #[tokio::test]
    async fn unauthorized_maps_to_login_redirect() {
        let hits = Arc::new(Hits::default());
        let client = ApiClient::new(stub_api(hits).await)
            .unwrap()
            .with_login_path("/admin/login");

        let err = client.list_service_categories().await.unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(err.login_path(), Some("/admin/login"));
    }

    #[tokio::test]
    async fn server_validation_errors_are_surfaced() {
        let hits = Arc::new(Hits::default());
        let client = ApiClient::new(stub_api(hits).await).unwrap();
        let dto: CreateServiceCategoryDto = serde_json::from_value(serde_json::json!({
            "name": "Web Development",
            "slug": "web-development"
        }))
        .unwrap();

        let err = client.create_service_category(&dto).await.unwrap_err();

        assert!(matches!(err, ClientError::Validation(ref m) if m == &["Slug already in use".to_string()]));
    }

    #[tokio::test]
    async fn server_failures_are_generic() {
        let hits = Arc::new(Hits::default());
        let client = ApiClient::new(stub_api(hits).await).unwrap();

        let err = client.dashboard_stats().await.unwrap_err();

        assert!(matches!(err, ClientError::Api { status: 500, .. }));
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn query_pairs_skip_unset_fields() {
        let params = PageQueryParams {
            search: Some("about".into()),
            status: Some(PageStatus::Draft),
            sort_by: None,
            sort: None,
        };
        let pairs = query_pairs(&params);
        assert_eq!(
            pairs,
            vec![
                ("search".to_string(), "about".to_string()),
                ("status".to_string(), "draft".to_string()),
            ]
        );
        assert_eq!(cache_key(PAGES, &pairs), "/api/pages?search=about&status=draft");
        assert_eq!(cache_key(PAGES, &[]), "/api/pages");
    }

    #[test]
    fn cache_key_encodes_query_values() {
        let smuggled = vec![("search".to_string(), "a&status=draft".to_string())];
        let split = vec![
            ("search".to_string(), "a".to_string()),
            ("status".to_string(), "draft".to_string()),
        ];

        assert_eq!(cache_key(PAGES, &smuggled), "/api/pages?search=a%26status%3Ddraft");
        assert_ne!(cache_key(PAGES, &smuggled), cache_key(PAGES, &split));
    }

    #[test]
    fn envelope_without_data_is_a_decode_error() {
        let envelope: ApiResponse<Vec<i64>> = ApiResponse {
            success: true,
            data: None,
            message: None,
            meta: Some(Meta { total: 0 }),
            errors: None,
        };
        assert!(matches!(require_data(envelope, PAGES), Err(ClientError::Decode(_))));
    }
}
