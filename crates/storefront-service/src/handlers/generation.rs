//! 设计图生成 API 处理器

use axum::{Extension, Json, extract::State};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::{
    auth::AuthUser,
    dto::{
        ApiResponse, EnhancePromptResponse, GenerateRequest, GenerateResponse, PromptRequest,
        SuggestNameResponse,
    },
    error::ShopError,
    models::QuotaStatus,
    state::AppState,
};

/// 生成设计图
///
/// POST /api/generate
pub async fn generate(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(req), _): WithRejection<Json<GenerateRequest>, ShopError>,
) -> Result<Json<ApiResponse<GenerateResponse>>, ShopError> {
    req.validate()?;

    let image = state
        .generation
        .generate(&user, &req.prompt, req.color.as_deref())
        .await?;

    Ok(Json(ApiResponse::success(GenerateResponse { image })))
}

/// 查询当日生成配额
///
/// GET /api/generations/quota
pub async fn quota_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ApiResponse<QuotaStatus>>, ShopError> {
    let status = state.quota.status(&user.id).await?;
    Ok(Json(ApiResponse::success(status)))
}

/// 优化提示词
///
/// POST /api/enhance-prompt
pub async fn enhance_prompt(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<PromptRequest>, ShopError>,
) -> Result<Json<ApiResponse<EnhancePromptResponse>>, ShopError> {
    req.validate()?;

    let enhanced_prompt = state.generation.enhance_prompt(&req.prompt).await?;
    Ok(Json(ApiResponse::success(EnhancePromptResponse {
        enhanced_prompt,
    })))
}

/// 建议商品名
///
/// POST /api/suggest-name
pub async fn suggest_name(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<PromptRequest>, ShopError>,
) -> Result<Json<ApiResponse<SuggestNameResponse>>, ShopError> {
    req.validate()?;

    let suggested_name = state.generation.suggest_name(&req.prompt).await?;
    Ok(Json(ApiResponse::success(SuggestNameResponse { suggested_name })))
}
