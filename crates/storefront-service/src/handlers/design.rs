//! 设计作品 API 处理器

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::{
    auth::AuthUser,
    dto::{
        ApiResponse, DesignListQuery, DesignListResponse, ProductView, SaveDesignRequest,
        SaveDesignResponse,
    },
    error::ShopError,
    state::AppState,
};

/// 保存设计
///
/// POST /api/save-design
pub async fn save_design(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(req), _): WithRejection<Json<SaveDesignRequest>, ShopError>,
) -> Result<Json<ApiResponse<SaveDesignResponse>>, ShopError> {
    req.validate()?;

    let design = state.designs.save(&user, req).await?;
    Ok(Json(ApiResponse::success(SaveDesignResponse {
        design: design.into(),
    })))
}

/// 作品列表（按创建时间倒序）
///
/// GET /api/designs?limit=50
pub async fn list_designs(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<DesignListQuery>, ShopError>,
) -> Result<Json<ApiResponse<DesignListResponse>>, ShopError> {
    query.validate()?;

    let designs = state.designs.list_gallery(query.limit()).await?;
    Ok(Json(ApiResponse::success(DesignListResponse::new(designs))))
}

/// 商品详情
///
/// GET /api/designs/{id}
pub async fn get_design(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ProductView>>, ShopError> {
    let design = state.designs.get(&id).await?;
    Ok(Json(ApiResponse::success(design.into())))
}
