//! 商品目录 API 处理器
//!
//! 目录数据是编译期常量，不访问外部服务。

use axum::{Json, extract::Query};
use axum_extra::extract::WithRejection;

use crate::{
    dto::{ApiResponse, SizeGuideQuery, SizeGuideResponse},
    error::ShopError,
    models::{
        ShirtColor, ShirtSize,
        catalog::{PALETTE, size_guide as guide_for},
    },
};

/// 尺码表
///
/// GET /api/catalog/size-guide?unit=inches|cm
pub async fn size_guide(
    WithRejection(Query(query), _): WithRejection<Query<SizeGuideQuery>, ShopError>,
) -> Result<Json<ApiResponse<SizeGuideResponse>>, ShopError> {
    Ok(Json(ApiResponse::success(SizeGuideResponse {
        unit: query.unit,
        measurements: guide_for(query.unit),
    })))
}

/// GET /api/catalog/colors
pub async fn colors() -> Json<ApiResponse<&'static [ShirtColor]>> {
    Json(ApiResponse::success(&PALETTE[..]))
}

/// GET /api/catalog/sizes
pub async fn sizes() -> Json<ApiResponse<[ShirtSize; 6]>> {
    Json(ApiResponse::success(ShirtSize::ALL))
}
