//! 订单 API 处理器

use axum::{Extension, Json, extract::State};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::{
    auth::AuthUser,
    dto::{ApiResponse, CreateOrderRequest, CreateOrderResponse},
    error::ShopError,
    state::AppState,
};

/// 下单
///
/// POST /api/create-order
pub async fn create_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(req), _): WithRejection<Json<CreateOrderRequest>, ShopError>,
) -> Result<Json<ApiResponse<CreateOrderResponse>>, ShopError> {
    req.validate()?;

    let order = state.orders.place(&user, req).await?;
    Ok(Json(ApiResponse::success(CreateOrderResponse {
        order: order.into(),
    })))
}
