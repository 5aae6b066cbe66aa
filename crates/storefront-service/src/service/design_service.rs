//! 设计作品保存与查询

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};
use vision_shared::observability::metrics;

use crate::auth::AuthUser;
use crate::dto::SaveDesignRequest;
use crate::error::{Result, ShopError, action};
use crate::models::design::DEFAULT_PRICE;
use crate::models::{Design, NewDesign, ShipmentDetails};
use crate::repository::{DesignRepository, ImageStore};

use super::image::decode_image;
use super::{optional_text, required};

const MISSING_FIELDS: &str = "Missing required fields";

pub struct DesignService {
    designs: Arc<dyn DesignRepository>,
    images: Arc<dyn ImageStore>,
}

/// 对象存储路径：`{user_id}/{毫秒时间戳}-design.{ext}`
fn object_path(user_id: &str, unix_millis: i64, extension: &str) -> String {
    format!("{user_id}/{unix_millis}-design.{extension}")
}

impl DesignService {
    pub fn new(designs: Arc<dyn DesignRepository>, images: Arc<dyn ImageStore>) -> Self {
        Self { designs, images }
    }

    /// 保存设计：上传图片后写入记录
    ///
    /// 图片上传成功但写表失败时，已上传的对象不会被清理。
    #[instrument(skip(self, user, request), fields(user_id = %user.id))]
    pub async fn save(&self, user: &AuthUser, request: SaveDesignRequest) -> Result<Design> {
        let image_data = required(&request.base64_image, MISSING_FIELDS)?;
        let prompt = required(&request.prompt, MISSING_FIELDS)?;
        let color = required(&request.color, MISSING_FIELDS)?;

        let shipment = request.shipment_details.map(ShipmentDetails::from);
        if shipment.as_ref().is_some_and(|s| !s.is_complete()) {
            return Err(ShopError::MissingFields(
                "Shipment name, address and phone are required".to_string(),
            ));
        }

        let image = decode_image(image_data)?;
        let path = object_path(&user.id, Utc::now().timestamp_millis(), image.extension);
        let size = image.bytes.len();

        let image_url = self
            .images
            .upload(&path, image.bytes, image.content_type)
            .await
            .map_err(|e| {
                metrics::record_design_saved("failure");
                ShopError::upstream(action::UPLOAD_IMAGE)(e)
            })?;

        let row = NewDesign {
            user_id: user.id.clone(),
            image_url,
            prompt_text: prompt.to_string(),
            base_color: color.to_string(),
            user_email: user.email.clone(),
            product_name: optional_text(request.name.as_deref()),
            price: request.price.unwrap_or(DEFAULT_PRICE),
            description: optional_text(request.description.as_deref()),
            shipment_name: None,
            shipment_address: None,
            shipment_phone: None,
        }
        .with_shipment(shipment);

        let design = self.designs.create(&row).await.map_err(|e| {
            metrics::record_design_saved("failure");
            ShopError::upstream(action::SAVE_DESIGN)(e)
        })?;

        metrics::record_design_saved("success");
        info!(design_id = %design.id, path = %path, size, "Design saved");
        Ok(design)
    }

    /// 作品列表，按创建时间倒序
    pub async fn list_gallery(&self, limit: u32) -> Result<Vec<Design>> {
        self.designs
            .list_recent(limit)
            .await
            .map_err(ShopError::upstream(action::LOAD_DESIGNS))
    }

    /// 按 ID 查询，不存在时返回 `DesignNotFound`
    pub async fn get(&self, id: &str) -> Result<Design> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ShopError::DesignNotFound(id.to_string()));
        }
        match self.designs.find_by_id(id).await {
            Ok(Some(design)) => Ok(design),
            Ok(None) => Err(ShopError::DesignNotFound(id.to_string())),
            Err(e) if e.is_lookup_miss() => {
                debug!(id, error = %e, "Design lookup rejected, treating as not found");
                Err(ShopError::DesignNotFound(id.to_string()))
            }
            Err(e) => Err(ShopError::upstream(action::LOAD_DESIGNS)(e)),
        }
    }
}
