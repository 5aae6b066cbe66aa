//! 店铺服务 DTO 模块
//!
//! 包含所有请求和响应的数据传输对象

pub mod request;
pub mod response;

pub use request::{
    CreateOrderRequest, DesignListQuery, GenerateRequest, PromptRequest, SaveDesignRequest,
    ShipmentDetailsInput, SizeGuideQuery,
};

pub use response::{
    ApiResponse, CreateOrderResponse, DesignDto, DesignListResponse, EnhancePromptResponse,
    GenerateResponse, OrderDto, ProductView, SaveDesignResponse, SizeGuideResponse,
    SuggestNameResponse,
};
