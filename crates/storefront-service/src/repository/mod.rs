//! 数据访问层
//!
//! 表和对象存储都托管在 Supabase，这里定义访问接口和基于 PostgREST / Storage 的实现。

mod supabase;
mod traits;

pub use supabase::SupabaseRepository;
pub use traits::{DesignRepository, GenerationRepository, ImageStore, OrderRepository};

#[cfg(test)]
pub use traits::{
    MockDesignRepository, MockGenerationRepository, MockImageStore, MockOrderRepository,
};
