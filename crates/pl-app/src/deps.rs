//! # Field Dependencies
//!
//! Groups the ports a [`PrincipalListField`](crate::field::PrincipalListField)
//! is built from.
//!
//! **Note**: This is NOT a Builder pattern.
//! - No build steps
//! - No default values
//! - Just parameter grouping

use std::sync::Arc;
use pl_core::ports::*;

/// Field dependency grouping (non-Builder, just parameter grouping)
/// 字段依赖分组（非 Builder，仅参数打包）
///
/// All dependencies are required - no defaults, no optional fields.
#[derive(Clone)]
pub struct FieldDeps {
    // Resolution / 解析
    pub lookup: Arc<dyn PrincipalLookupPort>,
    pub error_surface: Arc<dyn ErrorSurfacePort>,

    // Form / 表单
    pub events: Arc<dyn FieldEventsPort>,

    // Externally owned favorite set / 外部收藏集合
    pub favorites: Arc<dyn FavoriteUsersPort>,
}
