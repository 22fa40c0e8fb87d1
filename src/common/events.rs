use uuid::Uuid;

use crate::error::ApiError;
use crate::network::Endpoint;

use super::types::ApiResponse;

/// Sự kiện từ worker gửi lên UI.
#[derive(Debug, Clone)]
pub enum ApiEvent {
    /// A request finished, either way.
    Settled {
        request_id: Uuid,
        endpoint: Endpoint,
        result: Result<ApiResponse, ApiError>,
    },
}
