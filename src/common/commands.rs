use uuid::Uuid;

use crate::network::Endpoint;

/// Lệnh store gửi xuống worker: thực hiện đúng một request.
#[derive(Debug, Clone)]
pub struct ApiCommand {
    pub request_id: Uuid,
    pub endpoint: Endpoint,
}
