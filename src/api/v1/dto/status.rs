use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    #[schema(value_type = String, example = "operational")]
    pub status: &'static str,
    #[schema(example = "alice")]
    pub consumer: String,
    #[schema(value_type = String)]
    pub message: &'static str,
}
