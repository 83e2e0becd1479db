pub mod health_get;
pub mod loadsheet_generate_post;
pub mod loadsheet_reset_delete;
pub mod loadsheet_resend_post;
pub mod request_common;
