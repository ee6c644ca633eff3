pub mod record;
pub mod responses;

pub use record::{EntityRecord, display_value, is_truthy};
pub use responses::{ActionResponse, CountResponse, SearchRequest};
