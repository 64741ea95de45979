//! Request middleware and extractors.

mod identity;
mod request_id;

pub use identity::{SHOPPER_ID_HEADER, Shopper};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
