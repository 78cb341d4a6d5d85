pub mod composition;
pub mod popup;
