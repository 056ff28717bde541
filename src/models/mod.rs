pub mod response;
pub mod trip;
