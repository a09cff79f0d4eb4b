pub mod colour;
pub mod complex;
pub mod render_request;
pub mod rendered_image;
