pub mod interruption;
pub mod pass_schedule;
pub mod render_pass;
