pub mod progressive;
