pub mod import;
pub mod recommend;
pub mod select;
pub mod start;
pub mod status;
pub mod toplist;
