pub mod key;
pub mod track;
