pub mod gpt;
pub mod mbr;
