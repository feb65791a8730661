pub mod sector;
