pub mod d410_sector_risk;
