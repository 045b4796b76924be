pub mod charts;
pub mod kpis;
pub mod popup;
pub mod radar;
pub mod tables;
