pub mod year_label;
