//! Style palette and column widths
//!
//! One `Theme` value is handed to the sheet builders and the exporter; there
//! are no style globals.

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub font_name: String,
    pub header_font_size: f64,
    pub body_font_size: f64,

    /// Header banner fill
    pub primary: u32,
    /// Subheader fill
    pub secondary: u32,
    /// Summary sheet header fill
    pub grey: u32,
    pub white: u32,
    pub black: u32,
    /// Font colour of manually entered values
    pub input: u32,

    pub label_width: f64,
    pub summary_label_width: f64,
    pub year_width: f64,
    pub summary_year_width: f64,
    pub input_notes_width: f64,
    pub forecast_notes_width: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            font_name: "Calibri".to_string(),
            header_font_size: 11.0,
            body_font_size: 10.0,
            primary: 0x4F81BD,
            secondary: 0xDCE6F1,
            grey: 0xF2F2F2,
            white: 0xFFFFFF,
            black: 0x000000,
            input: 0x0000FF,
            label_width: 45.0,
            summary_label_width: 40.0,
            year_width: 12.0,
            summary_year_width: 14.0,
            input_notes_width: 50.0,
            forecast_notes_width: 60.0,
        }
    }
}
