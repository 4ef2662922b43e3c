//! Year labels for the different sheet families

use crate::config::YearSettings;

/// Forecast-year indices shown on the summary sheet (the last year is added separately)
const SUMMARY_FORECAST_PICKS: [usize; 5] = [0, 1, 2, 5, 10];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearAxis {
    pub historical: Vec<String>,
    pub forecast: Vec<String>,
    display_history: usize,
}

impl YearAxis {
    pub fn from_settings(settings: &YearSettings) -> Self {
        let first_forecast = settings.first_historical_year + settings.historical_years;
        Self {
            historical: (0..settings.historical_years)
                .map(|i| label(settings.first_historical_year + i))
                .collect(),
            forecast: (0..settings.forecast_years)
                .map(|i| label(first_forecast + i))
                .collect(),
            display_history: settings.display_history as usize,
        }
    }

    /// Last few historical years followed by every forecast year
    pub fn display(&self) -> Vec<String> {
        let skip = self.historical.len().saturating_sub(self.display_history);
        self.historical[skip..]
            .iter()
            .chain(self.forecast.iter())
            .cloned()
            .collect()
    }

    /// Last historical year plus a spread of forecast years ending at the last one
    pub fn summary(&self) -> Vec<String> {
        let mut years: Vec<String> = self.historical.last().cloned().into_iter().collect();
        let last = self.forecast.len().saturating_sub(1);
        for idx in SUMMARY_FORECAST_PICKS.iter().copied().chain(std::iter::once(last)) {
            if let Some(year) = self.forecast.get(idx) {
                if !years.contains(year) {
                    years.push(year.clone());
                }
            }
        }
        years
    }
}

fn label(year: u32) -> String {
    format!("FY{}", year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_axis() {
        let axis = YearAxis::from_settings(&YearSettings::default());
        assert_eq!(axis.historical, vec!["FY2020", "FY2021", "FY2022", "FY2023", "FY2024"]);
        assert_eq!(axis.forecast.len(), 16);
        assert_eq!(axis.forecast.first().map(String::as_str), Some("FY2025"));
        assert_eq!(axis.forecast.last().map(String::as_str), Some("FY2040"));
    }

    #[test]
    fn test_display_years() {
        let axis = YearAxis::from_settings(&YearSettings::default());
        let display = axis.display();
        assert_eq!(display.len(), 18);
        assert_eq!(&display[..3], &["FY2023", "FY2024", "FY2025"]);
    }

    #[test]
    fn test_summary_years() {
        let axis = YearAxis::from_settings(&YearSettings::default());
        assert_eq!(
            axis.summary(),
            vec!["FY2024", "FY2025", "FY2026", "FY2027", "FY2030", "FY2035", "FY2040"]
        );
    }

    #[test]
    fn test_summary_years_short_forecast() {
        let axis = YearAxis::from_settings(&YearSettings {
            forecast_years: 3,
            ..Default::default()
        });
        assert_eq!(axis.summary(), vec!["FY2024", "FY2025", "FY2026", "FY2027"]);
    }
}
