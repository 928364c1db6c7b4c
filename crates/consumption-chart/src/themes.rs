use plotters::style::RGBColor;

/// Colours used by the cumulative consumption chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartTheme {
    /// Canvas behind both panels.
    pub canvas: RGBColor,
    /// Plotting-area background.
    pub background: RGBColor,
    /// Major grid lines.
    pub grid: RGBColor,
    /// Tick labels.
    pub tick: RGBColor,
    /// Title and annotation text.
    pub text: RGBColor,
    /// Upper panel (CO2 / kWh) series and axis labels.
    pub upper: RGBColor,
    /// Lower panel (CPU hours / km) series and axis labels.
    pub lower: RGBColor,
    /// Opacity of the secondary-axis series relative to the primary one.
    pub secondary_alpha: f64,
}

impl ChartTheme {
    /// Grey panels with a white grid, orange CO2/energy and blue CPU/distance.
    pub fn classic() -> Self {
        Self {
            canvas: RGBColor(255, 255, 255),
            background: RGBColor(0xE6, 0xE6, 0xE6),
            grid: RGBColor(255, 255, 255),
            tick: RGBColor(128, 128, 128),
            text: RGBColor(0, 0, 0),
            upper: RGBColor(0xFF, 0x7F, 0x0E),
            lower: RGBColor(0x1F, 0x77, 0xB4),
            secondary_alpha: 0.55,
        }
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::classic()
    }
}
