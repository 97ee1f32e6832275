// File: crates/chart-core/src/theme.rs
// Summary: Light/Dark palettes for SVG output.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background: &'static str,
    pub grid: &'static str,
    pub axis_line: &'static str,
    pub axis_label: &'static str,
    pub brush: &'static str,
    pub bar_label: &'static str,
    /// Series colors, cycled by series index.
    pub series: &'static [&'static str],
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: "#ffffff",
            grid: "#e6e6eb",
            axis_line: "#3c3c46",
            axis_label: "#000000",
            brush: "#777777",
            bar_label: "#ffffff",
            series: &["#2078c8", "#dc503c", "#14a05a", "#b58900", "#6c71c4"],
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: "#121214",
            grid: "#28282d",
            axis_line: "#b4b4be",
            axis_label: "#ebebf5",
            brush: "#ffe646",
            bar_label: "#121214",
            series: &["#40a0ff", "#dc5050", "#28c878", "#ffe646", "#a09cff"],
        }
    }

    pub fn series_color(&self, series_index: usize) -> &'static str {
        self.series[series_index % self.series.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::light()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_default()
}
