//! Info panel rendering
//!
//! The info panel has fixed display regions: the ward heading and text, then
//! an upper, middle and lower section, each with a heading, a description and
//! an optional notable-locations table. Cliffside districts use only the first
//! section. [`InfoPanel`] holds what those regions currently show and
//! [`Renderer`] paints a [`ResolvedView`] into it.

use crate::location::Permalink;
use crate::resolve::{LevelView, ResolvedView};
use crate::sanitize::{MarkdownSanitizer, TextRenderer};
use crate::ward::Direction;

/// Landing text shown when no district is selected
pub const HELP_TEXT: &str = "\
## Welcome to Sharn

Click a district on the map to read about its ward, its upper, middle and \
lower levels, and the notable locations found on each.

- Click the selected district again to return to this page.
- Every district has a permalink (`#C3`, `#grayflood`, ...) that opens it directly.
- Append `?json=<url>` to the page address to load a different description file, \
or use **Load JSON** to open one from disk.
";

/// Column headers of a notable-locations table
pub const TABLE_HEADERS: [&str; 2] = ["Location", "Description"];

/// Display-region identifiers, in section order
const SECTION_REGIONS: [(&str, &str, &str); 3] = [
    ("upperSection", "upperDistrict", "upperInfo"),
    ("middleSection", "middleDistrict", "middleInfo"),
    ("lowerSection", "lowerDistrict", "lowerInfo"),
];

/// Heading of a level section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionHeading {
    /// Escaped label text
    pub text_html: String,
    /// Height indicator, absent for cliffside districts
    pub direction: Option<Direction>,
}

/// Notable-locations table; each row pairs a name with its description
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationsTable {
    pub rows: Vec<(String, String)>,
}

/// One of the three level sections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    pub heading: Option<SectionHeading>,
    pub info_html: String,
    pub table: Option<LocationsTable>,
}

impl Section {
    fn clear(&mut self) {
        self.heading = None;
        self.info_html.clear();
    }
}

/// Regions shown while a district is displayed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistrictPanel {
    /// Escaped district identifier
    pub district_id_html: String,
    /// Escaped permalink target, e.g. `#C12`
    pub permalink_html: String,
    pub ward_html: String,
    pub ward_info_html: String,
    pub sections: [Section; 3],
}

impl DistrictPanel {
    /// Drop every notable-locations table
    fn remove_tables(&mut self) {
        for section in &mut self.sections {
            section.table = None;
        }
    }

    pub fn table_count(&self) -> usize {
        self.sections.iter().filter(|s| s.table.is_some()).count()
    }
}

/// What the info panel currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoPanel {
    /// Landing help text (sanitized HTML)
    Help(String),
    /// A rendered district
    District(Box<DistrictPanel>),
}

impl InfoPanel {
    pub fn is_help(&self) -> bool {
        matches!(self, Self::Help(_))
    }

    pub fn district(&self) -> Option<&DistrictPanel> {
        match self {
            Self::District(panel) => Some(panel),
            Self::Help(_) => None,
        }
    }

    /// Serialize the panel as the contents of the page's info box
    pub fn to_html(&self) -> String {
        match self {
            Self::Help(html) => html.clone(),
            Self::District(panel) => district_html(panel),
        }
    }
}

fn district_html(panel: &DistrictPanel) -> String {
    let mut out = String::new();
    out.push_str(&format!("<h2 id=\"ward\">{}</h2>\n", panel.ward_html));
    out.push_str(&format!("<div id=\"wardInfo\">{}</div>\n", panel.ward_info_html));

    for (section, (section_id, heading_id, info_id)) in panel.sections.iter().zip(SECTION_REGIONS) {
        out.push_str(&format!("<section id=\"{section_id}\">\n"));
        out.push_str(&format!("<h3 id=\"{heading_id}\">"));
        if let Some(heading) = &section.heading {
            if let Some(direction) = heading.direction {
                out.push_str(&format!("<i class=\"{}\"></i>", direction.icon_class()));
            }
            out.push_str(&heading.text_html);
        }
        out.push_str("</h3>\n");
        out.push_str(&format!("<div id=\"{info_id}\">{}</div>\n", section.info_html));
        if let Some(table) = &section.table {
            out.push_str(&table_html(table));
        }
        out.push_str("</section>\n");
    }

    out.push_str(&format!(
        "<p class=\"districtId\"><a id=\"districtLink\" href=\"{}\">{}</a></p>\n",
        panel.permalink_html, panel.district_id_html
    ));
    out
}

fn table_html(table: &LocationsTable) -> String {
    let mut out = String::from("<table class=\"locationsTable\">\n<tr>");
    for header in TABLE_HEADERS {
        out.push_str(&format!("<th>{header}</th>"));
    }
    out.push_str("</tr>\n");
    for (name, description) in &table.rows {
        out.push_str(&format!("<tr><td>{name}</td><td>{description}</td></tr>\n"));
    }
    out.push_str("</table>\n");
    out
}

/// Paints resolved districts and the help view into an [`InfoPanel`]
pub struct Renderer<T: TextRenderer = MarkdownSanitizer> {
    text: T,
    help_html: String,
}

impl Renderer<MarkdownSanitizer> {
    pub fn new() -> Self {
        Self::with_text_renderer(MarkdownSanitizer::new())
    }
}

impl Default for Renderer<MarkdownSanitizer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TextRenderer> Renderer<T> {
    pub fn with_text_renderer(text: T) -> Self {
        let help_html = text.to_safe_html(HELP_TEXT);
        Self { text, help_html }
    }

    /// Text renderer used for every free-text field
    pub fn text(&self) -> &T {
        &self.text
    }

    /// Panel showing the help text
    pub fn help_panel(&self) -> InfoPanel {
        InfoPanel::Help(self.help_html.clone())
    }

    /// Switch the panel to the help view
    pub fn show_help(&self, panel: &mut InfoPanel) {
        *panel = self.help_panel();
    }

    /// Paint a resolved district.
    ///
    /// Stale tables are removed before anything is written, so rendering the
    /// same view twice yields the same panel.
    pub fn render(&self, panel: &mut InfoPanel, view: &ResolvedView) {
        if panel.is_help() {
            *panel = InfoPanel::District(Box::default());
        }
        let InfoPanel::District(district) = panel else {
            return;
        };
        district.remove_tables();

        district.ward_html = self.text.escape_text(&view.ward_name);
        district.ward_info_html.clone_from(&view.ward_description_html);

        for section in &mut district.sections {
            section.clear();
        }
        for (section, level) in district.sections.iter_mut().zip(&view.levels) {
            self.paint_section(section, level);
        }

        district.district_id_html = self.text.escape_text(&view.district_id);
        district.permalink_html = self
            .text
            .escape_text(&Permalink::for_district(&view.district_id).href());
    }

    fn paint_section(&self, section: &mut Section, level: &LevelView) {
        section.heading = Some(SectionHeading {
            text_html: self.text.escape_text(&level.label),
            direction: level.level.map(|l| l.direction()),
        });
        section.info_html.clone_from(&level.description_html);
        if !level.locations.is_empty() {
            section.table = Some(LocationsTable {
                rows: level
                    .locations
                    .iter()
                    .map(|loc| (loc.name_html.clone(), loc.description_html.clone()))
                    .collect(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::resolve::LocationView;
    use crate::ward::{Level, Ward};

    fn level_view(level: Option<Level>, name: &str, locations: usize) -> LevelView {
        LevelView {
            level,
            name: name.to_string(),
            label: level.map_or_else(|| name.to_string(), |l| format!("{}: {}", l.label(), name)),
            description_html: format!("<p>{name}</p>"),
            locations: (0..locations)
                .map(|i| LocationView {
                    name_html: format!("<p>loc {i}</p>"),
                    description_html: format!("<p>desc {i}</p>"),
                })
                .collect(),
        }
    }

    fn tiered_view() -> ResolvedView {
        ResolvedView {
            district_id: "C12".to_string(),
            ward: Ward::Central,
            ward_name: "Central Plateau".to_string(),
            ward_description_html: "<p>Core</p>".to_string(),
            levels: vec![
                level_view(Some(Level::Upper), "Skyway", 2),
                level_view(Some(Level::Middle), "Ring", 0),
                level_view(Some(Level::Lower), "Underside", 1),
            ],
        }
    }

    #[test]
    fn test_help_panel() {
        let renderer = Renderer::new();
        let panel = renderer.help_panel();
        assert!(panel.is_help());
        assert!(panel.to_html().contains("Welcome to Sharn"));
    }

    #[test]
    fn test_render_tiered() {
        let renderer = Renderer::new();
        let mut panel = renderer.help_panel();
        renderer.render(&mut panel, &tiered_view());

        let district = panel.district().unwrap();
        assert!(district.ward_html.starts_with("Central"));
        assert!(!district.ward_html.contains('<'));
        assert!(district.permalink_html.ends_with("C12"));
        assert_eq!(district.table_count(), 2);
        assert_eq!(
            district.sections[0].heading.as_ref().unwrap().direction,
            Some(Direction::Up)
        );
        assert!(district.sections[1].table.is_none());
        assert_eq!(district.sections[2].table.as_ref().unwrap().rows.len(), 1);

        let html = panel.to_html();
        assert!(html.contains("bi-arrow-down-square-fill"));
        assert!(html.contains("<th>Location</th><th>Description</th>"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let renderer = Renderer::new();
        let mut panel = renderer.help_panel();
        renderer.render(&mut panel, &tiered_view());
        let first = panel.to_html();
        renderer.render(&mut panel, &tiered_view());
        assert_eq!(panel.to_html(), first);
        assert_eq!(first.matches("locationsTable").count(), 2);
    }

    #[test]
    fn test_cliffside_clears_other_sections() {
        let renderer = Renderer::new();
        let mut panel = renderer.help_panel();
        renderer.render(&mut panel, &tiered_view());

        let cliffside = ResolvedView {
            district_id: "X9".to_string(),
            ward: Ward::Cliffside,
            ward_name: "Cliffside".to_string(),
            ward_description_html: String::new(),
            levels: vec![level_view(None, "Greyhollow", 0)],
        };
        renderer.render(&mut panel, &cliffside);

        let district = panel.district().unwrap();
        assert_eq!(district.table_count(), 0);
        assert!(district.sections[0].heading.as_ref().unwrap().direction.is_none());
        assert!(district.sections[1].heading.is_none());
        assert!(district.sections[2].info_html.is_empty());
        assert!(!panel.to_html().contains("heightIcon"));
    }

    #[test]
    fn test_table_rows_in_order() {
        let renderer = Renderer::new();
        let mut panel = renderer.help_panel();
        renderer.render(&mut panel, &tiered_view());

        let html = panel.to_html();
        let first = html.find("loc 0").unwrap();
        let second = html.find("loc 1").unwrap();
        assert!(first < second);
        // header row plus three location rows across two tables
        assert_eq!(html.matches("<tr>").count(), 2 + 3);
    }
}
