//! PDF table layout for the full report
//!
//! The layout driver paginates an A4 portrait page and checks the remaining
//! vertical space before each section. The binary writer is an opaque sink
//! behind [`PdfTableSink`]; this module only decides what goes where.

use crate::services::reporting::FullReport;
use shared::format::{format_currency_pen, format_date_pe, format_percent};

/// A4 portrait in points
pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;
pub const MARGIN: f32 = 40.0;

const HEADING_HEIGHT: f32 = 26.0;
const ROW_HEIGHT: f32 = 16.0;

/// Drawing surface the layout drives. Coordinates grow downward from the
/// top of the page.
pub trait PdfTableSink {
    fn start_page(&mut self);
    fn draw_heading(&mut self, text: &str, y: f32);
    fn draw_row(&mut self, cells: &[String], y: f32);
}

/// Cursor over the current page
pub struct PdfLayout {
    y: f32,
    pages: u32,
}

impl PdfLayout {
    pub fn new() -> Self {
        Self {
            y: PAGE_HEIGHT,
            pages: 0,
        }
    }

    pub fn pages(&self) -> u32 {
        self.pages
    }

    fn remaining(&self) -> f32 {
        self.y - MARGIN
    }

    /// Break to a fresh page when the next block does not fit
    fn ensure_space(&mut self, needed: f32, sink: &mut dyn PdfTableSink) {
        if self.pages == 0 || self.remaining() < needed {
            sink.start_page();
            self.pages += 1;
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn heading(&mut self, text: &str, sink: &mut dyn PdfTableSink) {
        sink.draw_heading(text, PAGE_HEIGHT - self.y);
        self.y -= HEADING_HEIGHT;
    }

    fn row(&mut self, cells: &[String], sink: &mut dyn PdfTableSink) {
        // Rows after a section heading may still overflow mid-table
        if self.remaining() < ROW_HEIGHT {
            sink.start_page();
            self.pages += 1;
            self.y = PAGE_HEIGHT - MARGIN;
        }
        sink.draw_row(cells, PAGE_HEIGHT - self.y);
        self.y -= ROW_HEIGHT;
    }

    /// Draw a section: the space check runs before the heading so a section
    /// never opens at the very bottom of a page.
    fn section(&mut self, title: &str, rows: &[Vec<String>], sink: &mut dyn PdfTableSink) {
        let min_block = HEADING_HEIGHT + ROW_HEIGHT * 2.0;
        self.ensure_space(min_block, sink);
        self.heading(title, sink);
        for cells in rows {
            self.row(cells, sink);
        }
    }
}

impl Default for PdfLayout {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the full report into the sink, returning the page count
pub fn render_report(report: &FullReport, sink: &mut dyn PdfTableSink) -> u32 {
    let mut layout = PdfLayout::new();
    let financial = &report.financial;

    layout.section(
        &format!("Reporte maricultura - {}", format_date_pe(report.report_date)),
        &[],
        sink,
    );

    layout.section(
        "Resumen financiero",
        &[
            pair("Ingresos totales", format_currency_pen(financial.summary.total_revenue)),
            pair("Costos totales", format_currency_pen(financial.summary.total_cost)),
            pair("Costos de cosecha", format_currency_pen(financial.costs.harvest_costs)),
            pair(
                "Gastos operativos",
                format_currency_pen(financial.costs.operational_expenses),
            ),
            pair(
                "Inversión inicial",
                format_currency_pen(financial.costs.initial_investment),
            ),
            pair("Utilidad bruta", format_currency_pen(financial.summary.gross_profit)),
            pair("Utilidad neta", format_currency_pen(financial.summary.net_profit)),
            pair("Margen", format_percent(financial.summary.profit_margin)),
            pair("ROI", format_percent(financial.summary.roi)),
        ],
        sink,
    );

    layout.section(
        "Cantidades",
        &[
            pair("Unidades", financial.quantities.total_units.to_string()),
            pair("Manojos", financial.quantities.manojos.to_string()),
            pair("Mallas", financial.quantities.mallas.to_string()),
            pair("Kilogramos", financial.quantities.kilograms.to_string()),
        ],
        sink,
    );

    let mut harvest_rows: Vec<Vec<String>> = vec![vec![
        "Fecha".to_string(),
        "Sector".to_string(),
        "Estado".to_string(),
        "Cantidad".to_string(),
        "Ingreso".to_string(),
    ]];
    for row in &report.harvests {
        let date = row.actual_date.unwrap_or(row.planned_date);
        harvest_rows.push(vec![
            format_date_pe(date),
            row.sector_name.clone(),
            row.status.as_str().to_string(),
            row.actual_quantity.unwrap_or(row.estimated_quantity).to_string(),
            format_currency_pen(row.revenue),
        ]);
    }
    layout.section("Cosechas", &harvest_rows, sink);

    layout.pages()
}

fn pair(label: &str, value: String) -> Vec<String> {
    vec![label.to_string(), value]
}

/// Text sink used by tests and the preview endpoint; each page becomes a
/// block of lines.
#[derive(Debug, Default)]
pub struct PlainTextSink {
    pub pages: Vec<Vec<String>>,
}

impl PdfTableSink for PlainTextSink {
    fn start_page(&mut self) {
        self.pages.push(Vec::new());
    }

    fn draw_heading(&mut self, text: &str, _y: f32) {
        if let Some(page) = self.pages.last_mut() {
            page.push(format!("== {} ==", text));
        }
    }

    fn draw_row(&mut self, cells: &[String], _y: f32) {
        if let Some(page) = self.pages.last_mut() {
            page.push(cells.join(" | "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingSink {
        pages: u32,
    }

    impl PdfTableSink for CountingSink {
        fn start_page(&mut self) {
            self.pages += 1;
        }
        fn draw_heading(&mut self, _text: &str, _y: f32) {}
        fn draw_row(&mut self, _cells: &[String], _y: f32) {}
    }

    #[test]
    fn test_section_breaks_before_heading_when_short_on_space() {
        let mut sink = CountingSink { pages: 0 };
        let mut layout = PdfLayout::new();

        // Fill the first page down to a sliver smaller than a section block
        let filler: Vec<Vec<String>> = (0..45).map(|i| vec![i.to_string()]).collect();
        layout.section("first", &filler, &mut sink);
        let pages_before = layout.pages();
        assert_eq!(pages_before, 1);

        // The next section does not fit in the sliver that remains
        layout.section("second", &[vec!["x".to_string()]], &mut sink);
        assert_eq!(layout.pages(), pages_before + 1);
    }

    #[test]
    fn test_long_table_paginates() {
        let mut sink = CountingSink { pages: 0 };
        let mut layout = PdfLayout::new();
        let rows: Vec<Vec<String>> = (0..200).map(|i| vec![i.to_string()]).collect();
        layout.section("big", &rows, &mut sink);
        assert!(layout.pages() > 1);
    }
}
