//! Terminal rendering of grid frames.
//!
//! [`Frame::layout`] turns a [`GridView`] into aligned plain-text lines;
//! [`TerminalSurface`] styles and prints them with crossterm. Markup cells
//! are shown with their tags stripped.

use std::io;
use std::io::Write;

use crossterm::queue;
use crossterm::style::Print;
use crossterm::style::PrintStyledContent;
use crossterm::style::Stylize;
use storefront_grid::query::Direction;
use storefront_grid::surface::Host;
use storefront_grid::surface::Surface;
use storefront_grid::view::Body;
use storefront_grid::view::GridView;

/// Longest cell text shown before truncation.
const MAX_CELL_WIDTH: usize = 32;

const SEPARATOR: &str = " | ";

/// How a body line is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Normal,
    Selected,
    Muted,
    Error,
}

/// A grid view laid out as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub toolbar: String,
    pub header: String,
    pub lines: Vec<(LineStyle, String)>,
    pub pager: String,
}

impl Frame {
    pub fn layout(view: &GridView) -> Self {
        let mut titles: Vec<String> = vec!["ID".to_string()];
        titles.extend(view.header.iter().map(|cell| match cell.sort {
            Some(Direction::Asc) => format!("{} ^", cell.title),
            Some(Direction::Desc) => format!("{} v", cell.title),
            None => cell.title.clone(),
        }));
        if let Some(actions) = &view.actions_header {
            titles.push(actions.clone());
        }

        let rows: Vec<(bool, Vec<String>)> = view
            .rows()
            .iter()
            .map(|row| {
                let mut texts = vec![row.id.to_string()];
                texts.extend(row.cells.iter().map(|cell| truncate(&cell.to_plain())));
                if view.actions_header.is_some() {
                    let buttons: Vec<String> =
                        row.actions.iter().map(|a| format!("[{}]", a.title)).collect();
                    texts.push(buttons.join(" "));
                }
                (row.selected, texts)
            })
            .collect();

        let mut widths: Vec<usize> = titles.iter().map(|t| t.chars().count()).collect();
        for (_, texts) in &rows {
            for (width, text) in widths.iter_mut().zip(texts) {
                *width = (*width).max(text.chars().count());
            }
        }

        let header = format!("  {}", join_padded(&titles, &widths));
        let lines = match &view.body {
            Body::Rows(_) => rows
                .iter()
                .map(|(selected, texts)| {
                    let marker = if *selected { "* " } else { "  " };
                    let style = if *selected {
                        LineStyle::Selected
                    } else {
                        LineStyle::Normal
                    };
                    (style, format!("{}{}", marker, join_padded(texts, &widths)))
                })
                .collect(),
            Body::Loading { message, .. } | Body::Empty { message, .. } => {
                vec![(LineStyle::Muted, format!("  {}", message))]
            }
            Body::Error { message, .. } => vec![(LineStyle::Error, format!("  {}", message))],
        };

        let mut toolbar = view.toolbar.item_count.clone();
        if !view.toolbar.search_query.is_empty() {
            toolbar.push_str(&format!("  search: \"{}\"", view.toolbar.search_query));
        }
        if let Some(add) = &view.toolbar.add_button {
            toolbar.push_str(&format!("  [{}]", add));
        }

        let pager = &view.pager;
        let options: Vec<String> = pager.size_options.iter().map(usize::to_string).collect();
        let pager = format!(
            "{} {} {}  {} {} ({})",
            if pager.previous_enabled { "<" } else { "-" },
            pager.page_info,
            if pager.next_enabled { ">" } else { "-" },
            pager.rows_per_page,
            pager.size_label,
            options.join("/"),
        );

        Self {
            toolbar,
            header,
            lines,
            pager,
        }
    }
}

fn truncate(text: &str) -> String {
    let text = text.replace(['\n', '\r'], " ");
    if text.chars().count() <= MAX_CELL_WIDTH {
        return text;
    }
    let mut short: String = text.chars().take(MAX_CELL_WIDTH - 3).collect();
    short.push_str("...");
    short
}

fn join_padded(texts: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = texts
        .iter()
        .zip(widths)
        .map(|(text, width)| format!("{:<width$}", text, width = width))
        .collect();
    padded.join(SEPARATOR).trim_end().to_string()
}

/// A surface printing frames to a writer.
///
/// A frame equal to the previous one is not printed again.
pub struct TerminalSurface<W: Write> {
    out: W,
    last: Option<GridView>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    fn write_frame(&mut self, frame: &Frame) -> io::Result<()> {
        queue!(
            self.out,
            Print("\n"),
            PrintStyledContent(frame.toolbar.as_str().bold()),
            Print("\n"),
            PrintStyledContent(frame.header.as_str().bold().underlined()),
            Print("\n")
        )?;
        for (style, line) in &frame.lines {
            let styled = match style {
                LineStyle::Normal => line.as_str().reset(),
                LineStyle::Selected => line.as_str().reverse(),
                LineStyle::Muted => line.as_str().dark_grey(),
                LineStyle::Error => line.as_str().red(),
            };
            queue!(self.out, PrintStyledContent(styled), Print("\n"))?;
        }
        queue!(
            self.out,
            PrintStyledContent(frame.pager.as_str().dark_grey()),
            Print("\n")
        )?;
        self.out.flush()
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn draw(&mut self, view: &GridView) {
        if self.last.as_ref() == Some(view) {
            return;
        }
        if let Err(e) = self.write_frame(&Frame::layout(view)) {
            log::warn!("Failed to draw grid frame: {}", e);
        }
        self.last = Some(view.clone());
    }
}

/// A host with a single terminal container.
pub struct TerminalHost {
    container_id: String,
}

impl TerminalHost {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
        }
    }
}

impl Host for TerminalHost {
    fn mount(&mut self, container_id: &str) -> Option<Box<dyn Surface>> {
        (container_id == self.container_id)
            .then(|| Box::new(TerminalSurface::new(io::stdout())) as Box<dyn Surface>)
    }
}
