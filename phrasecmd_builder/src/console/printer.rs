use terminal_size::{terminal_size, Width as TerminalWidth};

use crate::console::{ColumnRenderer, UserInterface, Width};

const PADDING_WIDTH: usize = 3;
const LISTING_INDENT: usize = 2;
// Without a terminal, wrap descriptions at a modest width.
const DEFAULT_RIGHT_WIDTH: usize = 60;

/// A two column `phrase   description` listing of commands.
pub(crate) struct Listing {
    rows: Vec<(String, String)>,
    terminal_width: Option<usize>,
}

impl Listing {
    pub(crate) fn terminal(rows: Vec<(String, String)>) -> Self {
        let terminal_width = if let Some((TerminalWidth(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(rows, terminal_width)
    }

    pub(crate) fn new(rows: Vec<(String, String)>, terminal_width: Option<usize>) -> Self {
        Self {
            rows,
            terminal_width,
        }
    }

    pub(crate) fn render(&self) -> Vec<String> {
        let left_column_width = self
            .rows
            .iter()
            .map(|(phrase, _)| phrase.chars().count())
            .max()
            .unwrap_or_default();
        let right_column_width = self
            .rows
            .iter()
            .map(|(_, description)| description.chars().count())
            .max()
            .unwrap_or_default();
        if left_column_width == 0 {
            return Vec::default();
        }

        let padding = Width::at_least(PADDING_WIDTH, 1);
        let left = Width::at_least(left_column_width, 1);
        let column_renderer = match &self.terminal_width {
            Some(tw) => ColumnRenderer::guided(
                padding,
                left,
                Width::at_least(right_column_width, 2),
                tw.saturating_sub(LISTING_INDENT),
            ),
            None => ColumnRenderer::new(
                padding,
                left,
                Width::at_least(std::cmp::min(right_column_width, DEFAULT_RIGHT_WIDTH), 2),
            ),
        };

        self.rows
            .iter()
            .flat_map(|(phrase, description)| {
                column_renderer.render(LISTING_INDENT, phrase, description)
            })
            .collect()
    }

    pub(crate) fn print(
        &self,
        heading: impl Into<String>,
        user_interface: &(impl UserInterface + ?Sized),
    ) {
        user_interface.print(self.heading_and_rows(heading));
    }

    pub(crate) fn print_error(
        &self,
        heading: impl Into<String>,
        user_interface: &(impl UserInterface + ?Sized),
    ) {
        user_interface.print_error(self.heading_and_rows(heading));
    }

    pub(crate) fn heading_and_rows(&self, heading: impl Into<String>) -> String {
        let mut lines = vec![heading.into()];
        lines.extend(self.render());
        lines.join("\n")
    }
}
