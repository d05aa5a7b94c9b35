use fanout_core::{Aggregate, Table};
use std::io::{self, Write};

/// Prints a bounded preview of an [`Aggregate`].
pub struct Reporter<W: Write> {
    out: W,
    preview_rows: usize,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, preview_rows: usize) -> Self {
        Self { out, preview_rows }
    }

    pub fn report(&mut self, aggregate: &Aggregate) -> io::Result<()> {
        writeln!(self.out, "All data from CSV files:")?;
        for result in aggregate.tabular_results() {
            writeln!(
                self.out,
                "{} ({} rows)",
                result.path.display(),
                result.table.len()
            )?;
            self.write_table(&result.table)?;
            writeln!(self.out)?;
        }

        writeln!(self.out, "All data from API:")?;
        writeln!(
            self.out,
            "{}",
            serde_json::to_string_pretty(aggregate.api_result())?
        )?;

        writeln!(self.out, "All data from database:")?;
        for row in aggregate.db_result() {
            let fields: Vec<String> = row.iter().map(ToString::to_string).collect();
            writeln!(self.out, "({})", fields.join(", "))?;
        }

        writeln!(self.out, "All data loaded successfully!")?;
        self.out.flush()
    }

    // Right-aligned columns with a leading row index.
    fn write_table(&mut self, table: &Table) -> io::Result<()> {
        if table.is_empty() {
            return writeln!(
                self.out,
                "Empty table (columns: {})",
                table.columns().join(", ")
            );
        }

        let rows: Vec<Vec<String>> = table
            .head(self.preview_rows)
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect();

        let index_width = rows.len().saturating_sub(1).to_string().len();
        let widths: Vec<usize> = table
            .columns()
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                rows.iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .chain([name.chars().count()])
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(self.out, "{:width$}", "", width = index_width)?;
        for (name, width) in table.columns().iter().zip(&widths) {
            write!(self.out, "  {:>width$}", name, width = *width)?;
        }
        writeln!(self.out)?;

        for (idx, row) in rows.iter().enumerate() {
            write!(self.out, "{:<width$}", idx, width = index_width)?;
            for (cell, width) in row.iter().zip(&widths) {
                write!(self.out, "  {:>width$}", cell, width = *width)?;
            }
            writeln!(self.out)?;
        }

        Ok(())
    }
}
