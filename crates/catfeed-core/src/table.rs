use crate::errors::Result;

/// Returns true when a cell counts as empty for fill purposes.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// In-memory catalog table: an ordered header plus ordered rows of
/// untyped string cells. Row order is semantically meaningful because
/// forward-fill propagates values downward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    /// Reads a UTF-8 CSV export. The first record is the header; every
    /// data record must have the same width or the read fails.
    pub fn from_csv(bytes: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(bytes);

        let header: Vec<String> = reader
            .headers()?
            .iter()
            .map(|field| field.to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|field| field.to_string()).collect());
        }

        Ok(Self { header, rows })
    }

    /// Serializes the table back to CSV bytes, header first.
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        {
            let mut writer = csv::Writer::from_writer(&mut buffer);
            writer.write_record(&self.header)?;
            for row in &self.rows {
                writer.write_record(row)?;
            }
            writer.flush()?;
        }
        Ok(buffer)
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|field| field == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column(name)
            .ok_or_else(|| crate::errors::FeedError::MissingColumn {
                column: name.to_string(),
            })
    }

    pub fn rename_column(&mut self, from: &str, to: &str) {
        if let Some(index) = self.column(from) {
            self.header[index] = to.to_string();
        }
    }

    pub fn remove_column(&mut self, index: usize) {
        self.header.remove(index);
        for row in &mut self.rows {
            row.remove(index);
        }
    }

    /// Appends a column holding the same value in every row.
    pub fn push_column(&mut self, name: &str, value: &str) {
        self.header.push(name.to_string());
        for row in &mut self.rows {
            row.push(value.to_string());
        }
    }

    /// Replaces each blank cell with the nearest non-blank value above
    /// it. A blank run at the top of the table stays blank; fill state
    /// resets only at table start.
    pub fn forward_fill(&mut self, index: usize) {
        let mut last_seen: Option<String> = None;
        for row in &mut self.rows {
            let cell = &mut row[index];
            if is_blank(cell) {
                if let Some(value) = &last_seen {
                    *cell = value.clone();
                }
            } else {
                last_seen = Some(cell.clone());
            }
        }
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column(column)?;
        self.rows.get(row).map(|cells| cells[index].as_str())
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.header.len()
    }
}
