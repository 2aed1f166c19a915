//! Catalog exporters: one xlsx workbook, or a pair of csv files.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use shopcat_core::{Catalog, Catalogs};
use shopcat_scraper::CatalogExporter;
use thiserror::Error;

const HEADER: [&str; 3] = ["name", "price", "monthly_sales"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("xlsx error: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes both catalogs into one workbook, one sheet each.
#[derive(Debug, Clone)]
pub struct XlsxExporter {
    path: PathBuf,
}

impl XlsxExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn write_sheet(workbook: &mut Workbook, catalog: &Catalog) -> Result<(), XlsxError> {
        let bold = Format::new().set_bold();
        let sheet = workbook.add_worksheet();
        sheet.set_name(catalog.kind().sheet_name())?;
        for (col, title) in (0u16..).zip(HEADER) {
            sheet.write_string_with_format(0, col, title, &bold)?;
        }
        for (row, record) in (1u32..).zip(catalog.iter()) {
            sheet.write_string(row, 0, &record.name)?;
            sheet.write_number(row, 1, as_cell_number(record.price))?;
            sheet.write_number(row, 2, as_cell_number(record.monthly_sales))?;
        }
        Ok(())
    }
}

// Spreadsheet cells hold f64; prices and sales counts stay well inside the
// exactly representable range.
#[allow(clippy::cast_precision_loss)]
fn as_cell_number(value: u64) -> f64 {
    value as f64
}

impl CatalogExporter for XlsxExporter {
    type Error = ExportError;

    fn export(&self, catalogs: &Catalogs) -> Result<String, Self::Error> {
        let mut workbook = Workbook::new();
        Self::write_sheet(&mut workbook, &catalogs.available)?;
        Self::write_sheet(&mut workbook, &catalogs.sold_out)?;
        workbook.save(&self.path)?;
        Ok(self.path.display().to_string())
    }
}

/// Writes `<stem>_available.csv` and `<stem>_sold_out.csv` next to the
/// configured output path.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    available: PathBuf,
    sold_out: PathBuf,
}

impl CsvExporter {
    pub fn new(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .map_or_else(|| "shop_catalog".into(), |s| s.to_string_lossy());
        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self {
            available: dir.join(format!("{stem}_available.csv")),
            sold_out: dir.join(format!("{stem}_sold_out.csv")),
        }
    }

    fn write_file(path: &Path, catalog: &Catalog) -> Result<(), ExportError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;
        writer.write_record(HEADER)?;
        for record in catalog.iter() {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl CatalogExporter for CsvExporter {
    type Error = ExportError;

    fn export(&self, catalogs: &Catalogs) -> Result<String, Self::Error> {
        Self::write_file(&self.available, &catalogs.available)?;
        Self::write_file(&self.sold_out, &catalogs.sold_out)?;
        Ok(format!(
            "{} and {}",
            self.available.display(),
            self.sold_out.display()
        ))
    }
}

/// The exporter picked by `--format`.
#[derive(Debug, Clone)]
pub enum Exporter {
    Xlsx(XlsxExporter),
    Csv(CsvExporter),
}

impl Exporter {
    pub fn new(format: ExportFormat, path: &Path) -> Self {
        match format {
            ExportFormat::Xlsx => Self::Xlsx(XlsxExporter::new(path)),
            ExportFormat::Csv => Self::Csv(CsvExporter::new(path)),
        }
    }
}

impl CatalogExporter for Exporter {
    type Error = ExportError;

    fn export(&self, catalogs: &Catalogs) -> Result<String, Self::Error> {
        match self {
            Self::Xlsx(exporter) => exporter.export(catalogs),
            Self::Csv(exporter) => exporter.export(catalogs),
        }
    }
}
