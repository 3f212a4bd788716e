use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::ChunkReader;
use thiserror::Error;

use super::model::{SalaryDataset, SalaryRecord};

/// Columns every input file must provide, in the source file's naming.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "ano",
    "senioridade",
    "contrato",
    "tamanho_empresa",
    "cargo",
    "remoto",
    "salario_anual_conv_usd",
    "residencia_iso3",
];

/// Structural problems with an input file.
#[derive(Debug, Error, PartialEq)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: null value in column '{column}'")]
    NullValue { column: &'static str, row: usize },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a salary dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the columns in [`REQUIRED_COLUMNS`]
/// * `.json`    – `[{ "ano": 2024, "cargo": "...", ... }, ...]`
/// * `.parquet` – one column per field (Pandas or Polars output)
pub fn load_file(path: &Path) -> Result<SalaryDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            read_csv(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            read_json(&text)
        }
        "parquet" | "pq" => {
            let file = std::fs::File::open(path).context("opening parquet file")?;
            read_parquet(file)
        }
        other => return Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} salary records from {}",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse CSV with a header row. Extra columns are ignored.
pub fn read_csv<R: Read>(reader: R) -> Result<SalaryDataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column).into());
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<SalaryRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    Ok(SalaryDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
pub fn read_json(text: &str) -> Result<SalaryDataset> {
    let records: Vec<SalaryRecord> =
        serde_json::from_str(text).context("parsing JSON records")?;
    Ok(SalaryDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load salary records from Parquet.
///
/// Column types are normalised with Arrow's cast kernel, so integer or float
/// salaries, 32- or 64-bit years and dictionary-encoded (categorical) strings
/// all load.
pub fn read_parquet<R: ChunkReader + 'static>(reader: R) -> Result<SalaryDataset> {
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(reader).context("reading parquet metadata")?;
    let batches = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_offset = 0;

    for batch_result in batches {
        let batch = batch_result.context("reading parquet record batch")?;
        append_batch(&batch, row_offset, &mut records)?;
        row_offset += batch.num_rows();
    }

    Ok(SalaryDataset::from_records(records))
}

fn append_batch(batch: &RecordBatch, row_offset: usize, out: &mut Vec<SalaryRecord>) -> Result<()> {
    let year = column_as(batch, "ano", &DataType::Int64)?;
    let seniority = column_as(batch, "senioridade", &DataType::Utf8)?;
    let contract = column_as(batch, "contrato", &DataType::Utf8)?;
    let company_size = column_as(batch, "tamanho_empresa", &DataType::Utf8)?;
    let role = column_as(batch, "cargo", &DataType::Utf8)?;
    let remote = column_as(batch, "remoto", &DataType::Utf8)?;
    let salary = column_as(batch, "salario_anual_conv_usd", &DataType::Float64)?;
    let country = column_as(batch, "residencia_iso3", &DataType::Utf8)?;

    let years = year.as_primitive::<Int64Type>();
    let salaries = salary.as_primitive::<Float64Type>();

    for row in 0..batch.num_rows() {
        let abs_row = row_offset + row;
        if years.is_null(row) {
            bail!(LoadError::NullValue { column: "ano", row: abs_row });
        }
        if salaries.is_null(row) {
            bail!(LoadError::NullValue {
                column: "salario_anual_conv_usd",
                row: abs_row,
            });
        }

        let year = i32::try_from(years.value(row))
            .with_context(|| format!("row {abs_row}: year out of range"))?;

        out.push(SalaryRecord {
            year,
            seniority: string_at(&seniority, row),
            contract: string_at(&contract, row),
            company_size: string_at(&company_size, row),
            role: string_at(&role, row),
            remote: string_at(&remote, row),
            salary_usd: salaries.value(row),
            country: string_at(&country, row),
        });
    }
    Ok(())
}

// -- Parquet / Arrow helpers --

/// Look up a column by name and cast it to `to`.
fn column_as(batch: &RecordBatch, name: &'static str, to: &DataType) -> Result<ArrayRef> {
    let col = batch
        .column_by_name(name)
        .ok_or(LoadError::MissingColumn(name))?;
    cast(col, to).with_context(|| format!("column '{name}' cannot be read as {to}"))
}

/// A Utf8 cell, empty for null.
fn string_at(col: &ArrayRef, row: usize) -> String {
    if col.is_null(row) {
        return String::new();
    }
    col.as_string::<i32>().value(row).to_string()
}
